//! Reports module for Nest Wealth
//!
//! The aggregator (pure summary functions over transaction sets) and the
//! terminal reports built on top of it.

pub mod category;
pub mod monthly;
pub mod overview;
pub mod summary;

pub use category::CategoryReport;
pub use monthly::MonthlyReport;
pub use overview::OverviewReport;
pub use summary::{
    breakdown_by_category, monthly_summary, savings_rate, totals_by_type, CategoryBreakdown,
    CategoryShare, MonthlySummary, TypeTotals, YearMonth,
};
