//! Configuration module for Nest Wealth
//!
//! This module provides configuration management including:
//! - Platform path resolution with an environment override
//! - User settings persistence

pub mod paths;
pub mod settings;

pub use paths::{NestPaths, DATA_DIR_ENV};
pub use settings::Settings;
