//! Strongly-typed ID wrappers for ledger entities
//!
//! Newtypes over random v4 UUIDs. A transaction id can never be passed where
//! a budget id is expected, and 122 bits of entropy keep ids unique even
//! under rapid successive creation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

macro_rules! define_id {
    ($name:ident, $display_prefix:literal) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Uuid);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            /// Get the underlying UUID
            pub fn as_uuid(&self) -> &Uuid {
                &self.0
            }

            /// Short form shown to users, e.g. `txn-1a2b3c4d`
            pub fn short(&self) -> String {
                self.to_string()
            }

            /// Whether a user-supplied reference names this id.
            ///
            /// Accepts the full UUID, the prefixed full UUID, or the short
            /// display form.
            pub fn matches_ref(&self, reference: &str) -> bool {
                let reference = reference.trim();
                if reference.is_empty() {
                    return false;
                }
                let full = self.0.to_string();
                let bare = reference.strip_prefix($display_prefix).unwrap_or(reference);
                reference == self.short() || bare == full
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $display_prefix, &self.0.to_string()[..8])
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.strip_prefix($display_prefix).unwrap_or(s);
                Ok(Self(Uuid::parse_str(s)?))
            }
        }
    };
}

define_id!(TransactionId, "txn-");
define_id!(CategoryId, "cat-");
define_id!(BudgetId, "bud-");
