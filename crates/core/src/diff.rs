//! Shared diff-status enum for key-by-key comparisons.
//!
//! Used to classify draft SKU rows against the SKUs already persisted for a
//! product, keyed by composite model string.

use serde::{Deserialize, Serialize};

/// The status of an item in a diff comparison.
///
/// - `Added`     -- present only in the incoming/draft side.
/// - `Removed`   -- present only in the persisted side.
/// - `Changed`   -- present in both sides but with different values.
/// - `Unchanged` -- present in both sides with identical values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiffStatus {
    Added,
    Removed,
    Changed,
    Unchanged,
}

impl DiffStatus {
    /// String representation for display and logging.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Added => "added",
            Self::Removed => "removed",
            Self::Changed => "changed",
            Self::Unchanged => "unchanged",
        }
    }
}

impl std::fmt::Display for DiffStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
