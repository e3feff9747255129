//! Category types for the finance ledger

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Category identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(Uuid);

impl CategoryId {
    /// Create a new random category ID
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for CategoryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A label grouping transactions
///
/// Created the first time a transaction names an unseen title. Titles are
/// unique and compared exactly (case-sensitive, as stored).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: CategoryId,
    pub title: String,
}

impl Category {
    /// Create a category with a freshly generated ID
    pub fn new(title: impl Into<String>) -> Self {
        Category {
            id: CategoryId::new(),
            title: title.into(),
        }
    }
}
