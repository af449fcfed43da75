//! Category model
//!
//! Categories group transactions by a free-form title. Titles are unique
//! across the ledger and compared exactly (after trimming surrounding
//! whitespace).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// A transaction category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Unique identifier
    pub id: CategoryId,

    /// Category title, unique across the ledger
    pub title: String,

    /// When the category was created
    pub created_at: DateTime<Utc>,

    /// When the category was last modified
    pub updated_at: DateTime<Utc>,
}

impl Category {
    /// Create a new, unsaved category
    pub fn new(title: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: CategoryId::new(),
            title: Self::normalize_title(&title.into()),
            created_at: now,
            updated_at: now,
        }
    }

    /// Canonical form used for storage and lookups
    pub fn normalize_title(title: &str) -> String {
        title.trim().to_string()
    }

    /// Check whether this category answers to the given title
    pub fn matches_title(&self, title: &str) -> bool {
        self.title == title.trim()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_category() {
        let category = Category::new("  Housing ");
        assert_eq!(category.title, "Housing");
        assert_eq!(category.created_at, category.updated_at);
    }

    #[test]
    fn test_matches_title_is_exact() {
        let category = Category::new("Housing");
        assert!(category.matches_title("Housing"));
        assert!(category.matches_title(" Housing "));
        assert!(!category.matches_title("housing"));
        assert!(!category.matches_title("Housing costs"));
    }

    #[test]
    fn test_serialization() {
        let category = Category::new("Job");
        let json = serde_json::to_string(&category).unwrap();
        let deserialized: Category = serde_json::from_str(&json).unwrap();
        assert_eq!(category, deserialized);
    }
}
