//! Category repository for JSON storage
//!
//! Manages loading and saving categories to categories.json, with a title
//! index for exact-match lookups.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::CashbookError;
use crate::models::{Category, CategoryId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable category data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct CategoryData {
    categories: Vec<Category>,
}

/// Repository for category persistence
pub struct CategoryRepository {
    path: PathBuf,
    data: RwLock<HashMap<CategoryId, Category>>,
    /// Index: title -> category_id
    by_title: RwLock<HashMap<String, CategoryId>>,
}

impl CategoryRepository {
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_title: RwLock::new(HashMap::new()),
        }
    }

    /// Load categories from disk and rebuild the title index
    pub fn load(&self) -> Result<(), CashbookError> {
        let file_data: CategoryData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_title = self
            .by_title
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_title.clear();

        for category in file_data.categories {
            by_title.insert(category.title.clone(), category.id);
            data.insert(category.id, category);
        }

        Ok(())
    }

    /// Save categories to disk
    pub fn save(&self) -> Result<(), CashbookError> {
        let data = self
            .data
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut categories: Vec<_> = data.values().cloned().collect();
        categories.sort_by(|a, b| a.title.cmp(&b.title));

        write_json_atomic(&self.path, &CategoryData { categories })
    }

    /// Get a category by exact title
    pub fn get_by_title(&self, title: &str) -> Result<Option<Category>, CashbookError> {
        let data = self
            .data
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_title = self
            .by_title
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let title = Category::normalize_title(title);
        Ok(by_title.get(&title).and_then(|id| data.get(id)).cloned())
    }

    /// Get all categories ordered by title
    pub fn get_all(&self) -> Result<Vec<Category>, CashbookError> {
        let data = self
            .data
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut list: Vec<_> = data.values().cloned().collect();
        list.sort_by(|a, b| a.title.cmp(&b.title));
        Ok(list)
    }

    /// Insert a new category, or update an existing one
    ///
    /// Fails when a different category already owns the title.
    pub fn upsert(&self, category: Category) -> Result<(), CashbookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_title = self
            .by_title
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(owner) = by_title.get(&category.title) {
            if *owner != category.id {
                return Err(CashbookError::Storage(format!(
                    "Category title already taken: {}",
                    category.title
                )));
            }
        }

        if let Some(old) = data.get(&category.id) {
            by_title.remove(&old.title);
        }

        by_title.insert(category.title.clone(), category.id);
        data.insert(category.id, category);
        Ok(())
    }

    /// Remove a category from memory only; used to undo a failed save
    pub(crate) fn forget(&self, id: CategoryId) -> Result<(), CashbookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_title = self
            .by_title
            .write()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(old) = data.remove(&id) {
            by_title.remove(&old.title);
        }
        Ok(())
    }

    pub fn count(&self) -> Result<usize, CashbookError> {
        let data = self
            .data
            .read()
            .map_err(|e| CashbookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(data.len())
    }
}
