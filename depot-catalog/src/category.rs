use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use crate::product::ProductError;

/// Product category, compared by its normalized name.
///
/// Names are trimmed and written with a leading capital and the rest in
/// lower case, so `"ELECTRONICS"`, `"electronics"` and `" Electronics "` are
/// the same category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Category {
    name: Arc<str>,
}

impl Category {
    /// Build a category without going through a registry.
    pub fn of(name: &str) -> Result<Self, ProductError> {
        Ok(Self {
            name: Arc::from(normalize(name)?),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl TryFrom<String> for Category {
    type Error = ProductError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Category::of(&value)
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        category.name.to_string()
    }
}

fn normalize(name: &str) -> Result<String, ProductError> {
    let trimmed = name.trim();
    let mut chars = trimmed.chars();
    let first = chars.next().ok_or_else(|| ProductError::InvalidArgument {
        field: "category",
        reason: "category name can't be blank".to_string(),
    })?;

    let mut normalized: String = first.to_uppercase().collect();
    normalized.push_str(&chars.as_str().to_lowercase());
    Ok(normalized)
}

/// Interns categories so equal names share one allocation.
pub struct CategoryRegistry {
    categories: RwLock<HashMap<String, Category>>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(HashMap::new()),
        }
    }

    /// Normalize `name` and return the registered category, creating it on first use.
    pub fn category_of(&self, name: &str) -> Result<Category, ProductError> {
        let normalized = normalize(name)?;

        if let Some(existing) = self
            .categories
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalized)
        {
            return Ok(existing.clone());
        }

        let mut categories = self.categories.write().unwrap_or_else(PoisonError::into_inner);
        let category = categories
            .entry(normalized.clone())
            .or_insert_with(|| {
                tracing::debug!("Registered category {}", normalized);
                Category {
                    name: Arc::from(normalized.as_str()),
                }
            })
            .clone();
        Ok(category)
    }

    pub fn len(&self) -> usize {
        self.categories.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}
