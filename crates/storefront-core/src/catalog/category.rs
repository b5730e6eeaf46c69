//! Menu categories used for section navigation.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// A menu category.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique category identifier.
    pub id: CategoryId,
    /// Category name.
    pub name: String,
    /// In-page anchor for the category section (e.g., "#fast-food").
    pub anchor: String,
}

impl Category {
    /// Create a category, deriving its anchor from the name.
    pub fn new(id: impl Into<CategoryId>, name: impl Into<String>) -> Self {
        let name = name.into();
        let anchor = format!("#{}", slugify(&name));
        Self {
            id: id.into(),
            name,
            anchor,
        }
    }
}

fn slugify(name: &str) -> String {
    name.split(|c: char| !c.is_alphanumeric())
        .filter(|part| !part.is_empty())
        .map(str::to_lowercase)
        .collect::<Vec<_>>()
        .join("-")
}
