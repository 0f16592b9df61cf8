use std::collections::HashMap;

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Lookups shared by several printers.
#[derive(Debug, Default, Clone)]
pub struct Metadata {
    pub categories: HashMap<String, String>,
}

impl Metadata {
    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self {
            categories: categories
                .into_iter()
                .map(|category| (category.id, category.name))
                .collect(),
        }
    }

    /// Display name of a category, or the raw id when it is unknown.
    pub fn category<'a>(&'a self, id: &'a str) -> &'a str {
        self.categories.get(id).map(String::as_str).unwrap_or(id)
    }
}
