//! # Static Catalog
//!
//! Fixed category contents, for tests and offline demos.

use async_trait::async_trait;
use std::collections::HashMap;

use super::CatalogService;
use crate::error::CatalogError;
use crate::models::CharacterRecord;

#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    categories: HashMap<String, Vec<CharacterRecord>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) a category
    pub fn with_category(mut self, name: &str, records: Vec<CharacterRecord>) -> Self {
        self.categories.insert(name.to_string(), records);
        self
    }
}

#[async_trait]
impl CatalogService for StaticCatalog {
    async fn query_category(&self, name: &str) -> Result<Vec<CharacterRecord>, CatalogError> {
        Ok(self.categories.get(name).cloned().unwrap_or_default())
    }
}
