//! # Character Catalog
//!
//! Read-only access to character records, partitioned into named
//! categories (one per series).

pub mod http_client;
pub mod static_catalog;

use anyhow::Result;
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::models::CharacterRecord;

pub use http_client::HttpCatalogClient;
pub use static_catalog::StaticCatalog;

/// A source of character records grouped by category
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// Every record in the named category, in catalog order
    async fn query_category(&self, name: &str) -> Result<Vec<CharacterRecord>, CatalogError>;
}

/// Build the HTTP catalog client from config
pub fn open_catalog(config: &CatalogConfig) -> Result<Arc<dyn CatalogService>> {
    Ok(Arc::new(HttpCatalogClient::new(config)?))
}
