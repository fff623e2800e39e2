//! # HTTP Catalog Client
//!
//! Walks the paged catalog endpoint for a category:
//!
//! ```text
//! GET {base}/categories/{name}/characters?page={p}&limit={n}
//!   -> {"items": [...], "meta": {"totalPages": t, "currentPage": p, ...}}
//! ```
//!
//! A response without `meta` is treated as the only page.

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;

use super::CatalogService;
use crate::config::CatalogConfig;
use crate::error::CatalogError;
use crate::models::CharacterRecord;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PageMeta {
    total_pages: u32,
    current_page: u32,
}

#[derive(Debug, Deserialize)]
struct CatalogPage {
    #[serde(default)]
    items: Vec<CharacterRecord>,
    #[serde(default)]
    meta: Option<PageMeta>,
}

pub struct HttpCatalogClient {
    client: reqwest::Client,
    base_url: String,
    page_size: u32,
    max_pages: u32,
}

impl HttpCatalogClient {
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("favorites-core/0.1")
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            page_size: config.page_size.max(1),
            max_pages: config.max_pages.max(1),
        })
    }

    async fn fetch_page(&self, category: &str, page: u32) -> Result<CatalogPage, CatalogError> {
        let url = format!(
            "{}/categories/{}/characters",
            self.base_url,
            urlencoding::encode(category)
        );
        let response = self
            .client
            .get(&url)
            .query(&[("page", page), ("limit", self.page_size)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status {
                category: category.to_string(),
                status: status.as_u16(),
            });
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|source| CatalogError::Decode {
            category: category.to_string(),
            source,
        })
    }
}

#[async_trait]
impl CatalogService for HttpCatalogClient {
    #[tracing::instrument(skip(self))]
    async fn query_category(&self, name: &str) -> Result<Vec<CharacterRecord>, CatalogError> {
        let mut records = Vec::new();
        let mut page = 1;

        loop {
            let CatalogPage { items, meta } = self.fetch_page(name, page).await?;
            tracing::debug!("Fetched page {} of '{}' ({} items)", page, name, items.len());
            let page_was_empty = items.is_empty();
            records.extend(items);

            let Some(meta) = meta else { break };
            if page_was_empty || meta.current_page >= meta.total_pages {
                break;
            }
            if page >= self.max_pages {
                return Err(CatalogError::PageLimit {
                    category: name.to_string(),
                    max_pages: self.max_pages,
                });
            }
            page += 1;
        }

        Ok(records)
    }
}
