//! # Favorites Configuration
//!
//! Defaults for the coordinator and its adapters, with `FAVORITES_*`
//! environment variable overrides.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

/// Catalog categories queried during hydration, in concatenation order
pub const DEFAULT_CATEGORIES: [&str; 4] = ["dragonball", "dragonballz", "dragonballgt", "dragons"];

/// What to do with the successful categories when another category fails
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HydrationPolicy {
    /// Any failed category leaves the hydrated list untouched
    #[default]
    AllOrNothing,
    /// Failed categories contribute nothing, the rest are still applied
    BestEffort,
}

impl std::str::FromStr for HydrationPolicy {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "all_or_nothing" | "all-or-nothing" => Ok(Self::AllOrNothing),
            "best_effort" | "best-effort" => Ok(Self::BestEffort),
            other => bail!("Unknown hydration policy '{}'", other),
        }
    }
}

/// Which favorites store backend to use
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    /// Process-local, lost on exit
    Memory,
    /// SQLite file
    #[default]
    Sqlite,
    /// HTTP document database
    Remote,
}

impl std::str::FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "sqlite" => Ok(Self::Sqlite),
            "remote" => Ok(Self::Remote),
            other => bail!("Unknown store backend '{}'", other),
        }
    }
}

/// Catalog service settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// Base URL of the character catalog API
    pub base_url: String,
    /// Records requested per page
    pub page_size: u32,
    /// Upper bound on pages fetched for a single category
    pub max_pages: u32,
    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: "https://dragonball-api.com/api".to_string(),
            page_size: 50,
            max_pages: 100,
            timeout_secs: 10,
        }
    }
}

/// Favorites store settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    pub backend: StoreBackend,
    /// Path of the SQLite file (sqlite backend)
    pub sqlite_path: String,
    /// Base URL of the document database (remote backend)
    pub remote_url: Option<String>,
    /// Collection holding favorite documents (remote backend)
    pub collection: String,
    /// Bearer token for the document database (remote backend)
    pub auth_token: Option<String>,
    /// Per-request timeout (remote backend)
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Sqlite,
            sqlite_path: ".favorites/favorites.db".to_string(),
            remote_url: None,
            collection: "favorite_characters".to_string(),
            auth_token: None,
            timeout_secs: 10,
        }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesConfig {
    /// Categories queried during hydration, in order
    pub categories: Vec<String>,
    #[serde(default)]
    pub hydration_policy: HydrationPolicy,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

impl Default for FavoritesConfig {
    fn default() -> Self {
        Self {
            categories: DEFAULT_CATEGORIES.iter().map(|c| c.to_string()).collect(),
            hydration_policy: HydrationPolicy::AllOrNothing,
            catalog: CatalogConfig::default(),
            store: StoreConfig::default(),
        }
    }
}

impl FavoritesConfig {
    /// Defaults with overrides from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults with overrides from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup("FAVORITES_CATEGORIES") {
            let categories: Vec<String> = raw
                .split(',')
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect();
            if categories.is_empty() {
                bail!("FAVORITES_CATEGORIES must name at least one category");
            }
            config.categories = categories;
        }
        if let Some(raw) = lookup("FAVORITES_HYDRATION_POLICY") {
            config.hydration_policy = raw
                .parse()
                .context("Invalid FAVORITES_HYDRATION_POLICY")?;
        }
        if let Some(url) = lookup("FAVORITES_CATALOG_URL") {
            config.catalog.base_url = url;
        }
        if let Some(raw) = lookup("FAVORITES_CATALOG_PAGE_SIZE") {
            config.catalog.page_size = raw
                .trim()
                .parse()
                .context("Invalid FAVORITES_CATALOG_PAGE_SIZE")?;
        }
        if let Some(raw) = lookup("FAVORITES_STORE") {
            config.store.backend = raw.parse().context("Invalid FAVORITES_STORE")?;
        }
        if let Some(path) = lookup("FAVORITES_DB_PATH") {
            config.store.sqlite_path = path;
        }
        if let Some(url) = lookup("FAVORITES_REMOTE_URL") {
            config.store.remote_url = Some(url);
        }
        if let Some(collection) = lookup("FAVORITES_COLLECTION") {
            config.store.collection = collection;
        }
        if let Some(token) = lookup("FAVORITES_AUTH_TOKEN") {
            config.store.auth_token = Some(token);
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn test_favorites_config_default() {
        let config = FavoritesConfig::default();
        assert_eq!(
            config.categories,
            vec!["dragonball", "dragonballz", "dragonballgt", "dragons"]
        );
        assert_eq!(config.hydration_policy, HydrationPolicy::AllOrNothing);
        assert_eq!(config.store.backend, StoreBackend::Sqlite);
        assert_eq!(config.catalog.page_size, 50);
    }

    #[test]
    fn test_env_overrides() {
        let config = FavoritesConfig::from_lookup(lookup(&[
            ("FAVORITES_CATEGORIES", "dragonball, dragons ,"),
            ("FAVORITES_HYDRATION_POLICY", "best-effort"),
            ("FAVORITES_STORE", "remote"),
            ("FAVORITES_REMOTE_URL", "http://localhost:9000"),
            ("FAVORITES_CATALOG_PAGE_SIZE", "20"),
        ]))
        .unwrap();

        assert_eq!(config.categories, vec!["dragonball", "dragons"]);
        assert_eq!(config.hydration_policy, HydrationPolicy::BestEffort);
        assert_eq!(config.store.backend, StoreBackend::Remote);
        assert_eq!(
            config.store.remote_url.as_deref(),
            Some("http://localhost:9000")
        );
        assert_eq!(config.catalog.page_size, 20);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        let err = FavoritesConfig::from_lookup(lookup(&[("FAVORITES_STORE", "redis")]))
            .unwrap_err();
        assert!(err.to_string().contains("FAVORITES_STORE"));

        assert!(FavoritesConfig::from_lookup(lookup(&[("FAVORITES_CATEGORIES", " , ")])).is_err());
    }
}
