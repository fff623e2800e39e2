//! # Favorites Store
//!
//! Key-value persistence for favorite characters, keyed by character id.
//!
//! ## Backends
//!
//! - `memory` - process-local list, used by tests and throwaway sessions
//! - `sqlite` - file-backed store with schema migrations
//! - `remote` - HTTP document database (one document per favorite)

pub mod memory;
pub mod remote;
pub mod sqlite;

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{StoreBackend, StoreConfig};
use crate::error::PersistenceError;
use crate::models::FavoriteCharacter;

pub use memory::InMemoryFavoritesStore;
pub use remote::RemoteFavoritesStore;
pub use sqlite::SqliteFavoritesStore;

/// Persistence for the favorite set.
///
/// Implementations keep at most one record per character id: `create` of an
/// existing id leaves a single record, `delete` of an absent id succeeds.
/// `list` returns favorites in the order they were first created.
#[async_trait]
pub trait FavoritesStore: Send + Sync {
    /// Persist a favorite
    async fn create(&self, favorite: &FavoriteCharacter) -> Result<(), PersistenceError>;
    /// All persisted favorites
    async fn list(&self) -> Result<Vec<FavoriteCharacter>, PersistenceError>;
    /// Remove the favorite with the given character id
    async fn delete(&self, character_id: i64) -> Result<(), PersistenceError>;
}

/// Build the store selected by `config.backend`
pub fn open_store(config: &StoreConfig) -> Result<Arc<dyn FavoritesStore>> {
    let store: Arc<dyn FavoritesStore> = match config.backend {
        StoreBackend::Memory => Arc::new(InMemoryFavoritesStore::new()),
        StoreBackend::Sqlite => Arc::new(
            SqliteFavoritesStore::open_at(&config.sqlite_path)
                .context("Failed to open favorites database")?,
        ),
        StoreBackend::Remote => {
            let base_url = config
                .remote_url
                .as_deref()
                .context("Remote store selected but FAVORITES_REMOTE_URL is not set")?;
            Arc::new(RemoteFavoritesStore::new(
                base_url,
                &config.collection,
                config.auth_token.clone(),
                config.timeout_secs,
            )?)
        }
    };

    tracing::debug!("Opened {:?} favorites store", config.backend);
    Ok(store)
}
