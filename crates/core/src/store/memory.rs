//! # In-Memory Store
//!
//! Non-persistent favorites store. Contents are lost when dropped.

use async_trait::async_trait;
use std::sync::Mutex;

use super::FavoritesStore;
use crate::error::PersistenceError;
use crate::models::FavoriteCharacter;

#[derive(Debug, Default)]
pub struct InMemoryFavoritesStore {
    favorites: Mutex<Vec<FavoriteCharacter>>,
}

impl InMemoryFavoritesStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with the given ids
    pub fn with_ids(ids: &[i64]) -> Self {
        let store = Self::new();
        if let Ok(mut favorites) = store.favorites.lock() {
            for &id in ids {
                if !favorites.iter().any(|f| f.character_id == id) {
                    favorites.push(FavoriteCharacter::new(id));
                }
            }
        }
        store
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Vec<FavoriteCharacter>>, PersistenceError> {
        self.favorites
            .lock()
            .map_err(|e| PersistenceError::Internal(format!("Lock error: {}", e)))
    }
}

#[async_trait]
impl FavoritesStore for InMemoryFavoritesStore {
    async fn create(&self, favorite: &FavoriteCharacter) -> Result<(), PersistenceError> {
        let mut favorites = self.lock()?;
        if !favorites
            .iter()
            .any(|f| f.character_id == favorite.character_id)
        {
            favorites.push(*favorite);
        }
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FavoriteCharacter>, PersistenceError> {
        Ok(self.lock()?.clone())
    }

    async fn delete(&self, character_id: i64) -> Result<(), PersistenceError> {
        self.lock()?.retain(|f| f.character_id != character_id);
        Ok(())
    }
}
