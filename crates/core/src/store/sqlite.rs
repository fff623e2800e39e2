//! # SQLite Favorites Store
//!
//! File-backed favorites store. Favorites live in a single `favorites`
//! table; insertion order is kept through an autoincrement key.

use anyhow::{Context, Result};
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use super::FavoritesStore;
use crate::error::PersistenceError;
use crate::models::FavoriteCharacter;

/// Schema version for migrations
const SCHEMA_VERSION: i32 = 1;

/// SQLite-backed favorites store
pub struct SqliteFavoritesStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteFavoritesStore {
    /// Open or create the database at `path`
    pub fn open_at<P: AsRef<Path>>(path: P) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = path.as_ref().parent() {
            std::fs::create_dir_all(parent).ok();
        }

        let conn = Connection::open(path.as_ref()).context("Failed to open favorites database")?;
        Self::from_connection(conn)
    }

    /// Open a private in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let store = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        store.run_migrations()?;
        Ok(store)
    }

    fn lock(&self) -> Result<MutexGuard<'_, Connection>, PersistenceError> {
        self.conn
            .lock()
            .map_err(|e| PersistenceError::Internal(format!("Lock error: {}", e)))
    }

    /// Run schema migrations
    fn run_migrations(&self) -> Result<()> {
        let conn = self.lock()?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS schema_version (version INTEGER PRIMARY KEY)",
            [],
        )?;

        let current_version: i32 = conn
            .query_row(
                "SELECT COALESCE(MAX(version), 0) FROM schema_version",
                [],
                |row| row.get(0),
            )
            .unwrap_or(0);

        if current_version < 1 {
            conn.execute(
                r#"
                CREATE TABLE IF NOT EXISTS favorites (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    character_id INTEGER NOT NULL UNIQUE,
                    created_at TEXT NOT NULL DEFAULT (datetime('now'))
                )
                "#,
                [],
            )?;
            conn.execute(
                "INSERT OR REPLACE INTO schema_version (version) VALUES (?1)",
                [1],
            )?;
            tracing::info!(
                "Favorites database initialized with schema version {}",
                SCHEMA_VERSION
            );
        }

        Ok(())
    }
}

#[async_trait]
impl FavoritesStore for SqliteFavoritesStore {
    async fn create(&self, favorite: &FavoriteCharacter) -> Result<(), PersistenceError> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO favorites (character_id) VALUES (?1) ON CONFLICT(character_id) DO NOTHING",
            params![favorite.character_id],
        )?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FavoriteCharacter>, PersistenceError> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT character_id FROM favorites ORDER BY id")?;
        let favorites = stmt
            .query_map([], |row| Ok(FavoriteCharacter::new(row.get(0)?)))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(favorites)
    }

    async fn delete(&self, character_id: i64) -> Result<(), PersistenceError> {
        let conn = self.lock()?;
        let affected = conn.execute(
            "DELETE FROM favorites WHERE character_id = ?1",
            params![character_id],
        )?;
        if affected == 0 {
            tracing::debug!("No favorite stored for character {}", character_id);
        }
        Ok(())
    }
}
