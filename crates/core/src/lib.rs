//! # Favorites Core
//!
//! View-model layer for a character "favorites" feature: tracks which
//! character ids the user marked favorite, persists that set through a
//! [`store::FavoritesStore`], and hydrates full records from a
//! [`catalog::CatalogService`].
//!
//! ## Architecture
//!
//! - `coordinator/` - The favorites coordinator and its observable state
//! - `store/` - Favorites persistence (memory, SQLite, remote document DB)
//! - `catalog/` - Character catalog access (HTTP, static)
//! - `hydration/` - Per-category outcomes and favorite filtering
//! - `events/` - State change notifications for the UI
//!
//! ## Usage
//!
//! ```rust,ignore
//! use favorites_core::{FavoritesConfig, FavoritesCoordinator};
//!
//! let config = FavoritesConfig::from_env()?;
//! let mut coordinator = FavoritesCoordinator::from_config(&config)?;
//! coordinator.refresh_favorite_ids().await;
//! coordinator.add_to_favorite(7).await;
//! let report = coordinator.refresh_hydrated_characters().await;
//! ```

pub mod catalog;
pub mod config;
pub mod coordinator;
pub mod error;
pub mod events;
pub mod hydration;
pub mod models;
pub mod store;

pub use config::{FavoritesConfig, HydrationPolicy, StoreBackend};
pub use coordinator::{CoordinatorState, FavoritesCoordinator};
pub use error::{CatalogError, PersistenceError};
pub use events::{FavoritesEvent, FavoritesEventKind};
pub use hydration::{CategoryOutcome, HydrationReport};
pub use models::{CharacterRecord, FavoriteCharacter};
