//! # Favorites Events
//!
//! Notifications the coordinator emits so a UI can follow state changes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of favorites event
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FavoritesEventKind {
    /// A favorite was appended locally and persisted
    FavoriteAdded,
    /// A favorite was removed locally and from the store
    FavoriteRemoved,
    /// The favorite id list was replaced from the store
    FavoritesRefreshed,
    /// Hydration queries were issued and `is_loading` raised
    HydrationStarted,
    /// Hydration settled (possibly with failed categories)
    CharactersHydrated,
    /// A store call failed and the error flag was raised
    OperationFailed,
}

/// An event emitted by the coordinator
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoritesEvent {
    pub timestamp: DateTime<Utc>,
    pub kind: FavoritesEventKind,
    /// Associated data (JSON)
    #[serde(default)]
    pub data: Option<serde_json::Value>,
}

impl FavoritesEvent {
    pub fn new(kind: FavoritesEventKind) -> Self {
        Self {
            timestamp: Utc::now(),
            kind,
            data: None,
        }
    }

    /// Add data to the event
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }
}
