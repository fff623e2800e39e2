//! # Favorites Coordinator
//!
//! Owns the favorites state shown by the UI and funnels every mutation
//! through its methods. Local state is updated optimistically before the
//! store is called; afterwards the canonical favorite list is always
//! re-read from the store, whether the store call succeeded or not.
//!
//! Store failures raise `has_error` with a fixed message per operation.
//! Catalog failures during hydration never raise `has_error`; they are
//! reported per category and summarized in `hydration_warning`.

use anyhow::Result;
use futures::future::join_all;
use serde::Serialize;
use std::sync::Arc;
use tokio::sync::mpsc;

use crate::catalog::{self, CatalogService};
use crate::config::{FavoritesConfig, HydrationPolicy};
use crate::error::PersistenceError;
use crate::events::{FavoritesEvent, FavoritesEventKind};
use crate::hydration::{filter_favorites, CategoryOutcome, HydrationReport};
use crate::models::{CharacterRecord, FavoriteCharacter};
use crate::store::{self, FavoritesStore};

pub const ADD_ERROR_MESSAGE: &str = "Error al agregar a favoritos";
pub const LIST_ERROR_MESSAGE: &str = "Error al obtener personajes favoritos";
pub const REMOVE_ERROR_MESSAGE: &str = "No se pudo eliminar el personaje desde favoritos";

/// State observed by the UI
#[derive(Debug, Clone, Default, Serialize)]
pub struct CoordinatorState {
    pub favorite_ids: Vec<FavoriteCharacter>,
    pub hydrated_characters: Vec<CharacterRecord>,
    pub is_loading: bool,
    pub has_error: bool,
    pub error_message: String,
    /// Failed categories from the last hydration pass
    pub hydration_warning: Option<String>,
}

/// The favorites coordinator
pub struct FavoritesCoordinator {
    store: Arc<dyn FavoritesStore>,
    catalog: Arc<dyn CatalogService>,
    categories: Vec<String>,
    policy: HydrationPolicy,
    state: CoordinatorState,
    event_tx: Option<mpsc::Sender<FavoritesEvent>>,
}

impl FavoritesCoordinator {
    /// Create a coordinator over the given store and catalog
    pub fn new(
        config: &FavoritesConfig,
        store: Arc<dyn FavoritesStore>,
        catalog: Arc<dyn CatalogService>,
    ) -> Self {
        Self {
            store,
            catalog,
            categories: config.categories.clone(),
            policy: config.hydration_policy,
            state: CoordinatorState::default(),
            event_tx: None,
        }
    }

    /// Create a coordinator with the store and catalog selected by `config`
    pub fn from_config(config: &FavoritesConfig) -> Result<Self> {
        let store = store::open_store(&config.store)?;
        let catalog = catalog::open_catalog(&config.catalog)?;
        Ok(Self::new(config, store, catalog))
    }

    /// Set event channel for streaming state changes.
    ///
    /// Events are sent with `try_send`, so a receiver that stops draining
    /// loses events instead of stalling the coordinator. Size the channel
    /// for the burst of one operation (two events each).
    pub fn with_event_channel(mut self, tx: mpsc::Sender<FavoritesEvent>) -> Self {
        self.event_tx = Some(tx);
        self
    }

    // =========================================================================
    // State accessors
    // =========================================================================

    pub fn state(&self) -> &CoordinatorState {
        &self.state
    }

    pub fn favorite_ids(&self) -> &[FavoriteCharacter] {
        &self.state.favorite_ids
    }

    pub fn hydrated_characters(&self) -> &[CharacterRecord] {
        &self.state.hydrated_characters
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn has_error(&self) -> bool {
        self.state.has_error
    }

    pub fn error_message(&self) -> &str {
        &self.state.error_message
    }

    pub fn hydration_warning(&self) -> Option<&str> {
        self.state.hydration_warning.as_deref()
    }

    /// Clear the error flag, message, and hydration warning once the UI has shown them
    pub fn dismiss_error(&mut self) {
        self.state.has_error = false;
        self.state.error_message.clear();
        self.state.hydration_warning = None;
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Mark a character as favorite.
    ///
    /// The id is appended locally without a duplicate check, then persisted.
    /// The local list is reconciled with the store afterwards either way.
    #[tracing::instrument(skip(self))]
    pub async fn add_to_favorite(&mut self, character_id: i64) {
        let favorite = FavoriteCharacter::new(character_id);
        self.state.favorite_ids.push(favorite);

        let failed = match self.store.create(&favorite).await {
            Ok(()) => {
                tracing::info!("Added character {} to favorites", character_id);
                self.emit(
                    FavoritesEvent::new(FavoritesEventKind::FavoriteAdded)
                        .with_data(serde_json::json!({ "character_id": character_id })),
                );
                false
            }
            Err(e) => {
                self.fail(ADD_ERROR_MESSAGE, &e);
                true
            }
        };

        self.reconcile(failed).await;
    }

    /// Replace the local favorite list with the store's
    #[tracing::instrument(skip(self))]
    pub async fn refresh_favorite_ids(&mut self) {
        self.reconcile(false).await;
    }

    /// Resolve the favorite ids into full records from the catalog.
    ///
    /// All categories are queried concurrently and concatenated in configured
    /// order. A failed category never raises `has_error`; it is recorded in
    /// the report and in `hydration_warning`. Under
    /// [`HydrationPolicy::AllOrNothing`] any failure leaves the hydrated list
    /// as it was.
    ///
    /// `is_loading` is raised for the duration of the queries and announced
    /// with a [`FavoritesEventKind::HydrationStarted`] event.
    #[tracing::instrument(skip(self))]
    pub async fn refresh_hydrated_characters(&mut self) -> HydrationReport {
        self.state.is_loading = true;
        self.emit(
            FavoritesEvent::new(FavoritesEventKind::HydrationStarted).with_data(
                serde_json::json!({ "is_loading": true, "categories": &self.categories }),
            ),
        );

        let loading = LoadingFlag(&mut self.state.is_loading);
        let catalog = &self.catalog;
        let results = join_all(
            self.categories
                .iter()
                .map(move |category| catalog.query_category(category)),
        )
        .await;
        drop(loading);

        let mut outcomes = Vec::with_capacity(results.len());
        let mut records = Vec::new();
        for (category, result) in self.categories.iter().zip(results) {
            match result {
                Ok(loaded) => {
                    outcomes.push(CategoryOutcome::Loaded {
                        category: category.clone(),
                        count: loaded.len(),
                    });
                    records.extend(loaded);
                }
                Err(error) => {
                    tracing::warn!("Catalog query for '{}' failed: {}", category, error);
                    outcomes.push(CategoryOutcome::Failed {
                        category: category.clone(),
                        error,
                    });
                }
            }
        }

        let mut report = HydrationReport {
            outcomes,
            ..HydrationReport::default()
        };

        if report.is_complete() || self.policy == HydrationPolicy::BestEffort {
            self.state.hydrated_characters = filter_favorites(records, &self.state.favorite_ids);
            report.applied = true;
        }
        report.hydrated = self.state.hydrated_characters.len();
        self.state.hydration_warning = report.warning();

        if let Some(warning) = &self.state.hydration_warning {
            tracing::warn!("Hydration incomplete: {}", warning);
        }

        self.emit(
            FavoritesEvent::new(FavoritesEventKind::CharactersHydrated).with_data(
                serde_json::json!({
                    "is_loading": false,
                    "applied": report.applied,
                    "hydrated": report.hydrated,
                    "failed_categories": report.failures().map(|o| o.category()).collect::<Vec<_>>(),
                }),
            ),
        );

        report
    }

    /// Whether a character is in the local favorite list
    pub fn is_favorite(&self, character_id: i64) -> bool {
        self.state
            .favorite_ids
            .iter()
            .any(|f| f.character_id == character_id)
    }

    /// Remove a character from favorites.
    ///
    /// Local lists are pruned first, then the store is asked to delete, then
    /// the local list is reconciled. Returns whether the store delete
    /// succeeded.
    #[tracing::instrument(skip(self))]
    pub async fn remove_from_favorites(&mut self, character_id: i64) -> bool {
        self.state
            .hydrated_characters
            .retain(|c| c.id != character_id);
        self.state
            .favorite_ids
            .retain(|f| f.character_id != character_id);

        let removed = match self.store.delete(character_id).await {
            Ok(()) => {
                tracing::info!("Removed character {} from favorites", character_id);
                self.emit(
                    FavoritesEvent::new(FavoritesEventKind::FavoriteRemoved)
                        .with_data(serde_json::json!({ "character_id": character_id })),
                );
                true
            }
            Err(e) => {
                self.fail(REMOVE_ERROR_MESSAGE, &e);
                false
            }
        };

        self.reconcile(!removed).await;
        removed
    }

    // =========================================================================
    // Internals
    // =========================================================================

    /// Re-read the canonical favorite list from the store.
    ///
    /// Hydrated records whose id left the list are dropped with it. When the
    /// preceding mutation already failed, a list failure is only logged so
    /// the mutation's message stays visible.
    async fn reconcile(&mut self, mutation_failed: bool) {
        match self.store.list().await {
            Ok(favorites) => {
                tracing::debug!("Loaded {} favorites from store", favorites.len());
                self.state.favorite_ids = favorites;
                let hydrated = std::mem::take(&mut self.state.hydrated_characters);
                self.state.hydrated_characters =
                    filter_favorites(hydrated, &self.state.favorite_ids);
                self.emit(
                    FavoritesEvent::new(FavoritesEventKind::FavoritesRefreshed).with_data(
                        serde_json::json!({
                            "count": self.state.favorite_ids.len(),
                            "hydrated": self.state.hydrated_characters.len(),
                        }),
                    ),
                );
            }
            Err(e) if mutation_failed => {
                tracing::warn!("Reconciliation after failed store call also failed: {}", e);
            }
            Err(e) => self.fail(LIST_ERROR_MESSAGE, &e),
        }
    }

    /// Raise the error flag with a user-facing message
    fn fail(&mut self, message: &str, error: &PersistenceError) {
        tracing::warn!("{}: {}", message, error);
        self.state.has_error = true;
        self.state.error_message = message.to_string();
        self.emit(
            FavoritesEvent::new(FavoritesEventKind::OperationFailed).with_data(
                serde_json::json!({ "message": message, "error": error.to_string() }),
            ),
        );
    }

    /// Emit an event without waiting on the receiver
    fn emit(&self, event: FavoritesEvent) {
        if let Some(tx) = &self.event_tx {
            if let Err(mpsc::error::TrySendError::Full(event)) = tx.try_send(event) {
                tracing::warn!("Event channel full, dropping {:?} event", event.kind);
            }
        }
    }
}

/// Lowers `is_loading` when hydration settles or its future is dropped
struct LoadingFlag<'a>(&'a mut bool);

impl Drop for LoadingFlag<'_> {
    fn drop(&mut self) {
        *self.0 = false;
    }
}
