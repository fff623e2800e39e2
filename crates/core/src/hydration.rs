//! # Hydration
//!
//! Resolving bare favorite ids into full character records. Each catalog
//! category is queried independently; the per-category outcomes are kept
//! in a [`HydrationReport`] so a failed category is visible to the caller
//! instead of silently discarded.

use std::collections::HashSet;

use crate::error::CatalogError;
use crate::models::{CharacterRecord, FavoriteCharacter};

/// Result of querying one catalog category
#[derive(Debug)]
pub enum CategoryOutcome {
    Loaded { category: String, count: usize },
    Failed { category: String, error: CatalogError },
}

impl CategoryOutcome {
    pub fn category(&self) -> &str {
        match self {
            CategoryOutcome::Loaded { category, .. } | CategoryOutcome::Failed { category, .. } => {
                category
            }
        }
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, CategoryOutcome::Failed { .. })
    }
}

/// Summary of one hydration pass
#[derive(Debug, Default)]
pub struct HydrationReport {
    /// One entry per category, in query order
    pub outcomes: Vec<CategoryOutcome>,
    /// Whether the hydrated list was replaced
    pub applied: bool,
    /// Number of hydrated records after the pass
    pub hydrated: usize,
}

impl HydrationReport {
    pub fn failures(&self) -> impl Iterator<Item = &CategoryOutcome> {
        self.outcomes.iter().filter(|o| o.is_failed())
    }

    /// True when every category loaded
    pub fn is_complete(&self) -> bool {
        self.failures().next().is_none()
    }

    /// Aggregate warning naming the failed categories, if any
    pub fn warning(&self) -> Option<String> {
        let failed: Vec<&str> = self.failures().map(|o| o.category()).collect();
        if failed.is_empty() {
            return None;
        }
        Some(format!(
            "No se pudieron cargar {} de {} categorías: {}",
            failed.len(),
            self.outcomes.len(),
            failed.join(", ")
        ))
    }
}

/// Keep the catalog records whose id is a favorite, in catalog order
pub fn filter_favorites<I>(records: I, favorites: &[FavoriteCharacter]) -> Vec<CharacterRecord>
where
    I: IntoIterator<Item = CharacterRecord>,
{
    let favorite_ids: HashSet<i64> = favorites.iter().map(|f| f.character_id).collect();
    records
        .into_iter()
        .filter(|record| favorite_ids.contains(&record.id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_catalog_order() {
        let records = vec![
            CharacterRecord::new(5, "Vegeta"),
            CharacterRecord::new(2, "Krillin"),
            CharacterRecord::new(1, "Goku"),
        ];
        let favorites = vec![FavoriteCharacter::new(1), FavoriteCharacter::new(5)];

        let ids: Vec<i64> = filter_favorites(records, &favorites)
            .iter()
            .map(|r| r.id)
            .collect();
        assert_eq!(ids, vec![5, 1]);
    }

    #[test]
    fn test_filter_drops_unknown_favorites() {
        let records = vec![CharacterRecord::new(1, "Goku")];
        let favorites = vec![FavoriteCharacter::new(1), FavoriteCharacter::new(999)];

        assert_eq!(filter_favorites(records, &favorites).len(), 1);
    }

    #[test]
    fn test_report_warning() {
        let report = HydrationReport {
            outcomes: vec![
                CategoryOutcome::Loaded {
                    category: "dragonball".to_string(),
                    count: 3,
                },
                CategoryOutcome::Failed {
                    category: "dragons".to_string(),
                    error: CatalogError::Status {
                        category: "dragons".to_string(),
                        status: 500,
                    },
                },
            ],
            applied: false,
            hydrated: 0,
        };

        assert!(!report.is_complete());
        let warning = report.warning().unwrap();
        assert!(warning.contains("1 de 2"));
        assert!(warning.contains("dragons"));

        assert!(HydrationReport::default().warning().is_none());
    }
}
