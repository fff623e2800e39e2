//! # Errors
//!
//! The two failure kinds the coordinator distinguishes: persistence
//! failures from the favorites store and catalog failures from the
//! character catalog.

/// A failure reported by a [`crate::store::FavoritesStore`].
#[derive(thiserror::Error, Debug)]
pub enum PersistenceError {
    /// SQLite error
    #[error(transparent)]
    Database(#[from] rusqlite::Error),

    /// Transport error talking to the remote document database
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The remote document database answered with a non-success status
    #[error("Document store returned {status}: {body}")]
    Status { status: u16, body: String },

    /// A document could not be encoded or decoded
    #[error(transparent)]
    Serde(#[from] serde_json::Error),

    /// An internal unspecified error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// A failure reported by a [`crate::catalog::CatalogService`].
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    /// Transport error talking to the catalog
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    /// The catalog answered with a non-success status
    #[error("Catalog returned {status} for category '{category}'")]
    Status { category: String, status: u16 },

    /// A catalog page could not be decoded
    #[error("Failed to decode catalog page for category '{category}': {source}")]
    Decode {
        category: String,
        #[source]
        source: serde_json::Error,
    },

    /// The catalog kept reporting more pages than we are willing to fetch
    #[error("Category '{category}' exceeded {max_pages} pages")]
    PageLimit { category: String, max_pages: u32 },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CatalogError::Status {
            category: "dragons".to_string(),
            status: 503,
        };
        assert_eq!(
            err.to_string(),
            "Catalog returned 503 for category 'dragons'"
        );

        let err = PersistenceError::Internal("lock poisoned".to_string());
        assert_eq!(err.to_string(), "Internal error: lock poisoned");
    }
}
