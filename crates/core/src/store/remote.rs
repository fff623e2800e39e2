//! # Remote Document Store
//!
//! Favorites kept in an HTTP document database, one document per favorite
//! inside a collection:
//!
//! ```text
//! PUT    {base}/collections/{collection}/documents/{id}   {"characterID": id}
//! GET    {base}/collections/{collection}/documents        {"documents": [...]}
//! DELETE {base}/collections/{collection}/documents/{id}
//! ```

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use super::FavoritesStore;
use crate::error::PersistenceError;
use crate::models::FavoriteCharacter;

#[derive(Debug, Deserialize)]
struct DocumentList {
    #[serde(default)]
    documents: Vec<FavoriteCharacter>,
}

/// HTTP client for the favorites collection of a document database
pub struct RemoteFavoritesStore {
    client: reqwest::Client,
    collection_url: String,
    auth_token: Option<String>,
}

impl RemoteFavoritesStore {
    pub fn new(
        base_url: &str,
        collection: &str,
        auth_token: Option<String>,
        timeout_secs: u64,
    ) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("favorites-core/0.1")
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            collection_url: format!(
                "{}/collections/{}/documents",
                base_url.trim_end_matches('/'),
                urlencoding::encode(collection)
            ),
            auth_token,
        })
    }

    fn document_url(&self, character_id: i64) -> String {
        format!("{}/{}", self.collection_url, character_id)
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn check(response: Response) -> Result<Response, PersistenceError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(PersistenceError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

#[async_trait]
impl FavoritesStore for RemoteFavoritesStore {
    async fn create(&self, favorite: &FavoriteCharacter) -> Result<(), PersistenceError> {
        let request = self
            .client
            .put(self.document_url(favorite.character_id))
            .json(favorite);
        let response = self.authorize(request).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<FavoriteCharacter>, PersistenceError> {
        let request = self.client.get(&self.collection_url);
        let response = Self::check(self.authorize(request).send().await?).await?;
        let bytes = response.bytes().await?;
        let list: DocumentList = serde_json::from_slice(&bytes)?;
        Ok(list.documents)
    }

    async fn delete(&self, character_id: i64) -> Result<(), PersistenceError> {
        let request = self.client.delete(self.document_url(character_id));
        let response = self.authorize(request).send().await?;

        // Deleting a missing document is not an error
        if response.status() == StatusCode::NOT_FOUND {
            tracing::debug!("Favorite {} already absent from remote store", character_id);
            return Ok(());
        }
        Self::check(response).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use wiremock::{
        matchers::{body_json, header, method, path},
        Mock, MockServer, ResponseTemplate,
    };

    use super::*;

    const TOKEN: &str = "test_token";

    async fn setup() -> (MockServer, RemoteFavoritesStore) {
        let server = MockServer::start().await;
        let store = RemoteFavoritesStore::new(
            &server.uri(),
            "favorite_characters",
            Some(TOKEN.to_string()),
            5,
        )
        .unwrap();
        (server, store)
    }

    #[tokio::test]
    async fn test_create_puts_document() {
        let (server, store) = setup().await;

        Mock::given(method("PUT"))
            .and(path("/collections/favorite_characters/documents/7"))
            .and(header("authorization", format!("Bearer {TOKEN}")))
            .and(body_json(serde_json::json!({ "characterID": 7 })))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        store.create(&FavoriteCharacter::new(7)).await.unwrap();
    }

    #[tokio::test]
    async fn test_list_decodes_documents() {
        let (server, store) = setup().await;

        Mock::given(method("GET"))
            .and(path("/collections/favorite_characters/documents"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "documents": [{ "characterID": 1 }, { "characterID": 5 }]
            })))
            .mount(&server)
            .await;

        let favorites = store.list().await.unwrap();
        assert_eq!(
            favorites,
            vec![FavoriteCharacter::new(1), FavoriteCharacter::new(5)]
        );
    }

    #[tokio::test]
    async fn test_delete_missing_document_succeeds() {
        let (server, store) = setup().await;

        Mock::given(method("DELETE"))
            .and(path("/collections/favorite_characters/documents/42"))
            .respond_with(ResponseTemplate::new(404))
            .expect(1)
            .mount(&server)
            .await;

        store.delete(42).await.unwrap();
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (server, store) = setup().await;

        Mock::given(method("PUT"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = store.create(&FavoriteCharacter::new(3)).await.unwrap_err();
        assert!(matches!(
            err,
            PersistenceError::Status { status: 500, ref body } if body == "boom"
        ));
    }
}
