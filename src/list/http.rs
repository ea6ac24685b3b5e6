//! HTTP adapter for the collection store.
//!
//! Lists with `GET <list_url>?schema=..&condition=..&select=..&sort=..&page=..&limit=..&joinForeignKeys=..`
//! and applies status changes with `POST <status_url>` and a JSON body.

use reqwest::{Client, Response};
use tracing::{debug, instrument, warn};

use counterdesk_config::StoreConfig;
use counterdesk_models::{ListPage, ListQuery, StatusChange, StatusChangeResponse};

use super::store::{CollectionStore, StoreError};

#[derive(Debug, Clone)]
pub struct HttpCollectionStore {
    client: Client,
    list_url: String,
    status_url: String,
}

impl HttpCollectionStore {
    /// Builds a client with the configured timeout.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Transport` if the TLS backend cannot be initialised.
    pub fn new(config: &StoreConfig) -> Result<Self, StoreError> {
        let client = Client::builder().timeout(config.timeout()).build()?;
        Ok(Self::with_client(client, config))
    }

    pub fn with_client(client: Client, config: &StoreConfig) -> Self {
        Self {
            client,
            list_url: config.list_url(),
            status_url: config.status_url(),
        }
    }
}

impl CollectionStore for HttpCollectionStore {
    #[instrument(skip(self, query), fields(store.schema = %query.schema, store.page = query.page))]
    async fn list(&self, query: &ListQuery) -> Result<ListPage, StoreError> {
        let pairs = query.to_query_pairs()?;
        let response = self.client.get(&self.list_url).query(&pairs).send().await?;
        let body = ensure_success(response).await?.text().await?;
        let page: ListPage = serde_json::from_str(&body)?;

        debug!(rows = page.data.len(), total = page.total, "List page received");
        Ok(page)
    }

    #[instrument(skip(self, change), fields(store.schema = %change.schema, store.status = %change.status))]
    async fn update_status(&self, change: &StatusChange) -> Result<StatusChangeResponse, StoreError> {
        let response = self.client.post(&self.status_url).json(change).send().await?;
        let body = ensure_success(response).await?.text().await?;
        let result: StatusChangeResponse = serde_json::from_str(&body)?;

        debug!(success = result.success, "Status change answered");
        Ok(result)
    }
}

async fn ensure_success(response: Response) -> Result<Response, StoreError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    warn!(status = %status, message = %message, "Store request failed");
    Err(StoreError::Status {
        status: status.as_u16(),
        message,
    })
}
