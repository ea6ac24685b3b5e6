//! The collection store seam.
//!
//! A [`CollectionStore`] answers list queries and applies bulk status
//! changes. The controller never talks to a transport directly; it only
//! sees this trait.

use std::future::Future;
use std::sync::Arc;

use counterdesk_models::{ListPage, ListQuery, StatusChange, StatusChangeResponse};

/// Error type for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Store returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Serialization error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Store rejected the request: {0}")]
    Rejected(String),
}

/// Remote collection of records addressed by schema name.
pub trait CollectionStore: Send + Sync {
    /// Returns one page of records matching `query`.
    fn list(&self, query: &ListQuery) -> impl Future<Output = Result<ListPage, StoreError>> + Send;

    /// Applies a status transition to the given ids.
    ///
    /// A response with `success = false` is a normal return, not an error.
    fn update_status(
        &self,
        change: &StatusChange,
    ) -> impl Future<Output = Result<StatusChangeResponse, StoreError>> + Send;
}

impl<S: CollectionStore> CollectionStore for Arc<S> {
    fn list(&self, query: &ListQuery) -> impl Future<Output = Result<ListPage, StoreError>> + Send {
        (**self).list(query)
    }

    fn update_status(
        &self,
        change: &StatusChange,
    ) -> impl Future<Output = Result<StatusChangeResponse, StoreError>> + Send {
        (**self).update_status(change)
    }
}
