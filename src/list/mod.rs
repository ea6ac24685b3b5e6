//! List screens: state, controller and the store they query.
//!
//! - [`controller`]: [`ListQueryController`], the per-screen state machine
//! - [`state`]: [`ListQueryState`] and [`FetchOutcome`]
//! - [`store`]: the [`CollectionStore`] seam and [`StoreError`]
//! - [`http`]: [`HttpCollectionStore`], the reqwest adapter
//! - [`bulk`]: [`BulkActionPolicy`] for bulk status transitions
//! - [`notify`]: [`Notice`]s and where they go

pub mod bulk;
pub mod controller;
pub mod error;
pub mod http;
#[cfg(any(test, feature = "test-utils"))]
pub mod memory;
pub mod notify;
pub mod state;
pub mod store;

pub use bulk::BulkActionPolicy;
pub use controller::ListQueryController;
pub use error::ListError;
pub use http::HttpCollectionStore;
#[cfg(any(test, feature = "test-utils"))]
pub use memory::InMemoryStore;
#[cfg(any(test, feature = "test-utils"))]
pub use notify::RecordingNotifier;
pub use notify::{Notice, NoticeLevel, Notifier, TracingNotifier};
pub use state::{FetchOutcome, ListQueryState, RequestTicket};
pub use store::{CollectionStore, StoreError};
