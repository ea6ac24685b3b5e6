use counterdesk_models::StatusTransition;
use validator::ValidationErrors;

use super::store::StoreError;

/// Error type for list controller operations.
#[derive(Debug, thiserror::Error)]
pub enum ListError {
    #[error("Invalid list options: {0}")]
    InvalidOptions(#[from] ValidationErrors),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No status change is pending")]
    NoPendingStatus,

    #[error("No rows are selected")]
    EmptySelection,

    #[error("Status {status} is not offered in the {condition:?} view")]
    NotOffered {
        status: StatusTransition,
        condition: String,
    },
}
