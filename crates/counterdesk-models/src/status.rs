//! Bulk status transitions.
//!
//! List screens change the status of every selected row in one step: the
//! user picks a transition (which opens a confirmation dialog) and then
//! confirms it. [`StatusTransition::None`] means no dialog is pending.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Name of the view that lists soft-deleted records.
pub const DELETED_VIEW: &str = "deleted";

/// A status change that can be applied to a selection of records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusTransition {
    #[default]
    #[serde(rename = "")]
    None,
    Deleted,
    Restored,
    Canceled,
    Enabled,
    Disabled,
    Available,
    Completed,
}

impl StatusTransition {
    /// Every transition that changes something, in display order.
    pub const ACTIONS: &'static [StatusTransition] = &[
        StatusTransition::Deleted,
        StatusTransition::Restored,
        StatusTransition::Canceled,
        StatusTransition::Enabled,
        StatusTransition::Disabled,
        StatusTransition::Available,
        StatusTransition::Completed,
    ];

    pub const fn as_str(self) -> &'static str {
        match self {
            StatusTransition::None => "",
            StatusTransition::Deleted => "deleted",
            StatusTransition::Restored => "restored",
            StatusTransition::Canceled => "canceled",
            StatusTransition::Enabled => "enabled",
            StatusTransition::Disabled => "disabled",
            StatusTransition::Available => "available",
            StatusTransition::Completed => "completed",
        }
    }

    /// Whether a transition is waiting for confirmation.
    pub const fn is_pending(self) -> bool {
        !matches!(self, StatusTransition::None)
    }

    /// Whether affected rows leave the view they were selected from.
    ///
    /// Deleting, restoring and canceling move a record to another view;
    /// the other transitions only change its status field in place.
    pub const fn removes_rows(self) -> bool {
        matches!(
            self,
            StatusTransition::Deleted | StatusTransition::Restored | StatusTransition::Canceled
        )
    }

    /// The status value a record carries after the transition.
    pub const fn resulting_status(self) -> Option<&'static str> {
        match self {
            StatusTransition::None => None,
            StatusTransition::Deleted => Some("deleted"),
            StatusTransition::Restored => Some("active"),
            StatusTransition::Canceled => Some("canceled"),
            StatusTransition::Enabled => Some("enabled"),
            StatusTransition::Disabled => Some("disabled"),
            StatusTransition::Available => Some("available"),
            StatusTransition::Completed => Some("completed"),
        }
    }

    /// Whether the transition is offered while viewing `condition`.
    ///
    /// Restore only makes sense in the deleted view and delete never does.
    pub fn offered_in(self, condition: &str) -> bool {
        match self {
            StatusTransition::None => false,
            StatusTransition::Restored => condition == DELETED_VIEW,
            StatusTransition::Deleted => condition != DELETED_VIEW,
            _ => true,
        }
    }
}

impl fmt::Display for StatusTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for strings that do not name a status transition.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status transition: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for StatusTransition {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "" | "none" => Ok(StatusTransition::None),
            _ => StatusTransition::ACTIONS
                .iter()
                .copied()
                .find(|transition| transition.as_str() == s)
                .ok_or_else(|| UnknownStatus(s.to_string())),
        }
    }
}
