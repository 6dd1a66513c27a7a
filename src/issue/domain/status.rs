//! Issue lifecycle status.

use super::ParseIssueStatusError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lifecycle status of an issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueStatus {
    /// Issue is waiting to be picked up.
    Pending,
    /// Issue is being worked on by its assignee.
    InProgress,
    /// Issue has been finished.
    Completed,
    /// Issue has been dropped.
    Cancelled,
}

impl IssueStatus {
    /// Every status, in lifecycle order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::InProgress,
        Self::Completed,
        Self::Cancelled,
    ];

    /// Returns the canonical wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns `true` when no further updates are accepted.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Cancelled)
    }

    /// Returns `true` when an issue in this status must have an assignee.
    #[must_use]
    pub const fn requires_assignee(self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

impl fmt::Display for IssueStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for IssueStatus {
    type Error = ParseIssueStatusError;

    /// Accepts the exact wire names only.
    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "PENDING" => Ok(Self::Pending),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "COMPLETED" => Ok(Self::Completed),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(ParseIssueStatusError(value.to_owned())),
        }
    }
}
