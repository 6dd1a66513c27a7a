//! Error types for issue domain validation and parsing.

use super::{IssueId, IssueStatus};
use thiserror::Error;

/// Errors returned when an issue lifecycle rule is violated.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IssueDomainError {
    /// The issue title is empty.
    #[error("title is required")]
    EmptyTitle,

    /// The requested status needs an assignee and the issue has none.
    #[error("cannot set status without assignee")]
    StatusRequiresAssignee(IssueStatus),

    /// The issue is completed or cancelled and accepts no further changes.
    #[error("cannot update completed or cancelled issue")]
    TerminalIssue {
        /// Identifier of the rejected issue.
        id: IssueId,
        /// Terminal status the issue is in.
        status: IssueStatus,
    },
}

/// Error returned while parsing an issue status from text.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown issue status: {0}")]
pub struct ParseIssueStatusError(pub String);
