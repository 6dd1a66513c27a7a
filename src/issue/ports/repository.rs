//! Store port for users and issues.

use crate::issue::domain::{Issue, IssueDraft, IssueId, IssueStatus, User, UserId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for issue store operations.
pub type IssueStoreResult<T> = Result<T, IssueStoreError>;

/// Read-only view of the users an issue may be assigned to.
pub trait UserDirectory {
    /// Looks up a user by identifier.
    fn find_user(&self, id: UserId) -> Option<User>;
}

/// Issue and user storage contract.
///
/// The store owns identifier assignment. It knows nothing about lifecycle
/// rules; those are applied by callers through [`IssueStore::modify_issue`].
#[async_trait]
pub trait IssueStore: Send + Sync {
    /// Finds a seeded user.
    ///
    /// Returns `None` when no user has the identifier.
    async fn find_user(&self, id: UserId) -> IssueStoreResult<Option<User>>;

    /// Lists issues ordered by identifier, optionally keeping only those with
    /// the given status.
    async fn list_issues(&self, status: Option<IssueStatus>) -> IssueStoreResult<Vec<Issue>>;

    /// Finds an issue by identifier.
    ///
    /// Returns `None` when the issue does not exist.
    async fn find_issue(&self, id: IssueId) -> IssueStoreResult<Option<Issue>>;

    /// Assigns the next identifier to `draft` and stores the result.
    ///
    /// Identifier assignment and insertion happen atomically, so concurrent
    /// callers never receive the same identifier.
    async fn create_issue(&self, draft: IssueDraft) -> IssueStoreResult<Issue>;

    /// Replaces the stored issue that has the same identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IssueStoreError::NotFound`] when the issue does not exist.
    async fn update_issue(&self, issue: &Issue) -> IssueStoreResult<()>;

    /// Runs `mutation` against the stored issue inside a single exclusive
    /// section and persists the result.
    ///
    /// The mutation sees a working copy of the issue together with the user
    /// directory. Nothing is written when it returns an error, so a rejected
    /// mutation leaves the stored issue unchanged.
    ///
    /// # Errors
    ///
    /// Returns the mutation's error, or [`IssueStoreError::NotFound`]
    /// converted into `E` when the issue does not exist.
    async fn modify_issue<F, E>(&self, id: IssueId, mutation: F) -> Result<Issue, E>
    where
        F: FnOnce(&mut Issue, &dyn UserDirectory) -> Result<(), E> + Send,
        E: From<IssueStoreError> + Send;
}

/// Errors returned by issue store implementations.
#[derive(Debug, Clone, Error)]
pub enum IssueStoreError {
    /// The issue was not found.
    #[error("issue not found: {0}")]
    NotFound(IssueId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl IssueStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
