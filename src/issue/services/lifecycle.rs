//! Service layer enforcing the issue creation and update rules.

use crate::issue::{
    domain::{
        AssigneeUpdate, Issue, IssueDomainError, IssueDraft, IssueId, IssueStatus, IssueUpdate,
        UserId,
    },
    ports::{IssueStore, IssueStoreError, UserDirectory},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

/// Request payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateIssueRequest {
    title: String,
    description: String,
    user_id: Option<UserId>,
}

impl CreateIssueRequest {
    /// Creates a request for an unassigned issue with an empty description.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            user_id: None,
        }
    }

    /// Sets the issue description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Assigns the new issue to a user.
    #[must_use]
    pub const fn with_user(mut self, user_id: UserId) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// Assignee change requested by an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssigneeChange {
    /// Clear the assignee and send the issue back to pending.
    Unassign,
    /// Assign the issue to the given user.
    Assign(UserId),
}

/// Request payload for a partial issue update.
///
/// Fields that are not set are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpdateIssueRequest {
    title: Option<String>,
    description: Option<String>,
    status: Option<IssueStatus>,
    assignee: Option<AssigneeChange>,
}

impl UpdateIssueRequest {
    /// Creates a request that changes nothing.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Replaces the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Requests an explicit status.
    #[must_use]
    pub const fn with_status(mut self, status: IssueStatus) -> Self {
        self.status = Some(status);
        self
    }

    /// Requests an assignee change.
    #[must_use]
    pub const fn with_assignee(mut self, change: AssigneeChange) -> Self {
        self.assignee = Some(change);
        self
    }
}

/// Coarse classification of lifecycle errors, used by callers to pick a
/// response category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueErrorKind {
    /// The request was malformed or violates a creation or status rule.
    Validation,
    /// The referenced issue or user does not exist.
    NotFound,
    /// The issue is in a terminal state.
    InvalidState,
    /// The store failed.
    Internal,
}

/// Service-level errors for issue lifecycle operations.
#[derive(Debug, Error)]
pub enum IssueLifecycleError {
    /// A lifecycle rule rejected the request.
    #[error(transparent)]
    Domain(#[from] IssueDomainError),
    /// Store operation failed.
    #[error(transparent)]
    Store(IssueStoreError),
    /// No issue exists with the given identifier.
    #[error("issue not found")]
    IssueNotFound(IssueId),
    /// No user exists with the given identifier.
    #[error("user not found")]
    UserNotFound(UserId),
}

impl IssueLifecycleError {
    /// Returns the error category.
    #[must_use]
    pub const fn kind(&self) -> IssueErrorKind {
        match self {
            Self::Domain(IssueDomainError::TerminalIssue { .. }) => IssueErrorKind::InvalidState,
            Self::Domain(_) => IssueErrorKind::Validation,
            Self::IssueNotFound(_) | Self::UserNotFound(_) => IssueErrorKind::NotFound,
            Self::Store(_) => IssueErrorKind::Internal,
        }
    }
}

impl From<IssueStoreError> for IssueLifecycleError {
    fn from(err: IssueStoreError) -> Self {
        match err {
            IssueStoreError::NotFound(id) => Self::IssueNotFound(id),
            other @ IssueStoreError::Persistence(_) => Self::Store(other),
        }
    }
}

/// Result type for issue lifecycle service operations.
pub type IssueLifecycleResult<T> = Result<T, IssueLifecycleError>;

/// Issue lifecycle orchestration service.
#[derive(Clone)]
pub struct IssueLifecycleService<S, C>
where
    S: IssueStore,
    C: Clock + Send + Sync,
{
    store: Arc<S>,
    clock: Arc<C>,
}

impl<S, C> IssueLifecycleService<S, C>
where
    S: IssueStore,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new issue lifecycle service.
    #[must_use]
    pub const fn new(store: Arc<S>, clock: Arc<C>) -> Self {
        Self { store, clock }
    }

    /// Creates an issue, assigned to `user_id` when one is given.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] for an empty title,
    /// [`IssueLifecycleError::UserNotFound`] for an unknown user, or a store
    /// error. Nothing is stored when an error is returned.
    #[instrument(
        name = "issue.service.create",
        skip(self, request),
        fields(user_id = tracing::field::Empty)
    )]
    pub async fn create_issue(&self, request: CreateIssueRequest) -> IssueLifecycleResult<Issue> {
        let CreateIssueRequest {
            title,
            description,
            user_id,
        } = request;

        // Checked before the user lookup so an empty title always wins.
        if title.is_empty() {
            debug!("rejecting issue with empty title");
            return Err(IssueDomainError::EmptyTitle.into());
        }

        let assignee = match user_id {
            Some(id) => {
                tracing::Span::current().record("user_id", id.value());
                let user = self
                    .store
                    .find_user(id)
                    .await?
                    .ok_or(IssueLifecycleError::UserNotFound(id))?;
                Some(user)
            }
            None => None,
        };

        let draft = IssueDraft::new(title, description, assignee, &*self.clock)?;
        let issue = self.store.create_issue(draft).await?;
        info!(issue_id = %issue.id(), status = %issue.status(), "issue created");
        Ok(issue)
    }

    /// Applies a partial update to an existing issue.
    ///
    /// The whole read-check-write sequence runs inside the store's exclusive
    /// section, so concurrent updates of the same issue are serialized and
    /// each one validates against the latest state.
    ///
    /// # Errors
    ///
    /// Returns [`IssueLifecycleError::IssueNotFound`] for an unknown issue,
    /// [`IssueDomainError::TerminalIssue`] when the issue is completed or
    /// cancelled, [`IssueLifecycleError::UserNotFound`] for an unknown
    /// assignee, [`IssueDomainError::StatusRequiresAssignee`] when the status
    /// needs an assignee, or a store error. The stored issue is unchanged
    /// when an error is returned.
    #[instrument(name = "issue.service.update", skip(self, request), fields(issue_id = %id))]
    pub async fn update_issue(
        &self,
        id: IssueId,
        request: UpdateIssueRequest,
    ) -> IssueLifecycleResult<Issue> {
        let clock = Arc::clone(&self.clock);
        let result = self
            .store
            .modify_issue(id, move |issue, users| {
                apply_request(issue, users, request, &*clock)
            })
            .await;

        match &result {
            Ok(issue) => info!(status = %issue.status(), "issue updated"),
            Err(err) => warn!(error = %err, "issue update rejected"),
        }
        result
    }

    /// Lists issues, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns store errors.
    #[instrument(name = "issue.service.list", skip(self))]
    pub async fn list_issues(
        &self,
        status: Option<IssueStatus>,
    ) -> IssueLifecycleResult<Vec<Issue>> {
        let issues = self.store.list_issues(status).await?;
        debug!(count = issues.len(), "issues listed");
        Ok(issues)
    }

    /// Retrieves an issue by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`IssueLifecycleError::IssueNotFound`] when the issue does not
    /// exist, or a store error.
    #[instrument(name = "issue.service.get", skip(self), fields(issue_id = %id))]
    pub async fn get_issue(&self, id: IssueId) -> IssueLifecycleResult<Issue> {
        self.store
            .find_issue(id)
            .await?
            .ok_or(IssueLifecycleError::IssueNotFound(id))
    }
}

/// Validates and applies an update request against the current issue.
///
/// The terminal-state check runs before the assignee is resolved, so a
/// completed issue reports its state even when the request names an unknown
/// user.
fn apply_request(
    issue: &mut Issue,
    users: &dyn UserDirectory,
    request: UpdateIssueRequest,
    clock: &impl Clock,
) -> IssueLifecycleResult<()> {
    issue.ensure_mutable()?;

    let UpdateIssueRequest {
        title,
        description,
        status,
        assignee: assignee_change,
    } = request;

    let assignee = match assignee_change {
        None => None,
        Some(AssigneeChange::Unassign) => Some(AssigneeUpdate::Unassign),
        Some(AssigneeChange::Assign(user_id)) => {
            let user = users
                .find_user(user_id)
                .ok_or(IssueLifecycleError::UserNotFound(user_id))?;
            Some(AssigneeUpdate::Assign(user))
        }
    };

    issue.apply_update(
        IssueUpdate {
            title,
            description,
            status,
            assignee,
        },
        clock,
    )?;
    Ok(())
}
