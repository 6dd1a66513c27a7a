//! Issue aggregate root and the rules governing its lifecycle.

use super::{IssueDomainError, IssueId, IssueStatus, User};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A validated issue that has not yet been given an identifier.
///
/// The store turns a draft into an [`Issue`] by assigning the next id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssueDraft {
    title: String,
    description: String,
    status: IssueStatus,
    assignee: Option<User>,
    created_at: DateTime<Utc>,
}

impl IssueDraft {
    /// Builds a draft for a new issue.
    ///
    /// An assigned issue starts [`IssueStatus::InProgress`]; an unassigned one
    /// starts [`IssueStatus::Pending`].
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::EmptyTitle`] when `title` is empty.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        assignee: Option<User>,
        clock: &impl Clock,
    ) -> Result<Self, IssueDomainError> {
        let title = title.into();
        if title.is_empty() {
            return Err(IssueDomainError::EmptyTitle);
        }

        let status = if assignee.is_some() {
            IssueStatus::InProgress
        } else {
            IssueStatus::Pending
        };

        Ok(Self {
            title,
            description: description.into(),
            status,
            assignee,
            created_at: clock.utc(),
        })
    }

    /// Returns the initial status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the initial assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Completes the draft with a store-assigned identifier.
    #[must_use]
    pub fn into_issue(self, id: IssueId) -> Issue {
        Issue {
            id,
            title: self.title,
            description: self.description,
            status: self.status,
            assignee: self.assignee,
            created_at: self.created_at,
            updated_at: self.created_at,
        }
    }
}

/// Change to an issue's assignee requested by an update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssigneeUpdate {
    /// Remove the current assignee.
    Unassign,
    /// Hand the issue to the given user.
    Assign(User),
}

/// Partial update applied to an existing issue.
///
/// `None` fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IssueUpdate {
    /// Replacement title.
    pub title: Option<String>,
    /// Replacement description.
    pub description: Option<String>,
    /// Explicitly requested status.
    pub status: Option<IssueStatus>,
    /// Assignee change.
    pub assignee: Option<AssigneeUpdate>,
}

/// Issue aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    id: IssueId,
    title: String,
    description: String,
    status: IssueStatus,
    assignee: Option<User>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Issue {
    /// Returns the issue identifier.
    #[must_use]
    pub const fn id(&self) -> IssueId {
        self.id
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description, which may be empty.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the lifecycle status.
    #[must_use]
    pub const fn status(&self) -> IssueStatus {
        self.status
    }

    /// Returns the current assignee, if any.
    #[must_use]
    pub const fn assignee(&self) -> Option<&User> {
        self.assignee.as_ref()
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the timestamp of the latest successful mutation.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Checks that the issue still accepts updates.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::TerminalIssue`] when the issue is
    /// completed or cancelled.
    pub const fn ensure_mutable(&self) -> Result<(), IssueDomainError> {
        if self.status.is_terminal() {
            return Err(IssueDomainError::TerminalIssue {
                id: self.id,
                status: self.status,
            });
        }
        Ok(())
    }

    /// Applies a partial update.
    ///
    /// The assignee change is applied first. Unassigning resets the status to
    /// [`IssueStatus::Pending`]; assigning a pending issue without an explicit
    /// status promotes it to [`IssueStatus::InProgress`]. An explicit status
    /// then overrides whatever the assignee change produced, provided the
    /// issue has an assignee when the status demands one. Title and
    /// description are replaced verbatim.
    ///
    /// The issue is left untouched when an error is returned.
    ///
    /// # Errors
    ///
    /// Returns [`IssueDomainError::TerminalIssue`] for completed or cancelled
    /// issues and [`IssueDomainError::StatusRequiresAssignee`] when the
    /// requested status needs an assignee the issue does not have.
    pub fn apply_update(
        &mut self,
        update: IssueUpdate,
        clock: &impl Clock,
    ) -> Result<(), IssueDomainError> {
        self.ensure_mutable()?;

        let IssueUpdate {
            title,
            description,
            status,
            assignee,
        } = update;

        let mut next_assignee = self.assignee.clone();
        let mut next_status = self.status;
        match assignee {
            None => {}
            Some(AssigneeUpdate::Unassign) => {
                next_assignee = None;
                next_status = IssueStatus::Pending;
            }
            Some(AssigneeUpdate::Assign(user)) => {
                next_assignee = Some(user);
                if status.is_none() && self.status == IssueStatus::Pending {
                    next_status = IssueStatus::InProgress;
                }
            }
        }

        if let Some(requested) = status {
            if next_assignee.is_none() && requested.requires_assignee() {
                return Err(IssueDomainError::StatusRequiresAssignee(requested));
            }
            next_status = requested;
        }

        self.assignee = next_assignee;
        self.status = next_status;
        if let Some(new_title) = title {
            self.title = new_title;
        }
        if let Some(new_description) = description {
            self.description = new_description;
        }
        self.touch(clock);
        Ok(())
    }

    /// Updates the `updated_at` timestamp to the current clock time.
    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
