//! Wire representations of issues and request bodies.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::issue::{
    domain::{Issue, IssueStatus, User, UserId},
    services::{AssigneeChange, CreateIssueRequest, UpdateIssueRequest},
};

/// Assignee as rendered inside an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserResponse {
    /// User identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().value(),
            name: user.name().to_owned(),
        }
    }
}

/// Issue as returned by every issue endpoint.
///
/// An empty description and a missing assignee are omitted from the JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IssueResponse {
    /// Issue identifier.
    pub id: u64,
    /// Title.
    pub title: String,
    /// Description, empty when none was given.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    /// Lifecycle status.
    pub status: IssueStatus,
    /// Current assignee.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
    /// Creation time.
    pub created_at: DateTime<Utc>,
    /// Time of the latest successful update.
    pub updated_at: DateTime<Utc>,
}

impl From<&Issue> for IssueResponse {
    fn from(issue: &Issue) -> Self {
        Self {
            id: issue.id().value(),
            title: issue.title().to_owned(),
            description: issue.description().to_owned(),
            status: issue.status(),
            user: issue.assignee().map(UserResponse::from),
            created_at: issue.created_at(),
            updated_at: issue.updated_at(),
        }
    }
}

/// Body of `GET /issues`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueListResponse {
    /// Matching issues ordered by identifier.
    pub issues: Vec<IssueResponse>,
}

impl IssueListResponse {
    /// Renders a list of issues.
    #[must_use]
    pub fn from_issues(issues: &[Issue]) -> Self {
        Self {
            issues: issues.iter().map(IssueResponse::from).collect(),
        }
    }
}

/// Body of `POST /issue`.
///
/// A missing title decodes as empty and is rejected by the service.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateIssueBody {
    /// Title of the new issue.
    #[serde(default)]
    pub title: String,
    /// Optional description.
    #[serde(default)]
    pub description: String,
    /// Optional assignee.
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl From<CreateIssueBody> for CreateIssueRequest {
    fn from(body: CreateIssueBody) -> Self {
        let mut request = Self::new(body.title).with_description(body.description);
        if let Some(raw) = body.user_id {
            request = request.with_user(UserId::new(raw));
        }
        request
    }
}

/// Body of `PATCH /issue/{id}`.
///
/// Absent fields are left unchanged. A `userId` of `0` unassigns the issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateIssueBody {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description.
    #[serde(default)]
    pub description: Option<String>,
    /// Requested status.
    #[serde(default)]
    pub status: Option<IssueStatus>,
    /// New assignee, or `0` to unassign.
    #[serde(default)]
    pub user_id: Option<u64>,
}

/// Wire value that clears the assignee.
const UNASSIGN_USER_ID: u64 = 0;

impl From<UpdateIssueBody> for UpdateIssueRequest {
    fn from(body: UpdateIssueBody) -> Self {
        let mut request = Self::new();
        if let Some(title) = body.title {
            request = request.with_title(title);
        }
        if let Some(description) = body.description {
            request = request.with_description(description);
        }
        if let Some(status) = body.status {
            request = request.with_status(status);
        }
        match body.user_id {
            None => request,
            Some(UNASSIGN_USER_ID) => request.with_assignee(AssigneeChange::Unassign),
            Some(raw) => request.with_assignee(AssigneeChange::Assign(UserId::new(raw))),
        }
    }
}
