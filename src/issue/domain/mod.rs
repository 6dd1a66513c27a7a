//! Domain model for the issue lifecycle.
//!
//! Issues move through a small status lifecycle and may be assigned to one of
//! the seeded users. All lifecycle rules live on the [`Issue`] aggregate so
//! that adapters and services never have to re-implement them.

mod error;
mod ids;
mod issue;
mod status;
mod user;

pub use error::{IssueDomainError, ParseIssueStatusError};
pub use ids::{IssueId, UserId};
pub use issue::{AssigneeUpdate, Issue, IssueDraft, IssueUpdate};
pub use status::IssueStatus;
pub use user::User;
