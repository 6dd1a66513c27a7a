//! Application services for issue lifecycle orchestration.

mod lifecycle;

pub use lifecycle::{
    AssigneeChange, CreateIssueRequest, IssueErrorKind, IssueLifecycleError,
    IssueLifecycleResult, IssueLifecycleService, UpdateIssueRequest,
};
