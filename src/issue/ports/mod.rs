//! Port contracts for issue storage.
//!
//! Ports define infrastructure-agnostic interfaces used by issue services.

pub mod repository;

pub use repository::{IssueStore, IssueStoreError, IssueStoreResult, UserDirectory};
