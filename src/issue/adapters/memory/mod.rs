//! In-memory adapters for issue storage.

mod store;

pub use store::{InMemoryIssueStore, seed_users};
