//! Users that issues can be assigned to.

use super::UserId;
use serde::{Deserialize, Serialize};

/// A user known to the tracker.
///
/// Users are seeded when the store is built and never change afterwards, so
/// an issue holding a `User` value always reflects the current assignee.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct User {
    id: UserId,
    name: String,
}

impl User {
    /// Creates a user with the given identifier and display name.
    #[must_use]
    pub fn new(id: UserId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }

    /// Returns the user identifier.
    #[must_use]
    pub const fn id(&self) -> UserId {
        self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}
