//! Thread-safe in-memory store for users and issues.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::issue::{
    domain::{Issue, IssueDraft, IssueId, IssueStatus, User, UserId},
    ports::{IssueStore, IssueStoreError, IssueStoreResult, UserDirectory},
};

/// Users every store is seeded with unless a custom roster is supplied.
#[must_use]
pub fn seed_users() -> Vec<User> {
    vec![
        User::new(UserId::new(1), "김개발"),
        User::new(UserId::new(2), "이디자인"),
        User::new(UserId::new(3), "박기획"),
    ]
}

/// Thread-safe in-memory issue store.
///
/// A single lock guards the users, the issues, and the identifier counter.
/// Readers share the lock; creates and updates hold it exclusively.
#[derive(Debug, Clone)]
pub struct InMemoryIssueStore {
    state: Arc<RwLock<InMemoryIssueState>>,
}

#[derive(Debug)]
struct InMemoryIssueState {
    users: UserRoster,
    issues: HashMap<IssueId, Issue>,
    next_id: u64,
}

#[derive(Debug)]
struct UserRoster(HashMap<UserId, User>);

impl UserDirectory for UserRoster {
    fn find_user(&self, id: UserId) -> Option<User> {
        self.0.get(&id).cloned()
    }
}

impl InMemoryIssueStore {
    /// Creates a store seeded with the default users.
    #[must_use]
    pub fn new() -> Self {
        Self::with_users(seed_users())
    }

    /// Creates a store seeded with the given users.
    #[must_use]
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let roster = users.into_iter().map(|user| (user.id(), user)).collect();
        Self {
            state: Arc::new(RwLock::new(InMemoryIssueState {
                users: UserRoster(roster),
                issues: HashMap::new(),
                next_id: 1,
            })),
        }
    }

    fn read_state(&self) -> IssueStoreResult<RwLockReadGuard<'_, InMemoryIssueState>> {
        self.state.read().map_err(|err| {
            IssueStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }

    fn write_state(&self) -> IssueStoreResult<RwLockWriteGuard<'_, InMemoryIssueState>> {
        self.state.write().map_err(|err| {
            IssueStoreError::persistence(std::io::Error::other(err.to_string()))
        })
    }
}

impl Default for InMemoryIssueStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IssueStore for InMemoryIssueStore {
    async fn find_user(&self, id: UserId) -> IssueStoreResult<Option<User>> {
        let state = self.read_state()?;
        Ok(state.users.find_user(id))
    }

    async fn list_issues(&self, status: Option<IssueStatus>) -> IssueStoreResult<Vec<Issue>> {
        let state = self.read_state()?;
        let mut issues: Vec<Issue> = state
            .issues
            .values()
            .filter(|issue| status.is_none_or(|wanted| issue.status() == wanted))
            .cloned()
            .collect();
        issues.sort_by_key(Issue::id);
        Ok(issues)
    }

    async fn find_issue(&self, id: IssueId) -> IssueStoreResult<Option<Issue>> {
        let state = self.read_state()?;
        Ok(state.issues.get(&id).cloned())
    }

    async fn create_issue(&self, draft: IssueDraft) -> IssueStoreResult<Issue> {
        let mut state = self.write_state()?;
        let id = IssueId::new(state.next_id);
        state.next_id += 1;

        let issue = draft.into_issue(id);
        state.issues.insert(id, issue.clone());
        Ok(issue)
    }

    async fn update_issue(&self, issue: &Issue) -> IssueStoreResult<()> {
        let mut state = self.write_state()?;
        let stored = state
            .issues
            .get_mut(&issue.id())
            .ok_or(IssueStoreError::NotFound(issue.id()))?;
        *stored = issue.clone();
        Ok(())
    }

    async fn modify_issue<F, E>(&self, id: IssueId, mutation: F) -> Result<Issue, E>
    where
        F: FnOnce(&mut Issue, &dyn UserDirectory) -> Result<(), E> + Send,
        E: From<IssueStoreError> + Send,
    {
        let mut state = self.write_state()?;
        let mut working = state
            .issues
            .get(&id)
            .cloned()
            .ok_or(IssueStoreError::NotFound(id))?;

        mutation(&mut working, &state.users)?;

        state.issues.insert(id, working.clone());
        Ok(working)
    }
}
