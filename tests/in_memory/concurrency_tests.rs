//! In-memory integration tests for concurrent issue operations.

use std::{collections::HashSet, sync::Arc};

use issue_tracker::issue::{
    adapters::memory::InMemoryIssueStore,
    domain::{IssueStatus, UserId},
    services::{
        AssigneeChange, CreateIssueRequest, IssueErrorKind, IssueLifecycleService,
        UpdateIssueRequest,
    },
};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type TestService = IssueLifecycleService<InMemoryIssueStore, DefaultClock>;

#[fixture]
fn service() -> Arc<TestService> {
    Arc::new(IssueLifecycleService::new(
        Arc::new(InMemoryIssueStore::new()),
        Arc::new(DefaultClock),
    ))
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn parallel_creates_have_no_gaps_or_duplicates(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    let mut tasks = tokio::task::JoinSet::new();
    for n in 0..100_u64 {
        let worker = Arc::clone(&service);
        tasks.spawn(async move {
            let unassigned = CreateIssueRequest::new(format!("issue {n}"));
            let request = if n < 50 {
                unassigned.with_user(UserId::new(1))
            } else {
                unassigned
            };
            worker.create_issue(request).await
        });
    }

    let mut ids = HashSet::new();
    while let Some(joined) = tasks.join_next().await {
        let issue = joined??;
        eyre::ensure!(ids.insert(issue.id().value()), "duplicate id {}", issue.id());
    }

    let expected: HashSet<u64> = (1..=100).collect();
    eyre::ensure!(ids == expected, "ids must be exactly 1..=100");

    let listed = service.list_issues(None).await?;
    eyre::ensure!(listed.len() == 100, "all issues should be listed");
    eyre::ensure!(
        listed.windows(2).all(|pair| match pair {
            [left, right] => left.id() < right.id(),
            _ => false,
        }),
        "list should be ordered by id"
    );
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn racing_unassign_and_complete_never_leave_completed_without_assignee(
    service: Arc<TestService>,
) -> Result<(), eyre::Report> {
    for _ in 0..20 {
        let issue = service
            .create_issue(CreateIssueRequest::new("race").with_user(UserId::new(2)))
            .await?;
        let id = issue.id();

        let complete = {
            let worker = Arc::clone(&service);
            tokio::spawn(async move {
                worker
                    .update_issue(
                        id,
                        UpdateIssueRequest::new().with_status(IssueStatus::Completed),
                    )
                    .await
            })
        };
        let unassign = {
            let worker = Arc::clone(&service);
            tokio::spawn(async move {
                worker
                    .update_issue(
                        id,
                        UpdateIssueRequest::new().with_assignee(AssigneeChange::Unassign),
                    )
                    .await
            })
        };

        let completion = complete.await?;
        let unassignment = unassign.await?;
        let stored = service.get_issue(id).await?;

        match (completion, unassignment) {
            (Ok(_), Err(err)) => {
                eyre::ensure!(
                    err.kind() == IssueErrorKind::InvalidState,
                    "unassign after completion should hit the terminal check"
                );
                eyre::ensure!(stored.status() == IssueStatus::Completed, "should stay completed");
                eyre::ensure!(stored.assignee().is_some(), "completed issue keeps its assignee");
            }
            (Err(err), Ok(_)) => {
                eyre::ensure!(
                    err.kind() == IssueErrorKind::Validation,
                    "completion after unassign needs an assignee"
                );
                eyre::ensure!(stored.status() == IssueStatus::Pending, "should be pending");
            }
            outcomes => {
                eyre::bail!("exactly one update should win: {outcomes:?}");
            }
        }
    }
    Ok(())
}
