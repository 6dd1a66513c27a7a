//! When steps for issue lifecycle BDD scenarios.

use super::world::{IssueLifecycleWorld, run_async};
use issue_tracker::issue::{
    domain::{IssueStatus, UserId},
    services::{AssigneeChange, CreateIssueRequest, UpdateIssueRequest},
};
use rstest_bdd_macros::when;

fn submit_update(
    world: &mut IssueLifecycleWorld,
    request: UpdateIssueRequest,
) -> Result<(), eyre::Report> {
    let before = world.issue()?.clone();
    let result = run_async(world.service.update_issue(before.id(), request));
    if let Ok(ref updated) = result {
        world.current_issue = Some(updated.clone());
    }
    world.issue_before_update = Some(before);
    world.last_update_result = Some(result);
    Ok(())
}

#[when(r#"the issue status is set to "{status}""#)]
fn set_status(world: &mut IssueLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let parsed = IssueStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid status in scenario: {err}"))?;
    submit_update(world, UpdateIssueRequest::new().with_status(parsed))
}

#[when(r#"the issue title is set to "{title}""#)]
fn set_title(world: &mut IssueLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    submit_update(world, UpdateIssueRequest::new().with_title(title))
}

#[when("the issue is unassigned")]
fn unassign(world: &mut IssueLifecycleWorld) -> Result<(), eyre::Report> {
    submit_update(
        world,
        UpdateIssueRequest::new().with_assignee(AssigneeChange::Unassign),
    )
}

#[when("the issue is assigned to user {user_id:u64}")]
fn assign(world: &mut IssueLifecycleWorld, user_id: u64) -> Result<(), eyre::Report> {
    submit_update(
        world,
        UpdateIssueRequest::new().with_assignee(AssigneeChange::Assign(UserId::new(user_id))),
    )
}

#[when(r#"an issue titled "{title}" is created for user {user_id:u64}"#)]
fn create_for_user(world: &mut IssueLifecycleWorld, title: String, user_id: u64) {
    let request = CreateIssueRequest::new(title).with_user(UserId::new(user_id));
    world.last_create_result = Some(run_async(world.service.create_issue(request)));
}
