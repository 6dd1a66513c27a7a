//! Then steps for issue lifecycle BDD scenarios.

use super::world::{IssueLifecycleWorld, run_async};
use eyre::WrapErr;
use issue_tracker::issue::{
    domain::{Issue, IssueStatus},
    services::{IssueErrorKind, IssueLifecycleError},
};
use rstest_bdd_macros::then;

fn update_result(
    world: &IssueLifecycleWorld,
) -> Result<&Result<Issue, IssueLifecycleError>, eyre::Report> {
    world
        .last_update_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing update result"))
}

fn expect_update_error(
    world: &IssueLifecycleWorld,
    kind: IssueErrorKind,
) -> Result<(), eyre::Report> {
    match update_result(world)? {
        Err(err) if err.kind() == kind => Ok(()),
        other => Err(eyre::eyre!("expected {kind:?} error, got {other:?}")),
    }
}

#[then(r#"the issue status is "{status}""#)]
fn issue_status_is(world: &IssueLifecycleWorld, status: String) -> Result<(), eyre::Report> {
    let expected = IssueStatus::try_from(status.as_str())
        .map_err(|err| eyre::eyre!("invalid expected status in scenario: {err}"))?;
    let actual = world.issue()?.status();

    if actual != expected {
        return Err(eyre::eyre!("expected status {expected}, found {actual}"));
    }
    Ok(())
}

#[then(r#"the issue is assigned to "{name}""#)]
fn issue_assigned_to(world: &IssueLifecycleWorld, name: String) -> Result<(), eyre::Report> {
    let assignee = world
        .issue()?
        .assignee()
        .ok_or_else(|| eyre::eyre!("issue has no assignee"))?;

    if assignee.name() != name {
        return Err(eyre::eyre!(
            "expected assignee {name}, found {}",
            assignee.name()
        ));
    }
    Ok(())
}

#[then("the issue has no assignee")]
fn issue_has_no_assignee(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    if let Some(user) = world.issue()?.assignee() {
        return Err(eyre::eyre!("expected no assignee, found {}", user.name()));
    }
    Ok(())
}

#[then("the update succeeds")]
fn update_succeeds(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    if let Err(err) = update_result(world)? {
        return Err(eyre::eyre!("expected update to succeed, got {err}"));
    }
    Ok(())
}

#[then("the update fails with an invalid state error")]
fn update_fails_invalid_state(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    expect_update_error(world, IssueErrorKind::InvalidState)
}

#[then("the update fails with a validation error")]
fn update_fails_validation(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    expect_update_error(world, IssueErrorKind::Validation)
}

#[then("the stored issue is unchanged")]
fn stored_issue_unchanged(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    let before = world
        .issue_before_update
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing issue snapshot"))?;
    let stored = run_async(world.service.get_issue(before.id()))
        .wrap_err("reload issue after rejected update")?;

    if &stored != before {
        return Err(eyre::eyre!(
            "stored issue changed: before {before:?}, after {stored:?}"
        ));
    }
    Ok(())
}

#[then("creation fails with a user not found error")]
fn creation_fails_user_not_found(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_create_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing create result"))?;

    if !matches!(result, Err(IssueLifecycleError::UserNotFound(_))) {
        return Err(eyre::eyre!("expected UserNotFound error, got {result:?}"));
    }
    Ok(())
}

#[then("no issues are stored")]
fn no_issues_stored(world: &IssueLifecycleWorld) -> Result<(), eyre::Report> {
    let issues = run_async(world.service.list_issues(None)).wrap_err("list issues")?;

    if !issues.is_empty() {
        return Err(eyre::eyre!("expected no issues, found {}", issues.len()));
    }
    Ok(())
}
