//! Given steps for issue lifecycle BDD scenarios.

use super::world::{IssueLifecycleWorld, run_async};
use eyre::WrapErr;
use issue_tracker::issue::{
    domain::{IssueStatus, UserId},
    services::{CreateIssueRequest, UpdateIssueRequest},
};
use rstest_bdd_macros::given;

#[given(r#"a new issue titled "{title}" assigned to user {user_id:u64}"#)]
fn assigned_issue(
    world: &mut IssueLifecycleWorld,
    title: String,
    user_id: u64,
) -> Result<(), eyre::Report> {
    let request = CreateIssueRequest::new(title).with_user(UserId::new(user_id));
    let created = run_async(world.service.create_issue(request))
        .wrap_err("create assigned issue for scenario")?;
    world.current_issue = Some(created);
    Ok(())
}

#[given(r#"a new unassigned issue titled "{title}""#)]
fn unassigned_issue(world: &mut IssueLifecycleWorld, title: String) -> Result<(), eyre::Report> {
    let created = run_async(world.service.create_issue(CreateIssueRequest::new(title)))
        .wrap_err("create unassigned issue for scenario")?;
    world.current_issue = Some(created);
    Ok(())
}

#[given("the issue has been cancelled")]
fn issue_cancelled(world: &mut IssueLifecycleWorld) -> Result<(), eyre::Report> {
    let id = world.issue()?.id();
    let cancelled = run_async(world.service.update_issue(
        id,
        UpdateIssueRequest::new().with_status(IssueStatus::Cancelled),
    ))
    .wrap_err("cancel issue in scenario setup")?;
    world.current_issue = Some(cancelled);
    Ok(())
}
