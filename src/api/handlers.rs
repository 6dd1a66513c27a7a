//! Request handlers for the issue endpoints.

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{debug, instrument};

use super::{
    AppState,
    dto::{CreateIssueBody, IssueListResponse, IssueResponse, UpdateIssueBody},
    error::ApiError,
};
use crate::issue::domain::{IssueId, IssueStatus};

/// Query string accepted by `GET /issues`.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ListIssuesQuery {
    #[serde(default)]
    status: Option<String>,
}

/// Status filter derived from the query string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StatusFilter {
    Any,
    Only(IssueStatus),
    Unmatched,
}

impl ListIssuesQuery {
    /// An absent or empty value means no filter. A value that is not an
    /// exact status name matches no issue.
    fn status_filter(&self) -> StatusFilter {
        match self.status.as_deref() {
            None | Some("") => StatusFilter::Any,
            Some(raw) => IssueStatus::try_from(raw)
                .map_or(StatusFilter::Unmatched, StatusFilter::Only),
        }
    }
}

fn issue_id(path: Result<Path<u64>, PathRejection>) -> Result<IssueId, ApiError> {
    path.map(|Path(raw)| IssueId::new(raw)).map_err(|rejection| {
        debug!(%rejection, "rejected issue id");
        ApiError::invalid_id()
    })
}

fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, ApiError> {
    payload.map(|Json(body)| body).map_err(|rejection| {
        debug!(%rejection, "rejected request body");
        ApiError::invalid_json()
    })
}

#[instrument(name = "http.issue.create", skip_all)]
pub(super) async fn create_issue(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CreateIssueBody>, JsonRejection>,
) -> Result<(StatusCode, Json<IssueResponse>), ApiError> {
    let body = json_body(payload)?;
    let issue = state.issues().create_issue(body.into()).await?;
    Ok((StatusCode::CREATED, Json(IssueResponse::from(&issue))))
}

#[instrument(name = "http.issue.list", skip_all)]
pub(super) async fn list_issues(
    State(state): State<Arc<AppState>>,
    params: Result<Query<ListIssuesQuery>, QueryRejection>,
) -> Result<Json<IssueListResponse>, ApiError> {
    let Query(query) = params.map_err(|rejection| {
        debug!(%rejection, "rejected query string");
        ApiError::invalid_query()
    })?;
    let status = match query.status_filter() {
        StatusFilter::Any => None,
        StatusFilter::Only(wanted) => Some(wanted),
        StatusFilter::Unmatched => {
            debug!(status = ?query.status, "status filter matches no issue");
            return Ok(Json(IssueListResponse::from_issues(&[])));
        }
    };
    let issues = state.issues().list_issues(status).await?;
    Ok(Json(IssueListResponse::from_issues(&issues)))
}

#[instrument(name = "http.issue.get", skip_all)]
pub(super) async fn get_issue(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
) -> Result<Json<IssueResponse>, ApiError> {
    let id = issue_id(path)?;
    let issue = state.issues().get_issue(id).await?;
    Ok(Json(IssueResponse::from(&issue)))
}

#[instrument(name = "http.issue.update", skip_all)]
pub(super) async fn update_issue(
    State(state): State<Arc<AppState>>,
    path: Result<Path<u64>, PathRejection>,
    payload: Result<Json<UpdateIssueBody>, JsonRejection>,
) -> Result<Json<IssueResponse>, ApiError> {
    let id = issue_id(path)?;
    let body = json_body(payload)?;
    let issue = state.issues().update_issue(id, body.into()).await?;
    Ok(Json(IssueResponse::from(&issue)))
}
