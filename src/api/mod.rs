//! HTTP boundary for the issue tracker.
//!
//! The router translates JSON requests into [`IssueLifecycleService`] calls
//! and serializes the results. Every failure is reported as a JSON body of
//! the form `{"error": <message>, "code": <status>}`.
//!
//! | Method  | Path          | Success        |
//! |---------|---------------|----------------|
//! | `POST`  | `/issue`      | `201` + issue  |
//! | `GET`   | `/issues`     | `200` + list   |
//! | `GET`   | `/issue/{id}` | `200` + issue  |
//! | `PATCH` | `/issue/{id}` | `200` + issue  |
//! | `GET`   | `/healthz`    | `200` + `ok`   |

mod dto;
mod error;
mod handlers;

pub use dto::{CreateIssueBody, IssueListResponse, IssueResponse, UpdateIssueBody, UserResponse};
pub use error::{ApiError, ErrorBody};

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use mockable::DefaultClock;
use tower_http::trace::TraceLayer;

use crate::issue::{adapters::memory::InMemoryIssueStore, services::IssueLifecycleService};

/// Issue service wired to the in-memory store and the system clock.
pub type IssueService = IssueLifecycleService<InMemoryIssueStore, DefaultClock>;

/// Shared state handed to every request handler.
pub struct AppState {
    issues: IssueService,
}

impl AppState {
    /// Wraps an existing issue service.
    #[must_use]
    pub const fn new(issues: IssueService) -> Self {
        Self { issues }
    }

    /// Builds state backed by a freshly seeded in-memory store.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(IssueLifecycleService::new(
            Arc::new(InMemoryIssueStore::new()),
            Arc::new(DefaultClock),
        ))
    }

    /// Returns the issue service.
    #[must_use]
    pub const fn issues(&self) -> &IssueService {
        &self.issues
    }
}

/// Builds the application router.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/issue", post(handlers::create_issue))
        .route("/issues", get(handlers::list_issues))
        .route(
            "/issue/{id}",
            get(handlers::get_issue).patch(handlers::update_issue),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn healthz() -> &'static str {
    "ok"
}
