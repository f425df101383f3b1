//! Route definitions for the `/plans` resource.

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers::plans;
use crate::state::AppState;

/// Routes mounted at `/plans`.
///
/// ```text
/// GET  /                   -> list_plans (facility-scoped query)
/// POST /                   -> create_plan
/// GET  /{id}               -> get_plan
/// PUT  /{id}/activities    -> update_activities (drafts only)
/// POST /{id}/submit        -> submit_plan (one-way)
/// GET  /{id}/report        -> plan_report (read-only)
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(plans::list_plans).post(plans::create_plan))
        .route("/{id}", get(plans::get_plan))
        .route("/{id}/activities", put(plans::update_activities))
        .route("/{id}/submit", post(plans::submit_plan))
        .route("/{id}/report", get(plans::plan_report))
}
