//! Route definitions for the `/user/onboarding` resource.

use axum::routing::get;
use axum::Router;

use crate::handlers::onboarding;
use crate::state::AppState;

/// Routes mounted at `/user/onboarding`.
///
/// ```text
/// GET /  -> get_onboarding
/// PUT /  -> update_onboarding
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/",
        get(onboarding::get_onboarding).put(onboarding::update_onboarding),
    )
}
