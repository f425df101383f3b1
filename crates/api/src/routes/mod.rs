pub mod auth;
pub mod health;
pub mod locations;
pub mod onboarding;
pub mod plans;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /auth/register                                   register (public)
/// /auth/login                                      login (public)
/// /auth/refresh                                    refresh (public)
/// /auth/logout                                     logout (requires auth)
///
/// /user/onboarding                                 get, update facility selection
///
/// /locations/provinces                             list provinces
/// /locations/provinces/{province}/districts        list districts of a province
/// /locations/hospitals                             list hospitals
/// /locations/hospitals/{hospital}/district         district of a hospital
/// /locations/facilities?program=&hospital=         facilities for a program
///
/// /plans                                           list (facility-scoped), create
/// /plans/{id}                                      get with activity lines
/// /plans/{id}/activities                           replace lines (PUT, drafts only)
/// /plans/{id}/submit                               one-way submission (POST)
/// /plans/{id}/report                               read-only financial report
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/user/onboarding", onboarding::router())
        .nest("/locations", locations::router())
        .nest("/plans", plans::router())
}
