//! Route definitions for the `/locations` reference-data lookups.

use axum::routing::get;
use axum::Router;

use crate::handlers::locations;
use crate::state::AppState;

/// Routes mounted at `/locations`.
///
/// ```text
/// GET /provinces                        -> list_provinces
/// GET /provinces/{province}/districts   -> list_districts
/// GET /hospitals                        -> list_hospitals
/// GET /hospitals/{hospital}/district    -> hospital_district
/// GET /facilities?program=&hospital=    -> list_facilities
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/provinces", get(locations::list_provinces))
        .route(
            "/provinces/{province}/districts",
            get(locations::list_districts),
        )
        .route("/hospitals", get(locations::list_hospitals))
        .route(
            "/hospitals/{hospital}/district",
            get(locations::hospital_district),
        )
        .route("/facilities", get(locations::list_facilities))
}
