//! Handlers for the `/locations` reference-data lookups.
//!
//! All lookups are misses-are-empty: an unknown province, hospital, or
//! program narrows the result to an empty list (or null district) rather
//! than erroring, so selection forms degrade gracefully.

use axum::extract::{Path, Query};
use axum::response::IntoResponse;
use axum::Json;
use fbp_core::locations::LocationRegistry;
use fbp_core::program::Program;
use serde::Deserialize;

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;

/// Query parameters for `GET /locations/facilities`.
#[derive(Debug, Deserialize)]
pub struct FacilitiesQuery {
    pub program: String,
    pub hospital: String,
}

// ---------------------------------------------------------------------------
// GET /locations/provinces
// ---------------------------------------------------------------------------

/// List all provinces, alphabetically.
pub async fn list_provinces(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    let registry = LocationRegistry::bundled();
    Ok(Json(DataResponse {
        data: registry.provinces(),
    }))
}

// ---------------------------------------------------------------------------
// GET /locations/provinces/{province}/districts
// ---------------------------------------------------------------------------

/// List the districts of a province, alphabetically. Unknown province
/// yields an empty list.
pub async fn list_districts(
    _auth: AuthUser,
    Path(province): Path<String>,
) -> AppResult<impl IntoResponse> {
    let registry = LocationRegistry::bundled();
    Ok(Json(DataResponse {
        data: registry.districts(&province),
    }))
}

// ---------------------------------------------------------------------------
// GET /locations/hospitals
// ---------------------------------------------------------------------------

/// List all hospitals, alphabetically.
pub async fn list_hospitals(_auth: AuthUser) -> AppResult<impl IntoResponse> {
    let registry = LocationRegistry::bundled();
    Ok(Json(DataResponse {
        data: registry.hospitals(),
    }))
}

// ---------------------------------------------------------------------------
// GET /locations/hospitals/{hospital}/district
// ---------------------------------------------------------------------------

/// The district a hospital belongs to. Unknown hospital yields null.
pub async fn hospital_district(
    _auth: AuthUser,
    Path(hospital): Path<String>,
) -> AppResult<impl IntoResponse> {
    let registry = LocationRegistry::bundled();
    Ok(Json(DataResponse {
        data: registry.district_of(&hospital),
    }))
}

// ---------------------------------------------------------------------------
// GET /locations/facilities?program=&hospital=
// ---------------------------------------------------------------------------

/// List the facilities available under a hospital for a program.
///
/// Unknown programs and hospitals yield an empty list; TB always does
/// (hospital-only program).
pub async fn list_facilities(
    _auth: AuthUser,
    Query(query): Query<FacilitiesQuery>,
) -> AppResult<impl IntoResponse> {
    let registry = LocationRegistry::bundled();
    let facilities: &[String] = match Program::parse(&query.program) {
        Ok(program) => registry.facilities_for(program, &query.hospital),
        Err(_) => &[],
    };
    Ok(Json(DataResponse { data: facilities }))
}
