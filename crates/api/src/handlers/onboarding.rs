//! Handlers for user onboarding: the facility selection walked through
//! after registration.
//!
//! All endpoints require authentication. The onboarding record is created
//! lazily on first access via `get_or_create`. Submitted selections are
//! checked against the Location Registry so a stale client cannot store a
//! province or hospital that no longer exists.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use fbp_core::error::CoreError;
use fbp_core::facility::FacilityType;
use fbp_core::locations::LocationRegistry;
use fbp_db::models::onboarding::UpdateOnboarding;
use fbp_db::repositories::OnboardingRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// GET /user/onboarding
// ---------------------------------------------------------------------------

/// Get the authenticated user's onboarding state, creating a default record
/// if this is their first access.
pub async fn get_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<impl IntoResponse> {
    let record = OnboardingRepo::get_or_create(&state.pool, auth.user_id).await?;

    tracing::debug!(user_id = auth.user_id, "Fetched onboarding state");

    Ok(Json(DataResponse { data: record }))
}

// ---------------------------------------------------------------------------
// PUT /user/onboarding
// ---------------------------------------------------------------------------

/// Partially update the authenticated user's onboarding state. Only fields
/// present in the request are applied; earlier selections survive.
pub async fn update_onboarding(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<UpdateOnboarding>,
) -> AppResult<impl IntoResponse> {
    validate_selection(&input)?;

    // Ensure the record exists before updating.
    OnboardingRepo::get_or_create(&state.pool, auth.user_id).await?;

    let updated = OnboardingRepo::update(&state.pool, auth.user_id, &input).await?;

    tracing::info!(user_id = auth.user_id, "Onboarding state updated");

    Ok(Json(DataResponse { data: updated }))
}

/// Check each provided selection against the Location Registry.
fn validate_selection(input: &UpdateOnboarding) -> Result<(), AppError> {
    let registry = LocationRegistry::bundled();

    if let Some(ref province) = input.province {
        if !registry.provinces().contains(&province.as_str()) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown province '{province}'"
            ))));
        }
        // District is validated against its province when both are sent
        // together (the selection form always submits them as a pair).
        if let Some(ref district) = input.district {
            if !registry.districts(province).contains(&district.as_str()) {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "District '{district}' is not in province '{province}'"
                ))));
            }
        }
    }

    if let Some(ref hospital) = input.hospital {
        if registry.district_of(hospital).is_none() {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Unknown hospital '{hospital}'"
            ))));
        }
    }

    if let Some(ref facility_type) = input.facility_type {
        FacilityType::parse(facility_type)?;
    }

    Ok(())
}
