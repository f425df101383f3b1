//! User onboarding entity model and DTOs.
//!
//! Onboarding captures the facility selection a user walks through after
//! registration: province, district, hospital, and (for non-hospital
//! programs) the concrete facility. The record is created lazily on first
//! access and updated as the user progresses.

use fbp_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `user_onboarding` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct UserOnboarding {
    pub id: DbId,
    pub user_id: DbId,
    pub province: Option<String>,
    pub district: Option<String>,
    pub hospital: Option<String>,
    pub facility_name: Option<String>,
    pub facility_type: Option<String>,
    pub completed: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for partially updating onboarding state. All fields are optional;
/// only non-`None` fields are applied.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateOnboarding {
    pub province: Option<String>,
    pub district: Option<String>,
    pub hospital: Option<String>,
    pub facility_name: Option<String>,
    pub facility_type: Option<String>,
    pub completed: Option<bool>,
}
