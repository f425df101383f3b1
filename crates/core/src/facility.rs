//! Facility type identifiers.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// District hospital facility type.
pub const FACILITY_TYPE_HOSPITAL: &str = "Hospital";

/// Health center facility type (a sub-unit under a hospital).
pub const FACILITY_TYPE_HEALTH_CENTER: &str = "Health Center";

/// All valid facility type labels.
pub const VALID_FACILITY_TYPES: &[&str] = &[FACILITY_TYPE_HOSPITAL, FACILITY_TYPE_HEALTH_CENTER];

/// The kind of facility a plan is scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FacilityType {
    #[serde(rename = "Hospital")]
    Hospital,
    #[serde(rename = "Health Center")]
    HealthCenter,
}

impl FacilityType {
    /// Parse a facility type label.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            FACILITY_TYPE_HOSPITAL => Ok(Self::Hospital),
            FACILITY_TYPE_HEALTH_CENTER => Ok(Self::HealthCenter),
            _ => Err(CoreError::Validation(format!(
                "Invalid facility type '{s}'. Must be one of: {}",
                VALID_FACILITY_TYPES.join(", ")
            ))),
        }
    }

    /// The canonical display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hospital => FACILITY_TYPE_HOSPITAL,
            Self::HealthCenter => FACILITY_TYPE_HEALTH_CENTER,
        }
    }

    pub fn is_hospital(self) -> bool {
        matches!(self, Self::Hospital)
    }
}

impl fmt::Display for FacilityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
