//! Health program identifiers and validation.
//!
//! Programs form a closed set: a plan belongs to exactly one of them, and
//! the Activity Catalog and facility tables are keyed by program.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// HIV/AIDS program.
pub const PROGRAM_HIV: &str = "HIV";

/// Malaria program.
pub const PROGRAM_MALARIA: &str = "MALARIA";

/// Tuberculosis program. Hospital-only: TB plans have no sub-facilities.
pub const PROGRAM_TB: &str = "TB";

/// All valid program identifiers.
pub const VALID_PROGRAMS: &[&str] = &[PROGRAM_HIV, PROGRAM_MALARIA, PROGRAM_TB];

/// A health program governing which activity catalog and facility set apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Program {
    #[serde(rename = "HIV")]
    Hiv,
    #[serde(rename = "MALARIA")]
    Malaria,
    #[serde(rename = "TB")]
    Tb,
}

impl Program {
    /// Every program, in display order.
    pub const ALL: [Program; 3] = [Program::Hiv, Program::Malaria, Program::Tb];

    /// Parse a program identifier string.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            PROGRAM_HIV => Ok(Self::Hiv),
            PROGRAM_MALARIA => Ok(Self::Malaria),
            PROGRAM_TB => Ok(Self::Tb),
            _ => Err(CoreError::Validation(format!(
                "Invalid program '{s}'. Must be one of: {}",
                VALID_PROGRAMS.join(", ")
            ))),
        }
    }

    /// The canonical identifier string.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Hiv => PROGRAM_HIV,
            Self::Malaria => PROGRAM_MALARIA,
            Self::Tb => PROGRAM_TB,
        }
    }
}

impl fmt::Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
