//! Fiscal year token validation and formatting.
//!
//! Plans are scoped by a fiscal year token of the form `"FY 2024"`. The
//! token is stored and compared as an opaque string; this module only
//! checks the format at the boundary.

use crate::error::CoreError;

/// Prefix of every fiscal year token.
pub const FISCAL_YEAR_PREFIX: &str = "FY ";

/// Validate a fiscal year token (`"FY <4-digit year>"`).
pub fn validate_fiscal_year(token: &str) -> Result<(), CoreError> {
    let year = token
        .strip_prefix(FISCAL_YEAR_PREFIX)
        .ok_or_else(|| invalid(token))?;
    if year.len() == 4 && year.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(invalid(token))
    }
}

/// Format a calendar year as a fiscal year token.
pub fn fiscal_year_token(year: i32) -> String {
    format!("{FISCAL_YEAR_PREFIX}{year}")
}

fn invalid(token: &str) -> CoreError {
    CoreError::Validation(format!(
        "Invalid fiscal year '{token}'. Expected format: FY <year>, e.g. FY 2024"
    ))
}
