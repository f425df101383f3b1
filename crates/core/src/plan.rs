//! Plan and Activity aggregates and their lifecycle.
//!
//! A plan is created in draft status with one zeroed activity per catalog
//! entry for its program. Edits change the costing fields and recompute the
//! derived quarterly amounts synchronously; submission is a one-way
//! transition after which the plan is terminal for this crate.
//!
//! Duplicate detection is NOT done here: a plan is business-identified by
//! the (facility name, facility type, program, fiscal year) tuple, and
//! callers must check for an existing plan with the persistence layer
//! before instantiating. The database's unique constraint over the tuple is
//! the authoritative duplicate signal.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::budget;
use crate::catalog::{self, ActivityTemplate};
use crate::error::CoreError;
use crate::facility::FacilityType;
use crate::program::Program;
use crate::types::DbId;

// ---------------------------------------------------------------------------
// Status
// ---------------------------------------------------------------------------

/// Status of a freshly created plan.
pub const STATUS_DRAFT: &str = "draft";
/// Status after submission; terminal for this crate.
pub const STATUS_SUBMITTED: &str = "submitted";

/// Plan lifecycle status.
///
/// Only `draft → submitted` is modeled here. Any other status string (an
/// approval workflow's `approved`, `rejected`, ...) passes through opaquely
/// and is never interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlanStatus {
    Draft,
    Submitted,
    Other(String),
}

impl PlanStatus {
    pub fn parse(s: &str) -> Self {
        match s {
            STATUS_DRAFT => Self::Draft,
            STATUS_SUBMITTED => Self::Submitted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::Draft => STATUS_DRAFT,
            Self::Submitted => STATUS_SUBMITTED,
            Self::Other(s) => s,
        }
    }

    /// Whether activity edits are still allowed.
    pub fn is_editable(&self) -> bool {
        matches!(self, Self::Draft)
    }
}

impl From<String> for PlanStatus {
    fn from(s: String) -> Self {
        Self::parse(&s)
    }
}

impl From<PlanStatus> for String {
    fn from(status: PlanStatus) -> Self {
        status.as_str().to_string()
    }
}

impl fmt::Display for PlanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Activity
// ---------------------------------------------------------------------------

/// A single costed line item within a plan.
///
/// `amount_q1..amount_q4` and `annual_budget` are derived from the costing
/// fields and are never authoritative: [`Activity::recompute`] refreshes
/// them after any edit, and recomputation with unchanged inputs yields the
/// identical values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    /// Assigned on persistence; `None` until then.
    pub id: Option<DbId>,
    pub activity: String,
    pub description: String,
    pub quantity: Decimal,
    pub frequency: Decimal,
    pub unit_cost: Decimal,
    pub amount_q1: Decimal,
    pub amount_q2: Decimal,
    pub amount_q3: Decimal,
    pub amount_q4: Decimal,
    pub annual_budget: Decimal,
    pub comment: String,
}

impl Activity {
    /// A zeroed activity with the given identity fields.
    pub fn new(activity: String, description: String) -> Self {
        Self {
            id: None,
            activity,
            description,
            quantity: Decimal::ZERO,
            frequency: Decimal::ZERO,
            unit_cost: Decimal::ZERO,
            amount_q1: Decimal::ZERO,
            amount_q2: Decimal::ZERO,
            amount_q3: Decimal::ZERO,
            amount_q4: Decimal::ZERO,
            annual_budget: Decimal::ZERO,
            comment: String::new(),
        }
    }

    /// A zeroed activity seeded from a catalog template.
    pub fn from_template(entry: &ActivityTemplate) -> Self {
        Self::new(entry.activity.to_string(), entry.description.to_string())
    }

    /// Recompute the derived quarterly amounts and annual budget from the
    /// current costing fields.
    pub fn recompute(&mut self) {
        let quarter = budget::quarter_amount(self.quantity, self.frequency, self.unit_cost);
        self.amount_q1 = quarter;
        self.amount_q2 = quarter;
        self.amount_q3 = quarter;
        self.amount_q4 = quarter;
        self.annual_budget = self.amount_q1 + self.amount_q2 + self.amount_q3 + self.amount_q4;
    }

    /// Apply a costing edit and refresh the derived amounts.
    pub fn set_costing(&mut self, quantity: Decimal, frequency: Decimal, unit_cost: Decimal) {
        self.quantity = quantity;
        self.frequency = frequency;
        self.unit_cost = unit_cost;
        self.recompute();
    }
}

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// Caller-supplied identity and audit fields for a new plan.
///
/// `created_by`/`created_by_email` come from the authenticated session;
/// timestamps are assigned by the persistence layer, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanMetadata {
    pub facility_name: String,
    pub facility_type: FacilityType,
    pub district: String,
    pub province: String,
    pub fiscal_year: String,
    pub created_by: String,
    pub created_by_email: String,
}

/// A facility/program/fiscal-year scoped budget document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Assigned on persistence; `None` until then.
    pub id: Option<DbId>,
    pub facility_name: String,
    pub facility_type: FacilityType,
    pub district: String,
    pub province: String,
    pub program: Program,
    pub fiscal_year: String,
    pub status: PlanStatus,
    /// Catalog order; positions correlate edits before persistence.
    pub activities: Vec<Activity>,
    pub created_by: String,
    pub created_by_email: String,
}

impl Plan {
    /// Instantiate a draft plan with default activities for the program.
    ///
    /// Callers must have confirmed via the persistence layer that no plan
    /// exists for this (facility, type, program, fiscal year) tuple.
    pub fn instantiate(metadata: PlanMetadata, program: Program, is_hospital: bool) -> Self {
        Self {
            id: None,
            facility_name: metadata.facility_name,
            facility_type: metadata.facility_type,
            district: metadata.district,
            province: metadata.province,
            program,
            fiscal_year: metadata.fiscal_year,
            status: PlanStatus::Draft,
            activities: generate_default_activities(program, is_hospital),
            created_by: metadata.created_by,
            created_by_email: metadata.created_by_email,
        }
    }

    /// One-way `draft → submitted` transition.
    ///
    /// There is no transition back to draft here; reopening a submitted
    /// plan belongs to the external approval workflow.
    pub fn submit(&mut self) -> Result<(), CoreError> {
        if self.status != PlanStatus::Draft {
            return Err(CoreError::Conflict(format!(
                "Plan is '{}' and can no longer be submitted",
                self.status
            )));
        }
        self.status = PlanStatus::Submitted;
        Ok(())
    }
}

/// One zeroed activity per catalog entry for the program, in catalog order.
///
/// `_is_hospital` is accepted for future per-facility-type catalogs; the
/// current catalog is shared by hospitals and health centers.
pub fn generate_default_activities(program: Program, _is_hospital: bool) -> Vec<Activity> {
    catalog::template_for(program)
        .iter()
        .map(Activity::from_template)
        .collect()
}

// ---------------------------------------------------------------------------
// Costing validation
// ---------------------------------------------------------------------------

/// Validate that an activity name is non-empty.
pub fn validate_activity_name(name: &str) -> Result<(), CoreError> {
    if name.trim().is_empty() {
        return Err(CoreError::Validation(
            "Activity name must be a non-empty string".to_string(),
        ));
    }
    Ok(())
}

/// Validate a costing edit: quantity, frequency, and unit cost must all be
/// non-negative. A draft may still hold the zeroed defaults, so the strict
/// positive minimum is deferred to [`validate_ready_for_submission`].
pub fn validate_costing(
    quantity: Decimal,
    frequency: Decimal,
    unit_cost: Decimal,
) -> Result<(), CoreError> {
    for (name, value) in [
        ("quantity", quantity),
        ("frequency", frequency),
        ("unit_cost", unit_cost),
    ] {
        if value < Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "{name} must be non-negative, got {value}"
            )));
        }
    }
    Ok(())
}

/// Validate that every activity meets the costing minimums required for
/// submission: frequency and unit cost strictly positive on each line.
pub fn validate_ready_for_submission(plan: &Plan) -> Result<(), CoreError> {
    for (index, activity) in plan.activities.iter().enumerate() {
        if activity.frequency <= Decimal::ZERO || activity.unit_cost <= Decimal::ZERO {
            return Err(CoreError::Validation(format!(
                "Activity '{}' (line {}) is not fully costed: frequency and unit cost must be greater than zero",
                activity.activity,
                index + 1
            )));
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn metadata() -> PlanMetadata {
        PlanMetadata {
            facility_name: "KIREHE HOSPITAL".to_string(),
            facility_type: FacilityType::Hospital,
            district: "Kirehe".to_string(),
            province: "East".to_string(),
            fiscal_year: "FY 2024".to_string(),
            created_by: "Alice Uwase".to_string(),
            created_by_email: "auwase@example.org".to_string(),
        }
    }

    // -- PlanStatus --

    #[test]
    fn status_parses_known_values() {
        assert_eq!(PlanStatus::parse("draft"), PlanStatus::Draft);
        assert_eq!(PlanStatus::parse("submitted"), PlanStatus::Submitted);
    }

    #[test]
    fn status_passes_unknown_values_through() {
        let status = PlanStatus::parse("approved");
        assert_eq!(status, PlanStatus::Other("approved".to_string()));
        assert_eq!(status.as_str(), "approved");
    }

    #[test]
    fn only_draft_is_editable() {
        assert!(PlanStatus::Draft.is_editable());
        assert!(!PlanStatus::Submitted.is_editable());
        assert!(!PlanStatus::parse("approved").is_editable());
    }

    // -- Activity seeding --

    #[test]
    fn from_template_copies_identity_and_zeroes_costing() {
        let entry = ActivityTemplate {
            activity: "Conduct TB contact tracing",
            description: "Screening of household contacts",
        };
        let activity = Activity::from_template(&entry);
        assert_eq!(activity.activity, entry.activity);
        assert_eq!(activity.description, entry.description);
        assert_eq!(activity.quantity, Decimal::ZERO);
        assert_eq!(activity.frequency, Decimal::ZERO);
        assert_eq!(activity.unit_cost, Decimal::ZERO);
        assert_eq!(activity.annual_budget, Decimal::ZERO);
        assert_eq!(activity.comment, "");
        assert!(activity.id.is_none());
    }

    #[test]
    fn generate_default_activities_matches_catalog() {
        for program in Program::ALL {
            let templates = catalog::template_for(program);
            for is_hospital in [true, false] {
                let activities = generate_default_activities(program, is_hospital);
                assert_eq!(activities.len(), templates.len());
                for (activity, template) in activities.iter().zip(templates) {
                    assert_eq!(activity.activity, template.activity);
                    assert_eq!(activity.description, template.description);
                    assert_eq!(activity.annual_budget, Decimal::ZERO);
                    assert_eq!(activity.comment, "");
                }
            }
        }
    }

    #[test]
    fn facility_type_does_not_change_the_catalog_today() {
        let hospital = generate_default_activities(Program::Hiv, true);
        let health_center = generate_default_activities(Program::Hiv, false);
        assert_eq!(hospital, health_center);
    }

    // -- Recomputation --

    #[test]
    fn recompute_sets_uniform_quarters_and_annual_budget() {
        let mut activity = Activity::from_template(&ActivityTemplate {
            activity: "Trace patients lost to follow-up",
            description: "Home visits",
        });
        activity.set_costing(Decimal::from(10), Decimal::ONE, Decimal::from(450_000));

        assert_eq!(activity.amount_q1, Decimal::from(4_500_000));
        assert_eq!(activity.amount_q2, activity.amount_q1);
        assert_eq!(activity.amount_q3, activity.amount_q1);
        assert_eq!(activity.amount_q4, activity.amount_q1);
        assert_eq!(activity.annual_budget, Decimal::from(18_000_000));
    }

    #[test]
    fn recompute_is_idempotent() {
        let mut activity = Activity::from_template(&ActivityTemplate {
            activity: "Distribute insecticide-treated nets",
            description: "LLIN distribution",
        });
        activity.set_costing(Decimal::from(37), Decimal::from(2), Decimal::new(12_345, 1));
        let snapshot = activity.clone();
        activity.recompute();
        assert_eq!(activity, snapshot);
    }

    #[test]
    fn editing_costing_overwrites_stale_amounts() {
        let mut activity = Activity::from_template(&ActivityTemplate {
            activity: "Conduct HIV testing outreach campaigns",
            description: "Community testing events",
        });
        activity.set_costing(Decimal::from(10), Decimal::ONE, Decimal::from(100));
        activity.set_costing(Decimal::from(1), Decimal::ONE, Decimal::from(100));
        assert_eq!(activity.annual_budget, Decimal::from(400));
    }

    // -- Plan instantiation --

    #[test]
    fn instantiate_builds_a_draft_with_default_activities() {
        let plan = Plan::instantiate(metadata(), Program::Hiv, true);
        assert_eq!(plan.status, PlanStatus::Draft);
        assert_eq!(
            plan.activities.len(),
            catalog::template_for(Program::Hiv).len()
        );
        assert_eq!(plan.facility_name, "KIREHE HOSPITAL");
        assert_eq!(plan.created_by, "Alice Uwase");
        assert_eq!(plan.created_by_email, "auwase@example.org");
        assert!(plan.id.is_none());
    }

    // -- Submission --

    #[test]
    fn submit_transitions_draft_to_submitted() {
        let mut plan = Plan::instantiate(metadata(), Program::Tb, true);
        assert!(plan.submit().is_ok());
        assert_eq!(plan.status, PlanStatus::Submitted);
    }

    #[test]
    fn submit_twice_is_a_conflict() {
        let mut plan = Plan::instantiate(metadata(), Program::Tb, true);
        plan.submit().unwrap();
        assert_matches!(plan.submit(), Err(CoreError::Conflict(_)));
    }

    #[test]
    fn submit_from_passthrough_status_is_a_conflict() {
        let mut plan = Plan::instantiate(metadata(), Program::Tb, true);
        plan.status = PlanStatus::parse("approved");
        assert_matches!(plan.submit(), Err(CoreError::Conflict(_)));
    }

    // -- Validation --

    #[test]
    fn activity_name_must_be_nonempty() {
        assert!(validate_activity_name("Trace patients").is_ok());
        assert_matches!(validate_activity_name(""), Err(CoreError::Validation(_)));
        assert_matches!(validate_activity_name("   "), Err(CoreError::Validation(_)));
    }

    #[test]
    fn costing_accepts_zero_and_positive_values() {
        assert!(validate_costing(Decimal::ZERO, Decimal::ZERO, Decimal::ZERO).is_ok());
        assert!(validate_costing(Decimal::from(5), Decimal::ONE, Decimal::from(100)).is_ok());
    }

    #[test]
    fn costing_rejects_negative_values() {
        let negative = Decimal::from(-1);
        assert_matches!(
            validate_costing(negative, Decimal::ONE, Decimal::ONE),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_costing(Decimal::ONE, negative, Decimal::ONE),
            Err(CoreError::Validation(_))
        );
        assert_matches!(
            validate_costing(Decimal::ONE, Decimal::ONE, negative),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn submission_requires_every_line_costed() {
        let mut plan = Plan::instantiate(metadata(), Program::Malaria, false);
        // Zero-seeded defaults are not submission-ready.
        assert_matches!(
            validate_ready_for_submission(&plan),
            Err(CoreError::Validation(_))
        );

        for activity in &mut plan.activities {
            activity.set_costing(Decimal::from(2), Decimal::ONE, Decimal::from(1000));
        }
        assert!(validate_ready_for_submission(&plan).is_ok());

        // One uncosted line fails the whole plan.
        plan.activities[1].set_costing(Decimal::from(2), Decimal::ZERO, Decimal::from(1000));
        assert_matches!(
            validate_ready_for_submission(&plan),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn zero_quantity_is_allowed_at_submission() {
        let mut plan = Plan::instantiate(metadata(), Program::Malaria, false);
        for activity in &mut plan.activities {
            activity.set_costing(Decimal::ZERO, Decimal::ONE, Decimal::from(1000));
        }
        assert!(validate_ready_for_submission(&plan).is_ok());
    }
}
