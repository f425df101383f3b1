//! Plan and plan activity entity models, DTOs, and domain conversions.
//!
//! The row structs mirror the `plans` / `plan_activities` tables with plain
//! string columns for program, facility type, and status; the typed domain
//! equivalents live in `fbp_core::plan`. Conversions are centralized here so
//! handlers never hand-map columns.

use fbp_core::error::CoreError;
use fbp_core::facility::FacilityType;
use fbp_core::plan as domain;
use fbp_core::program::Program;
use fbp_core::types::{DbId, Timestamp};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `plans` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Plan {
    pub id: DbId,
    pub facility_name: String,
    pub facility_type: String,
    pub district: String,
    pub province: String,
    pub program: String,
    pub fiscal_year: String,
    pub status: String,
    pub created_by: String,
    pub created_by_email: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A row from the `plan_activities` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct PlanActivity {
    pub id: DbId,
    pub plan_id: DbId,
    /// Zero-based catalog position; rows are returned ordered by it.
    pub position: i32,
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
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A plan row together with its ordered activity rows.
#[derive(Debug, Clone, Serialize)]
pub struct PlanWithActivities {
    #[serde(flatten)]
    pub plan: Plan,
    pub activities: Vec<PlanActivity>,
}

/// DTO for inserting a new plan with its activity lines.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlan {
    pub facility_name: String,
    pub facility_type: String,
    pub district: String,
    pub province: String,
    pub program: String,
    pub fiscal_year: String,
    pub status: String,
    pub created_by: String,
    pub created_by_email: String,
    pub activities: Vec<CreatePlanActivity>,
}

/// DTO for inserting one plan activity line. Amounts are the derived values
/// already recomputed by the core; this crate stores, it does not compute.
#[derive(Debug, Clone, Deserialize)]
pub struct CreatePlanActivity {
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

impl CreatePlan {
    /// Build the insert DTO from a domain plan aggregate.
    pub fn from_domain(plan: &domain::Plan) -> Self {
        Self {
            facility_name: plan.facility_name.clone(),
            facility_type: plan.facility_type.as_str().to_string(),
            district: plan.district.clone(),
            province: plan.province.clone(),
            program: plan.program.as_str().to_string(),
            fiscal_year: plan.fiscal_year.clone(),
            status: plan.status.as_str().to_string(),
            created_by: plan.created_by.clone(),
            created_by_email: plan.created_by_email.clone(),
            activities: plan
                .activities
                .iter()
                .map(CreatePlanActivity::from_domain)
                .collect(),
        }
    }
}

impl CreatePlanActivity {
    pub fn from_domain(activity: &domain::Activity) -> Self {
        Self {
            activity: activity.activity.clone(),
            description: activity.description.clone(),
            quantity: activity.quantity,
            frequency: activity.frequency,
            unit_cost: activity.unit_cost,
            amount_q1: activity.amount_q1,
            amount_q2: activity.amount_q2,
            amount_q3: activity.amount_q3,
            amount_q4: activity.amount_q4,
            annual_budget: activity.annual_budget,
            comment: activity.comment.clone(),
        }
    }
}

impl PlanActivity {
    /// Convert to the domain value type for recomputation.
    pub fn to_domain(&self) -> domain::Activity {
        domain::Activity {
            id: Some(self.id),
            activity: self.activity.clone(),
            description: self.description.clone(),
            quantity: self.quantity,
            frequency: self.frequency,
            unit_cost: self.unit_cost,
            amount_q1: self.amount_q1,
            amount_q2: self.amount_q2,
            amount_q3: self.amount_q3,
            amount_q4: self.amount_q4,
            annual_budget: self.annual_budget,
            comment: self.comment.clone(),
        }
    }
}

impl Plan {
    /// Assemble the domain aggregate from this row and its activity rows.
    ///
    /// Program and facility type are validated on write, so a parse failure
    /// here means the stored data is corrupt.
    pub fn to_domain(&self, activities: &[PlanActivity]) -> Result<domain::Plan, CoreError> {
        let program = Program::parse(&self.program).map_err(|_| {
            CoreError::Internal(format!(
                "Plan {} has invalid stored program '{}'",
                self.id, self.program
            ))
        })?;
        let facility_type = FacilityType::parse(&self.facility_type).map_err(|_| {
            CoreError::Internal(format!(
                "Plan {} has invalid stored facility type '{}'",
                self.id, self.facility_type
            ))
        })?;

        Ok(domain::Plan {
            id: Some(self.id),
            facility_name: self.facility_name.clone(),
            facility_type,
            district: self.district.clone(),
            province: self.province.clone(),
            program,
            fiscal_year: self.fiscal_year.clone(),
            status: domain::PlanStatus::parse(&self.status),
            activities: activities.iter().map(PlanActivity::to_domain).collect(),
            created_by: self.created_by.clone(),
            created_by_email: self.created_by_email.clone(),
        })
    }
}
