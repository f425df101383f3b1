//! Budget Engine: pure arithmetic over activity costing fields.
//!
//! All functions here are side-effect-free and trust their inputs: numeric
//! preconditions (non-negative quantity, frequency, unit cost) are enforced
//! by the caller-facing validation layer before this module is invoked.
//! Amounts use [`Decimal`], so recomputing after every edit is bit-for-bit
//! idempotent; `Decimal` values are always finite.

use rust_decimal::Decimal;

use crate::plan::{Activity, Plan};

/// Number of quarters in a fiscal year.
pub const QUARTERS: u32 = 4;

/// Amount budgeted for a single quarter: `quantity × frequency × unit_cost`.
///
/// The costing rule is uniform across quarters: the same amount applies to
/// Q1 through Q4.
pub fn quarter_amount(quantity: Decimal, frequency: Decimal, unit_cost: Decimal) -> Decimal {
    quantity * frequency * unit_cost
}

/// Annual budget of an activity: the four quarter amounts recomputed from
/// the activity's own costing fields and summed.
pub fn total_budget(activity: &Activity) -> Decimal {
    let quarter = quarter_amount(activity.quantity, activity.frequency, activity.unit_cost);
    quarter * Decimal::from(QUARTERS)
}

/// Total budget of a plan: the sum of [`total_budget`] over its activities.
pub fn plan_total(plan: &Plan) -> Decimal {
    plan.activities.iter().map(total_budget).sum()
}

/// Per-quarter totals across all activities, for the report view.
pub fn plan_quarter_totals(plan: &Plan) -> [Decimal; QUARTERS as usize] {
    let mut totals = [Decimal::ZERO; QUARTERS as usize];
    for activity in &plan.activities {
        let quarter = quarter_amount(activity.quantity, activity.frequency, activity.unit_cost);
        for slot in &mut totals {
            *slot += quarter;
        }
    }
    totals
}
