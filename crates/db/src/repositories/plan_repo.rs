//! Repository for the `plans` and `plan_activities` tables.
//!
//! A plan and its activity lines form one aggregate: inserts and line-item
//! rewrites run in a transaction. The `uq_plans_facility_program_fy` unique
//! constraint over (facility_name, facility_type, program, fiscal_year) is
//! the authoritative duplicate-plan signal; [`PlanRepo::find_by_tuple`] is
//! the advisory existence check callers run first.

use fbp_core::types::DbId;
use sqlx::{PgPool, Postgres, Transaction};

use crate::models::plan::{CreatePlan, CreatePlanActivity, Plan, PlanActivity};

/// Column list shared across plan queries.
const PLAN_COLUMNS: &str = "id, facility_name, facility_type, district, province, program, \
                             fiscal_year, status, created_by, created_by_email, created_at, updated_at";

/// Column list shared across activity queries.
const ACTIVITY_COLUMNS: &str = "id, plan_id, position, activity, description, quantity, \
                                 frequency, unit_cost, amount_q1, amount_q2, amount_q3, amount_q4, \
                                 annual_budget, comment, created_at, updated_at";

/// Provides aggregate operations for plans and their activity lines.
pub struct PlanRepo;

impl PlanRepo {
    /// Insert a plan and its activity lines in one transaction, returning
    /// the created rows.
    pub async fn create(
        pool: &PgPool,
        input: &CreatePlan,
    ) -> Result<(Plan, Vec<PlanActivity>), sqlx::Error> {
        let mut tx = pool.begin().await?;

        let query = format!(
            "INSERT INTO plans (facility_name, facility_type, district, province, program,
                                fiscal_year, status, created_by, created_by_email)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
             RETURNING {PLAN_COLUMNS}"
        );
        let plan = sqlx::query_as::<_, Plan>(&query)
            .bind(&input.facility_name)
            .bind(&input.facility_type)
            .bind(&input.district)
            .bind(&input.province)
            .bind(&input.program)
            .bind(&input.fiscal_year)
            .bind(&input.status)
            .bind(&input.created_by)
            .bind(&input.created_by_email)
            .fetch_one(&mut *tx)
            .await?;

        let activities = insert_activities(&mut tx, plan.id, &input.activities).await?;

        tx.commit().await?;
        Ok((plan, activities))
    }

    /// Find a plan by ID, with its activity lines in position order.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<(Plan, Vec<PlanActivity>)>, sqlx::Error> {
        let query = format!("SELECT {PLAN_COLUMNS} FROM plans WHERE id = $1");
        let plan = sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;

        match plan {
            Some(plan) => {
                let activities = Self::activities_for(pool, plan.id).await?;
                Ok(Some((plan, activities)))
            }
            None => Ok(None),
        }
    }

    /// Find a plan by its business-identity tuple — the advisory existence
    /// check callers run before creating a new plan.
    pub async fn find_by_tuple(
        pool: &PgPool,
        facility_name: &str,
        facility_type: &str,
        program: &str,
        fiscal_year: &str,
    ) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM plans
             WHERE facility_name = $1 AND facility_type = $2 AND program = $3 AND fiscal_year = $4"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(facility_name)
            .bind(facility_type)
            .bind(program)
            .bind(fiscal_year)
            .fetch_optional(pool)
            .await
    }

    /// List all plans for a facility, most recently created first.
    pub async fn list_for_facility(
        pool: &PgPool,
        facility_name: &str,
        facility_type: &str,
        district: &str,
        province: &str,
    ) -> Result<Vec<Plan>, sqlx::Error> {
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM plans
             WHERE facility_name = $1 AND facility_type = $2 AND district = $3 AND province = $4
             ORDER BY created_at DESC"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(facility_name)
            .bind(facility_type)
            .bind(district)
            .bind(province)
            .fetch_all(pool)
            .await
    }

    /// The activity lines of a plan, in position order.
    pub async fn activities_for(
        pool: &PgPool,
        plan_id: DbId,
    ) -> Result<Vec<PlanActivity>, sqlx::Error> {
        let query = format!(
            "SELECT {ACTIVITY_COLUMNS} FROM plan_activities WHERE plan_id = $1 ORDER BY position"
        );
        sqlx::query_as::<_, PlanActivity>(&query)
            .bind(plan_id)
            .fetch_all(pool)
            .await
    }

    /// Replace every activity line of a plan in one transaction and touch
    /// the plan's `updated_at`. Returns the new lines in position order.
    pub async fn replace_activities(
        pool: &PgPool,
        plan_id: DbId,
        activities: &[CreatePlanActivity],
    ) -> Result<Vec<PlanActivity>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        sqlx::query("DELETE FROM plan_activities WHERE plan_id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;

        let rows = insert_activities(&mut tx, plan_id, activities).await?;

        sqlx::query("UPDATE plans SET updated_at = NOW() WHERE id = $1")
            .bind(plan_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(rows)
    }

    /// Set a plan's status, returning the updated row.
    ///
    /// The status string is not interpreted here: the core performs the
    /// draft→submitted check, and an external approval workflow may store
    /// statuses this crate never sees.
    pub async fn set_status(
        pool: &PgPool,
        id: DbId,
        status: &str,
    ) -> Result<Option<Plan>, sqlx::Error> {
        let query = format!(
            "UPDATE plans SET status = $2, updated_at = NOW() WHERE id = $1
             RETURNING {PLAN_COLUMNS}"
        );
        sqlx::query_as::<_, Plan>(&query)
            .bind(id)
            .bind(status)
            .fetch_optional(pool)
            .await
    }
}

/// Insert activity lines for a plan inside an open transaction, assigning
/// positions from input order.
async fn insert_activities(
    tx: &mut Transaction<'_, Postgres>,
    plan_id: DbId,
    inputs: &[CreatePlanActivity],
) -> Result<Vec<PlanActivity>, sqlx::Error> {
    let query = format!(
        "INSERT INTO plan_activities (plan_id, position, activity, description, quantity,
                                      frequency, unit_cost, amount_q1, amount_q2, amount_q3,
                                      amount_q4, annual_budget, comment)
         VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
         RETURNING {ACTIVITY_COLUMNS}"
    );

    let mut rows = Vec::with_capacity(inputs.len());
    for (position, input) in inputs.iter().enumerate() {
        let row = sqlx::query_as::<_, PlanActivity>(&query)
            .bind(plan_id)
            .bind(position as i32)
            .bind(&input.activity)
            .bind(&input.description)
            .bind(input.quantity)
            .bind(input.frequency)
            .bind(input.unit_cost)
            .bind(input.amount_q1)
            .bind(input.amount_q2)
            .bind(input.amount_q3)
            .bind(input.amount_q4)
            .bind(input.annual_budget)
            .bind(&input.comment)
            .fetch_one(&mut **tx)
            .await?;
        rows.push(row);
    }
    Ok(rows)
}
