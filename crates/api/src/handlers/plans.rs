//! Handlers for the `/plans` resource: creation, facility-scoped listing,
//! activity editing with synchronous recomputation, submission, and the
//! read-only report view.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use fbp_core::budget;
use fbp_core::error::CoreError;
use fbp_core::facility::FacilityType;
use fbp_core::fiscal_year::validate_fiscal_year;
use fbp_core::locations::LocationRegistry;
use fbp_core::plan::{self as domain, Plan as DomainPlan, PlanMetadata, PlanStatus};
use fbp_core::program::Program;
use fbp_core::types::DbId;
use fbp_db::models::plan::{CreatePlan, CreatePlanActivity, PlanWithActivities};
use fbp_db::repositories::{PlanRepo, UserRepo};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /plans`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePlanRequest {
    #[validate(length(min = 1))]
    pub facility_name: String,
    pub facility_type: String,
    #[validate(length(min = 1))]
    pub district: String,
    #[validate(length(min = 1))]
    pub province: String,
    pub program: String,
    pub fiscal_year: String,
}

/// Query parameters for `GET /plans`.
#[derive(Debug, Deserialize)]
pub struct ListPlansQuery {
    pub facility_name: String,
    pub facility_type: String,
    pub district: String,
    pub province: String,
}

/// One activity line in a `PUT /plans/{id}/activities` request.
///
/// Quarterly amounts are absent on purpose: they are derived, never
/// client-supplied.
#[derive(Debug, Deserialize)]
pub struct ActivityInput {
    pub activity: String,
    #[serde(default)]
    pub description: String,
    pub quantity: Decimal,
    pub frequency: Decimal,
    pub unit_cost: Decimal,
    #[serde(default)]
    pub comment: String,
}

/// Request body for `PUT /plans/{id}/activities`.
#[derive(Debug, Deserialize)]
pub struct UpdateActivitiesRequest {
    pub activities: Vec<ActivityInput>,
}

/// One line of the report view.
#[derive(Debug, Serialize)]
pub struct ReportLine {
    pub activity: String,
    pub amount_q1: Decimal,
    pub amount_q2: Decimal,
    pub amount_q3: Decimal,
    pub amount_q4: Decimal,
    pub annual_budget: Decimal,
}

/// Read-only financial report for one plan.
#[derive(Debug, Serialize)]
pub struct PlanReport {
    pub facility_name: String,
    pub facility_type: String,
    pub district: String,
    pub province: String,
    pub program: String,
    pub fiscal_year: String,
    pub status: String,
    pub activities: Vec<ReportLine>,
    pub quarter_totals: [Decimal; 4],
    pub grand_total: Decimal,
}

// ---------------------------------------------------------------------------
// POST /plans
// ---------------------------------------------------------------------------

/// Create a draft plan seeded with the catalog activities for its program.
///
/// The (facility, type, program, fiscal year) tuple must be unused: an
/// advisory lookup runs first, and the database unique constraint catches
/// any create racing past it (surfaced as 409).
pub async fn create_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Json(input): Json<CreatePlanRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;

    let program = Program::parse(&input.program)?;
    let facility_type = FacilityType::parse(&input.facility_type)?;
    validate_fiscal_year(&input.fiscal_year)?;

    // Hospitals must exist in the registry with a matching district; health
    // centers are accepted as submitted (their parent hospital is not part
    // of the plan identity).
    if facility_type.is_hospital() {
        let registry = LocationRegistry::bundled();
        match registry.district_of(&input.facility_name) {
            None => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Unknown hospital '{}'",
                    input.facility_name
                ))))
            }
            Some(district) if district != input.district => {
                return Err(AppError::Core(CoreError::Validation(format!(
                    "Hospital '{}' is in district '{district}', not '{}'",
                    input.facility_name, input.district
                ))))
            }
            Some(_) => {}
        }
    }

    let user = UserRepo::find_by_id(&state.pool, auth.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    if PlanRepo::find_by_tuple(
        &state.pool,
        &input.facility_name,
        facility_type.as_str(),
        program.as_str(),
        &input.fiscal_year,
    )
    .await?
    .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "A {} plan for '{}' already exists for {}",
            program, input.facility_name, input.fiscal_year
        ))));
    }

    let metadata = PlanMetadata {
        facility_name: input.facility_name,
        facility_type,
        district: input.district,
        province: input.province,
        fiscal_year: input.fiscal_year,
        created_by: user.username,
        created_by_email: user.email,
    };
    let plan = DomainPlan::instantiate(metadata, program, facility_type.is_hospital());

    let (row, activities) = PlanRepo::create(&state.pool, &CreatePlan::from_domain(&plan)).await?;

    tracing::info!(plan_id = row.id, program = %program, "Plan created");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: PlanWithActivities {
                plan: row,
                activities,
            },
        }),
    ))
}

// ---------------------------------------------------------------------------
// GET /plans
// ---------------------------------------------------------------------------

/// List the plans of a facility, most recent first.
pub async fn list_plans(
    _auth: AuthUser,
    State(state): State<AppState>,
    Query(query): Query<ListPlansQuery>,
) -> AppResult<impl IntoResponse> {
    let plans = PlanRepo::list_for_facility(
        &state.pool,
        &query.facility_name,
        &query.facility_type,
        &query.district,
        &query.province,
    )
    .await?;

    Ok(Json(DataResponse { data: plans }))
}

// ---------------------------------------------------------------------------
// GET /plans/{id}
// ---------------------------------------------------------------------------

/// Get a plan with its activity lines.
pub async fn get_plan(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (plan, activities) = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plan",
            id,
        }))?;

    Ok(Json(DataResponse {
        data: PlanWithActivities { plan, activities },
    }))
}

// ---------------------------------------------------------------------------
// PUT /plans/{id}/activities
// ---------------------------------------------------------------------------

/// Replace a draft plan's activity lines.
///
/// Costing inputs are validated, derived amounts are recomputed in the core
/// before anything is stored, and the whole line set is rewritten so
/// positions keep matching the editing grid. Submitted plans reject edits.
pub async fn update_activities(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateActivitiesRequest>,
) -> AppResult<impl IntoResponse> {
    let (plan, _) = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plan",
            id,
        }))?;

    let status = PlanStatus::parse(&plan.status);
    if !status.is_editable() {
        return Err(AppError::Core(CoreError::Conflict(format!(
            "Plan is '{status}' and can no longer be edited"
        ))));
    }

    let mut lines = Vec::with_capacity(input.activities.len());
    for activity_input in &input.activities {
        domain::validate_activity_name(&activity_input.activity)?;
        domain::validate_costing(
            activity_input.quantity,
            activity_input.frequency,
            activity_input.unit_cost,
        )?;

        let mut activity = domain::Activity::new(
            activity_input.activity.clone(),
            activity_input.description.clone(),
        );
        activity.comment = activity_input.comment.clone();
        activity.set_costing(
            activity_input.quantity,
            activity_input.frequency,
            activity_input.unit_cost,
        );
        lines.push(CreatePlanActivity::from_domain(&activity));
    }

    let stored = PlanRepo::replace_activities(&state.pool, id, &lines).await?;

    tracing::info!(
        plan_id = id,
        user_id = auth.user_id,
        lines = stored.len(),
        "Plan activities updated"
    );

    Ok(Json(DataResponse { data: stored }))
}

// ---------------------------------------------------------------------------
// POST /plans/{id}/submit
// ---------------------------------------------------------------------------

/// Submit a draft plan. One-way: a submitted plan cannot return to draft
/// here.
pub async fn submit_plan(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (plan, activities) = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plan",
            id,
        }))?;

    let mut domain_plan = plan.to_domain(&activities)?;
    domain::validate_ready_for_submission(&domain_plan)?;
    domain_plan.submit()?;

    let updated = PlanRepo::set_status(&state.pool, id, domain_plan.status.as_str())
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plan",
            id,
        }))?;

    tracing::info!(plan_id = id, user_id = auth.user_id, "Plan submitted");

    Ok(Json(DataResponse { data: updated }))
}

// ---------------------------------------------------------------------------
// GET /plans/{id}/report
// ---------------------------------------------------------------------------

/// Read-only financial report: per-activity quarterly amounts and annual
/// budgets, per-quarter plan totals, and the grand total. Everything is
/// recomputed from the costing fields; stored amounts are display caches,
/// never report inputs.
pub async fn plan_report(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<impl IntoResponse> {
    let (plan, activities) = PlanRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound {
            entity: "Plan",
            id,
        }))?;

    let domain_plan = plan.to_domain(&activities)?;

    let lines = domain_plan
        .activities
        .iter()
        .map(|activity| {
            let quarter = budget::quarter_amount(
                activity.quantity,
                activity.frequency,
                activity.unit_cost,
            );
            ReportLine {
                activity: activity.activity.clone(),
                amount_q1: quarter,
                amount_q2: quarter,
                amount_q3: quarter,
                amount_q4: quarter,
                annual_budget: budget::total_budget(activity),
            }
        })
        .collect();

    let report = PlanReport {
        facility_name: plan.facility_name,
        facility_type: plan.facility_type,
        district: plan.district,
        province: plan.province,
        program: plan.program,
        fiscal_year: plan.fiscal_year,
        status: plan.status,
        activities: lines,
        quarter_totals: budget::plan_quarter_totals(&domain_plan),
        grand_total: budget::plan_total(&domain_plan),
    };

    Ok(Json(DataResponse { data: report }))
}
