use fbp_core::budget;
use fbp_core::catalog;
use fbp_core::facility::FacilityType;
use fbp_core::plan::{Plan as DomainPlan, PlanMetadata, PlanStatus};
use fbp_core::program::Program;
use fbp_db::models::plan::{CreatePlan, CreatePlanActivity};
use fbp_db::repositories::PlanRepo;
use rust_decimal::Decimal;
use sqlx::PgPool;

fn sample_plan(program: Program, fiscal_year: &str) -> CreatePlan {
    let metadata = PlanMetadata {
        facility_name: "BUTARO HOSPITAL".to_string(),
        facility_type: FacilityType::Hospital,
        district: "Burera".to_string(),
        province: "North".to_string(),
        fiscal_year: fiscal_year.to_string(),
        created_by: "Test User".to_string(),
        created_by_email: "test@example.org".to_string(),
    };
    let domain = DomainPlan::instantiate(metadata, program, true);
    CreatePlan::from_domain(&domain)
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_persists_plan_with_catalog_activities(pool: PgPool) {
    let input = sample_plan(Program::Hiv, "FY 2024");
    let (plan, activities) = PlanRepo::create(&pool, &input).await.unwrap();

    assert!(plan.id > 0);
    assert_eq!(plan.status, "draft");
    assert_eq!(activities.len(), catalog::template_for(Program::Hiv).len());
    for (position, activity) in activities.iter().enumerate() {
        assert_eq!(activity.position, position as i32);
        assert_eq!(activity.plan_id, plan.id);
        assert_eq!(activity.annual_budget, Decimal::ZERO);
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_tuple_is_the_existence_check(pool: PgPool) {
    let missing = PlanRepo::find_by_tuple(&pool, "BUTARO HOSPITAL", "Hospital", "HIV", "FY 2024")
        .await
        .unwrap();
    assert!(missing.is_none());

    let input = sample_plan(Program::Hiv, "FY 2024");
    PlanRepo::create(&pool, &input).await.unwrap();

    let found = PlanRepo::find_by_tuple(&pool, "BUTARO HOSPITAL", "Hospital", "HIV", "FY 2024")
        .await
        .unwrap();
    assert!(found.is_some());

    // A different fiscal year is a different business identity.
    let other_year =
        PlanRepo::find_by_tuple(&pool, "BUTARO HOSPITAL", "Hospital", "HIV", "FY 2025")
            .await
            .unwrap();
    assert!(other_year.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_tuple_hits_the_unique_constraint(pool: PgPool) {
    let input = sample_plan(Program::Malaria, "FY 2024");
    PlanRepo::create(&pool, &input).await.unwrap();

    let err = PlanRepo::create(&pool, &input).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_plans_facility_program_fy"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn replace_activities_rewrites_lines_and_amounts(pool: PgPool) {
    let input = sample_plan(Program::Hiv, "FY 2024");
    let (plan, _) = PlanRepo::create(&pool, &input).await.unwrap();

    // Re-cost the first line in the domain and persist the rewrite.
    let metadata = PlanMetadata {
        facility_name: plan.facility_name.clone(),
        facility_type: FacilityType::Hospital,
        district: plan.district.clone(),
        province: plan.province.clone(),
        fiscal_year: plan.fiscal_year.clone(),
        created_by: plan.created_by.clone(),
        created_by_email: plan.created_by_email.clone(),
    };
    let mut domain = DomainPlan::instantiate(metadata, Program::Hiv, true);
    domain.activities[0].set_costing(
        Decimal::from(10),
        Decimal::ONE,
        Decimal::from(450_000),
    );

    let lines: Vec<CreatePlanActivity> = domain
        .activities
        .iter()
        .map(CreatePlanActivity::from_domain)
        .collect();
    let stored = PlanRepo::replace_activities(&pool, plan.id, &lines)
        .await
        .unwrap();

    assert_eq!(stored.len(), domain.activities.len());
    assert_eq!(stored[0].amount_q1, Decimal::from(4_500_000));
    assert_eq!(stored[0].annual_budget, Decimal::from(18_000_000));
    assert_eq!(stored[1].annual_budget, Decimal::ZERO);

    // Amounts round-trip exactly: recomputing from the stored row changes
    // nothing.
    let mut roundtrip = stored[0].to_domain();
    let before = roundtrip.clone();
    roundtrip.recompute();
    assert_eq!(roundtrip, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn set_status_submits_a_plan(pool: PgPool) {
    let input = sample_plan(Program::Tb, "FY 2024");
    let (plan, _) = PlanRepo::create(&pool, &input).await.unwrap();

    let updated = PlanRepo::set_status(&pool, plan.id, "submitted")
        .await
        .unwrap()
        .expect("plan should exist");
    assert_eq!(updated.status, "submitted");

    let missing = PlanRepo::set_status(&pool, plan.id + 999, "submitted")
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn list_for_facility_scopes_by_identity(pool: PgPool) {
    PlanRepo::create(&pool, &sample_plan(Program::Hiv, "FY 2024"))
        .await
        .unwrap();
    PlanRepo::create(&pool, &sample_plan(Program::Hiv, "FY 2025"))
        .await
        .unwrap();
    PlanRepo::create(&pool, &sample_plan(Program::Malaria, "FY 2024"))
        .await
        .unwrap();

    let plans =
        PlanRepo::list_for_facility(&pool, "BUTARO HOSPITAL", "Hospital", "Burera", "North")
            .await
            .unwrap();
    assert_eq!(plans.len(), 3);

    let none = PlanRepo::list_for_facility(&pool, "KIREHE HOSPITAL", "Hospital", "Kirehe", "East")
        .await
        .unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn find_by_id_round_trips_to_domain(pool: PgPool) {
    let input = sample_plan(Program::Hiv, "FY 2024");
    let (created, _) = PlanRepo::create(&pool, &input).await.unwrap();

    let (plan, activities) = PlanRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .expect("plan should exist");

    let domain = plan.to_domain(&activities).unwrap();
    assert_eq!(domain.id, Some(created.id));
    assert_eq!(domain.program, Program::Hiv);
    assert_eq!(domain.facility_type, FacilityType::Hospital);
    assert_eq!(domain.status, PlanStatus::Draft);
    assert_eq!(budget::plan_total(&domain), Decimal::ZERO);
}
