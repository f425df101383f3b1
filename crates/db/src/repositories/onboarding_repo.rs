//! Repository for the `user_onboarding` table.

use fbp_core::types::DbId;
use sqlx::PgPool;

use crate::models::onboarding::{UpdateOnboarding, UserOnboarding};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, user_id, province, district, hospital, facility_name, \
                        facility_type, completed, created_at, updated_at";

/// Provides onboarding-state operations, one record per user.
pub struct OnboardingRepo;

impl OnboardingRepo {
    /// Fetch the user's onboarding record, creating a default one on first
    /// access.
    pub async fn get_or_create(pool: &PgPool, user_id: DbId) -> Result<UserOnboarding, sqlx::Error> {
        let query = format!(
            "INSERT INTO user_onboarding (user_id)
             VALUES ($1)
             ON CONFLICT ON CONSTRAINT uq_user_onboarding_user_id
             DO UPDATE SET user_id = EXCLUDED.user_id
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .fetch_one(pool)
            .await
    }

    /// Partially update the user's onboarding record. Only non-`None`
    /// fields in `input` are applied.
    pub async fn update(
        pool: &PgPool,
        user_id: DbId,
        input: &UpdateOnboarding,
    ) -> Result<Option<UserOnboarding>, sqlx::Error> {
        let query = format!(
            "UPDATE user_onboarding SET
                province = COALESCE($2, province),
                district = COALESCE($3, district),
                hospital = COALESCE($4, hospital),
                facility_name = COALESCE($5, facility_name),
                facility_type = COALESCE($6, facility_type),
                completed = COALESCE($7, completed),
                updated_at = NOW()
             WHERE user_id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, UserOnboarding>(&query)
            .bind(user_id)
            .bind(&input.province)
            .bind(&input.district)
            .bind(&input.hospital)
            .bind(&input.facility_name)
            .bind(&input.facility_type)
            .bind(input.completed)
            .fetch_optional(pool)
            .await
    }
}
