use chrono::{Duration, Utc};
use fbp_db::models::onboarding::UpdateOnboarding;
use fbp_db::models::session::CreateSession;
use fbp_db::models::user::CreateUser;
use fbp_db::repositories::{OnboardingRepo, SessionRepo, UserRepo};
use sqlx::PgPool;

fn sample_user(username: &str) -> CreateUser {
    CreateUser {
        username: username.to_string(),
        email: format!("{username}@example.org"),
        password_hash: "$argon2id$stub-hash".to_string(),
    }
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_and_find_user(pool: PgPool) {
    let created = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();
    assert!(created.is_active);
    assert_eq!(created.failed_login_count, 0);

    let by_username = UserRepo::find_by_username(&pool, "auwase")
        .await
        .unwrap()
        .expect("user should exist");
    assert_eq!(by_username.id, created.id);

    let by_email = UserRepo::find_by_email(&pool, "auwase@example.org")
        .await
        .unwrap();
    assert!(by_email.is_some());

    assert!(UserRepo::find_by_username(&pool, "nobody")
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn duplicate_username_hits_the_unique_constraint(pool: PgPool) {
    UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();

    let mut duplicate = sample_user("auwase");
    duplicate.email = "other@example.org".to_string();
    let err = UserRepo::create(&pool, &duplicate).await.unwrap_err();
    match err {
        sqlx::Error::Database(db_err) => {
            assert_eq!(db_err.constraint(), Some("uq_users_username"));
        }
        other => panic!("expected a database error, got {other:?}"),
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn login_bookkeeping_round_trip(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("jbosco")).await.unwrap();

    UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    let lock_until = Utc::now() + Duration::minutes(15);
    UserRepo::lock_account(&pool, user.id, lock_until).await.unwrap();

    let locked = UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(locked.failed_login_count, 2);
    assert!(locked.locked_until.is_some());

    UserRepo::record_successful_login(&pool, user.id).await.unwrap();
    let unlocked = UserRepo::find_by_id(&pool, user.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unlocked.failed_login_count, 0);
    assert!(unlocked.locked_until.is_none());
    assert!(unlocked.last_login_at.is_some());
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn session_lifecycle(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();
    let input = CreateSession {
        user_id: user.id,
        refresh_token_hash: "a".repeat(64),
        expires_at: Utc::now() + Duration::days(7),
        user_agent: None,
        ip_address: None,
    };
    let session = SessionRepo::create(&pool, &input).await.unwrap();

    let found = SessionRepo::find_by_refresh_token_hash(&pool, &input.refresh_token_hash)
        .await
        .unwrap()
        .expect("session should be active");
    assert_eq!(found.id, session.id);

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    let gone = SessionRepo::find_by_refresh_token_hash(&pool, &input.refresh_token_hash)
        .await
        .unwrap();
    assert!(gone.is_none(), "revoked session must not resolve");

    // Revoking again is a no-op.
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn expired_sessions_do_not_resolve(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();
    let input = CreateSession {
        user_id: user.id,
        refresh_token_hash: "b".repeat(64),
        expires_at: Utc::now() - Duration::minutes(1),
        user_agent: None,
        ip_address: None,
    };
    SessionRepo::create(&pool, &input).await.unwrap();

    let found = SessionRepo::find_by_refresh_token_hash(&pool, &input.refresh_token_hash)
        .await
        .unwrap();
    assert!(found.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn revoke_all_for_user_clears_every_session(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();
    for i in 0..3 {
        let input = CreateSession {
            user_id: user.id,
            refresh_token_hash: format!("{i}").repeat(64),
            expires_at: Utc::now() + Duration::days(7),
            user_agent: None,
            ip_address: None,
        };
        SessionRepo::create(&pool, &input).await.unwrap();
    }

    let revoked = SessionRepo::revoke_all_for_user(&pool, user.id).await.unwrap();
    assert_eq!(revoked, 3);
}

// ---------------------------------------------------------------------------
// Onboarding
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn onboarding_is_created_lazily_and_once(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();

    let first = OnboardingRepo::get_or_create(&pool, user.id).await.unwrap();
    assert!(!first.completed);
    assert!(first.province.is_none());

    let second = OnboardingRepo::get_or_create(&pool, user.id).await.unwrap();
    assert_eq!(first.id, second.id);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn onboarding_partial_update_applies_only_set_fields(pool: PgPool) {
    let user = UserRepo::create(&pool, &sample_user("auwase")).await.unwrap();
    OnboardingRepo::get_or_create(&pool, user.id).await.unwrap();

    let step_one = UpdateOnboarding {
        province: Some("North".to_string()),
        district: Some("Burera".to_string()),
        hospital: None,
        facility_name: None,
        facility_type: None,
        completed: None,
    };
    let updated = OnboardingRepo::update(&pool, user.id, &step_one)
        .await
        .unwrap()
        .expect("record should exist");
    assert_eq!(updated.province.as_deref(), Some("North"));
    assert!(updated.hospital.is_none());

    let step_two = UpdateOnboarding {
        province: None,
        district: None,
        hospital: Some("BUTARO HOSPITAL".to_string()),
        facility_name: Some("BUTARO HOSPITAL".to_string()),
        facility_type: Some("Hospital".to_string()),
        completed: Some(true),
    };
    let finished = OnboardingRepo::update(&pool, user.id, &step_two)
        .await
        .unwrap()
        .unwrap();
    // Earlier selections survive the later partial update.
    assert_eq!(finished.province.as_deref(), Some("North"));
    assert_eq!(finished.hospital.as_deref(), Some("BUTARO HOSPITAL"));
    assert!(finished.completed);
}
