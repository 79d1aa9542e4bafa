mod common;

use chrono::{Duration, Utc};
use sqlx::PgPool;
use stockroom_db::models::session::CreateSession;
use stockroom_db::repositories::{SessionRepo, UserRepo};

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_failed_login_counter_restarts_after_lock_expires(pool: PgPool) {
    let user = common::create_user(&pool, "joao@example.com").await;

    for expected in 1..=5 {
        let count = UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
        assert_eq!(count, expected);
    }

    UserRepo::lock_account(&pool, user.id, Utc::now() + Duration::minutes(15))
        .await
        .unwrap();
    // Still locked: the counter keeps climbing.
    let count = UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    assert_eq!(count, 6);

    UserRepo::lock_account(&pool, user.id, Utc::now() - Duration::minutes(1))
        .await
        .unwrap();
    let count = UserRepo::increment_failed_login(&pool, user.id).await.unwrap();
    assert_eq!(count, 1);

    let reloaded = UserRepo::find_by_id(&pool, user.id).await.unwrap().unwrap();
    assert!(reloaded.locked_until.is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_revoke_succeeds_once(pool: PgPool) {
    let user = common::create_user(&pool, "joao@example.com").await;
    let session = SessionRepo::create(
        &pool,
        &CreateSession {
            user_id: user.id,
            refresh_token_hash: "a".repeat(64),
            expires_at: Utc::now() + Duration::days(7),
            user_agent: None,
        },
    )
    .await
    .unwrap();

    let found = SessionRepo::find_by_refresh_token_hash(&pool, &session.refresh_token_hash)
        .await
        .unwrap();
    assert_eq!(found.map(|s| s.id), Some(session.id));

    assert!(SessionRepo::revoke(&pool, session.id).await.unwrap());
    assert!(!SessionRepo::revoke(&pool, session.id).await.unwrap());

    let found = SessionRepo::find_by_refresh_token_hash(&pool, &session.refresh_token_hash)
        .await
        .unwrap();
    assert!(found.is_none());
}
