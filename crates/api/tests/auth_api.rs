//! Signup, login, refresh, session and logout over HTTP.

mod common;

use axum::http::StatusCode;
use common::{
    body_json, build_test_app, get_auth, post_auth, post_json, signup, TEST_PASSWORD,
};
use serde_json::json;
use sqlx::PgPool;
use stockroom_db::repositories::UserRepo;

async fn login(pool: &PgPool, email: &str, password: &str) -> axum::response::Response {
    post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/login",
        json!({ "email": email, "password": password }),
    )
    .await
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_returns_tokens_and_profile(pool: PgPool) {
    let json = signup(&pool, "  Maria@Example.com ").await;

    assert!(json["access_token"].is_string());
    assert!(json["refresh_token"].is_string());
    assert_eq!(json["expires_in"], 900);
    assert_eq!(json["user"]["email"], "maria@example.com");
    assert_eq!(json["user"]["display_name"], "Maria Souza");
    assert_eq!(json["user"]["job_title"], "Almoxarife");
    assert!(json["user"].get("password_hash").is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_defaults_job_title(pool: PgPool) {
    let body = json!({
        "email": "novo@example.com",
        "password": TEST_PASSWORD,
        "display_name": "Novo",
    });
    let response = post_json(build_test_app(pool), "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CREATED);
    assert_eq!(body_json(response).await["user"]["job_title"], "Operador");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_validation(pool: PgPool) {
    let cases = [
        json!({ "email": "not-an-email", "password": TEST_PASSWORD, "display_name": "A" }),
        json!({ "email": "a@example.com", "password": "12345", "display_name": "A" }),
        json!({ "email": "a@example.com", "password": TEST_PASSWORD, "display_name": "   " }),
    ];
    for body in cases {
        let response =
            post_json(build_test_app(pool.clone()), "/api/v1/auth/signup", body.clone()).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{body}");
        assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
    }
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_signup_duplicate_email_conflicts(pool: PgPool) {
    signup(&pool, "maria@example.com").await;

    let body = json!({
        "email": "MARIA@example.com",
        "password": TEST_PASSWORD,
        "display_name": "Outra Maria",
    });
    let response = post_json(build_test_app(pool), "/api/v1/auth/signup", body).await;

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(
        body_json(response).await["error"],
        "This email is already registered"
    );
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_success_and_failure(pool: PgPool) {
    signup(&pool, "maria@example.com").await;

    let ok = login(&pool, "maria@example.com", TEST_PASSWORD).await;
    assert_eq!(ok.status(), StatusCode::OK);
    assert_eq!(body_json(ok).await["user"]["email"], "maria@example.com");

    let wrong = login(&pool, "maria@example.com", "wrong-password").await;
    assert_eq!(wrong.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(wrong).await["error"], "Invalid email or password");

    let unknown = login(&pool, "ghost@example.com", TEST_PASSWORD).await;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(body_json(unknown).await["error"], "Invalid email or password");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_login_deactivated_account_forbidden(pool: PgPool) {
    let json = signup(&pool, "maria@example.com").await;
    let id = json["user"]["id"].as_i64().unwrap();
    UserRepo::deactivate(&pool, id).await.unwrap();

    let response = login(&pool, "maria@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_account_locks_after_five_failures(pool: PgPool) {
    signup(&pool, "maria@example.com").await;

    for _ in 0..5 {
        let response = login(&pool, "maria@example.com", "wrong-password").await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    // Even the right password is refused while locked.
    let response = login(&pool, "maria@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    let message = body_json(response).await["error"].as_str().unwrap().to_string();
    assert!(message.contains("locked"), "{message}");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_expired_lock_restarts_failure_count(pool: PgPool) {
    let json = signup(&pool, "maria@example.com").await;
    let id = json["user"]["id"].as_i64().unwrap();

    for _ in 0..5 {
        login(&pool, "maria@example.com", "wrong-password").await;
    }
    sqlx::query("UPDATE users SET locked_until = NOW() - INTERVAL '1 minute' WHERE id = $1")
        .bind(id)
        .execute(&pool)
        .await
        .unwrap();

    // One mistake after the lock lapsed counts as the first of a new run.
    let response = login(&pool, "maria@example.com", "wrong-password").await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    let response = login(&pool, "maria@example.com", TEST_PASSWORD).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_refresh_rotates_token(pool: PgPool) {
    let json = signup(&pool, "maria@example.com").await;
    let refresh_token = json["refresh_token"].as_str().unwrap().to_string();

    let response = post_json(
        build_test_app(pool.clone()),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let rotated = body_json(response).await;
    assert_ne!(rotated["refresh_token"].as_str().unwrap(), refresh_token);

    // The old token was revoked by the rotation.
    let reused = post_json(
        build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(reused.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_session_returns_current_user(pool: PgPool) {
    let json = signup(&pool, "maria@example.com").await;
    let token = json["access_token"].as_str().unwrap();

    let response = get_auth(build_test_app(pool.clone()), "/api/v1/auth/session", token).await;
    assert_eq!(response.status(), StatusCode::OK);
    let user = body_json(response).await;
    assert_eq!(user["email"], "maria@example.com");
    assert_eq!(user["display_name"], "Maria Souza");

    let bad = get_auth(build_test_app(pool), "/api/v1/auth/session", "garbage").await;
    assert_eq!(bad.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn test_logout_revokes_refresh_sessions(pool: PgPool) {
    let json = signup(&pool, "maria@example.com").await;
    let token = json["access_token"].as_str().unwrap();
    let refresh_token = json["refresh_token"].as_str().unwrap();

    let response = post_auth(build_test_app(pool.clone()), "/api/v1/auth/logout", token).await;
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = post_json(
        build_test_app(pool),
        "/api/v1/auth/refresh",
        json!({ "refresh_token": refresh_token }),
    )
    .await;
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}
