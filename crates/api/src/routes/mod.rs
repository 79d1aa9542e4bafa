pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod health;
pub mod movements;
pub mod products;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /auth/signup                 sign up (public)
/// /auth/login                  sign in (public)
/// /auth/refresh                rotate tokens (public)
/// /auth/session                current user
/// /auth/logout                 sign out
///
/// /dashboard                   stock summary
///
/// /products                    list, create
/// /products/{id}               get, replace, delete
///
/// /categories                  list, create
///
/// /movements                   history, record
/// ```
///
/// Everything outside `/auth` requires a Bearer access token.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/dashboard", dashboard::router())
        .nest("/products", products::router())
        .nest("/categories", categories::router())
        .nest("/movements", movements::router())
}
