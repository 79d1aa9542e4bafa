//! Handlers for the `/products` resource.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use stockroom_core::catalog::validate_product;
use stockroom_core::error::CoreError;
use stockroom_core::types::DbId;
use stockroom_db::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};
use stockroom_db::repositories::ProductRepo;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

fn not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound {
        entity: "Product",
        id,
    })
}

/// GET /api/v1/products?search=&active_only=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<ProductListParams>,
) -> AppResult<Json<DataResponse<Vec<Product>>>> {
    let products = ProductRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: products }))
}

/// POST /api/v1/products
pub async fn create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<CreateProduct>,
) -> AppResult<(StatusCode, Json<Product>)> {
    let input = input.normalized();
    validate_product(&input.rules())?;

    let product = ProductRepo::create(&state.pool, &input).await?;
    tracing::info!(
        product_id = product.id,
        code = %product.code,
        user_id = auth.user_id,
        "Product created"
    );
    Ok((StatusCode::CREATED, Json(product)))
}

/// GET /api/v1/products/{id}
pub async fn get_by_id(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<Json<Product>> {
    let product = ProductRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or_else(|| not_found(id))?;
    Ok(Json(product))
}

/// PUT /api/v1/products/{id}
///
/// Full replacement: omitted optional fields are cleared.
pub async fn update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateProduct>,
) -> AppResult<Json<Product>> {
    let input = input.normalized();
    validate_product(&input.rules())?;

    let product = ProductRepo::update(&state.pool, id, &input)
        .await?
        .ok_or_else(|| not_found(id))?;
    tracing::info!(product_id = id, user_id = auth.user_id, "Product updated");
    Ok(Json(product))
}

/// DELETE /api/v1/products/{id}
///
/// Movement history is kept; its product reference is cleared.
pub async fn delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<DbId>,
) -> AppResult<StatusCode> {
    if ProductRepo::delete(&state.pool, id).await? {
        tracing::info!(product_id = id, user_id = auth.user_id, "Product deleted");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found(id))
    }
}
