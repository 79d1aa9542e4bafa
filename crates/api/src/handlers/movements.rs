//! Handlers for the `/movements` ledger.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use stockroom_core::ledger::{MovementRequest, QuantityInput};
use stockroom_core::types::DbId;
use stockroom_db::models::movement::{Movement, MovementListParams, MovementWithDetails};
use stockroom_db::repositories::{LedgerRepo, MovementRepo};

use crate::error::AppResult;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Request body for `POST /movements`.
///
/// `quantity` accepts a JSON integer or a numeric string.
#[derive(Debug, Deserialize)]
pub struct RecordMovementRequest {
    pub product_id: DbId,
    /// `entrada` or `saida`.
    pub direction: String,
    pub quantity: QuantityInput,
    #[serde(default)]
    pub reason: String,
    pub notes: Option<String>,
}

/// GET /api/v1/movements?limit=&product_id=
pub async fn list(
    State(state): State<AppState>,
    _auth: AuthUser,
    Query(params): Query<MovementListParams>,
) -> AppResult<Json<DataResponse<Vec<MovementWithDetails>>>> {
    let movements = MovementRepo::list(&state.pool, &params).await?;
    Ok(Json(DataResponse { data: movements }))
}

/// POST /api/v1/movements
///
/// Records the movement as the authenticated user and returns the persisted
/// row with its before/after balances.
pub async fn record(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(input): Json<RecordMovementRequest>,
) -> AppResult<(StatusCode, Json<Movement>)> {
    let request = MovementRequest::new(
        input.product_id,
        &input.direction,
        &input.quantity,
        &input.reason,
        input.notes.as_deref(),
        auth.user_id,
    )?;

    let movement = LedgerRepo::record(&state.pool, &request).await?;
    Ok((StatusCode::CREATED, Json(movement)))
}
