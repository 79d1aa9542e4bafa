//! Handler for the dashboard summary.

use axum::extract::State;
use axum::Json;
use serde::Serialize;
use stockroom_core::dashboard::{start_of_today, summarize, StockSummary};
use stockroom_db::models::product::Product;
use stockroom_db::models::user::UserResponse;
use stockroom_db::repositories::{CategoryRepo, MovementRepo, ProductRepo};

use crate::error::AppResult;
use crate::handlers::auth::active_user;
use crate::middleware::auth::AuthUser;
use crate::response::DataResponse;
use crate::state::AppState;

/// Dashboard payload: stock numbers plus the caller's profile for the header.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    #[serde(flatten)]
    pub summary: StockSummary<Product>,
    pub user: UserResponse,
}

/// GET /api/v1/dashboard
pub async fn get_dashboard(
    State(state): State<AppState>,
    auth: AuthUser,
) -> AppResult<Json<DataResponse<DashboardResponse>>> {
    let user = active_user(&state, auth.user_id).await?;

    let products = ProductRepo::list_active(&state.pool).await?;
    let movements_today = MovementRepo::count_since(&state.pool, start_of_today()).await?;
    let category_count = CategoryRepo::count(&state.pool).await?;

    let summary = summarize(products, movements_today, category_count);
    Ok(Json(DataResponse {
        data: DashboardResponse {
            summary,
            user: UserResponse::from(&user),
        },
    }))
}
