use axum::routing::get;
use axum::Router;

use crate::handlers::movements;
use crate::state::AppState;

/// Routes mounted at `/movements`.
///
/// ```text
/// GET  /   -> list (?limit=&product_id=)
/// POST /   -> record
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route("/", get(movements::list).post(movements::record))
}
