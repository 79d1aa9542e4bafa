//! Stock movement (ledger) rows.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::types::{DbId, Timestamp};

/// A row from the append-only `movements` table.
///
/// `product_id` is `None` once the product has been deleted.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Movement {
    pub id: DbId,
    pub product_id: Option<DbId>,
    pub user_id: DbId,
    /// `entrada` or `saida`.
    pub direction: String,
    pub quantity: i32,
    pub balance_before: i32,
    pub balance_after: i32,
    pub reason: String,
    pub notes: Option<String>,
    pub moved_at: Timestamp,
}

/// A movement joined with the product and user it refers to, as shown in
/// the ledger history.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct MovementWithDetails {
    pub id: DbId,
    pub product_id: Option<DbId>,
    pub product_name: Option<String>,
    pub product_code: Option<String>,
    pub user_id: DbId,
    pub user_name: String,
    pub direction: String,
    pub quantity: i32,
    pub balance_before: i32,
    pub balance_after: i32,
    pub reason: String,
    pub notes: Option<String>,
    pub moved_at: Timestamp,
}

/// Query parameters for the movement history.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MovementListParams {
    pub limit: Option<i64>,
    pub product_id: Option<DbId>,
}
