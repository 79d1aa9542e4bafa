//! Read side of the `movements` ledger. Writes go through
//! [`LedgerRepo`](super::LedgerRepo).

use sqlx::PgPool;
use stockroom_core::types::{DbId, Timestamp};

use crate::models::movement::{MovementListParams, MovementWithDetails};

/// Default number of history rows returned.
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard ceiling on `limit`.
pub const MAX_LIST_LIMIT: i64 = 200;

pub struct MovementRepo;

impl MovementRepo {
    /// List movements newest first, joined with product and user names.
    ///
    /// Movements of deleted products are still returned, with NULL product
    /// fields.
    pub async fn list(
        pool: &PgPool,
        params: &MovementListParams,
    ) -> Result<Vec<MovementWithDetails>, sqlx::Error> {
        let limit = clamp_limit(params.limit);
        sqlx::query_as::<_, MovementWithDetails>(
            "SELECT m.id, m.product_id, p.name AS product_name, p.code AS product_code,
                    m.user_id, u.display_name AS user_name,
                    m.direction, m.quantity, m.balance_before, m.balance_after,
                    m.reason, m.notes, m.moved_at
             FROM movements m
             LEFT JOIN products p ON p.id = m.product_id
             JOIN users u ON u.id = m.user_id
             WHERE ($1::BIGINT IS NULL OR m.product_id = $1)
             ORDER BY m.moved_at DESC, m.id DESC
             LIMIT $2",
        )
        .bind(params.product_id)
        .bind(limit)
        .fetch_all(pool)
        .await
    }

    /// Count movements recorded at or after `since`.
    pub async fn count_since(pool: &PgPool, since: Timestamp) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM movements WHERE moved_at >= $1")
            .bind(since)
            .fetch_one(pool)
            .await?;
        Ok(count)
    }

    /// Count movements referencing a product.
    pub async fn count_for_product(pool: &PgPool, product_id: DbId) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM movements WHERE product_id = $1")
                .bind(product_id)
                .fetch_one(pool)
                .await?;
        Ok(count)
    }
}

/// Apply the default and ceiling to a requested limit. Non-positive values
/// fall back to the default.
pub fn clamp_limit(requested: Option<i64>) -> i64 {
    match requested {
        Some(n) if n > 0 => n.min(MAX_LIST_LIMIT),
        _ => DEFAULT_LIST_LIMIT,
    }
}
