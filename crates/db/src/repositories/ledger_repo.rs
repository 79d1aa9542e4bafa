//! Postgres implementation of the stock ledger.
//!
//! [`PgLedgerStore`] wraps one transaction. The product row is read with
//! `FOR UPDATE`, so concurrent movements on the same product serialize, and
//! the movement insert and balance update commit together or not at all.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};
use stockroom_core::ledger::{
    record_movement, LedgerEntry, LedgerError, LedgerStore, MovementRequest, StockSnapshot,
};
use stockroom_core::types::DbId;

use crate::models::movement::Movement;

const MOVEMENT_COLUMNS: &str = "id, product_id, user_id, direction, quantity, balance_before, \
                                balance_after, reason, notes, moved_at";

/// A [`LedgerStore`] bound to an open Postgres transaction.
///
/// Dropping the store without calling [`PgLedgerStore::commit`] rolls the
/// transaction back.
pub struct PgLedgerStore {
    tx: Transaction<'static, Postgres>,
}

impl PgLedgerStore {
    /// Open a transaction on `pool`.
    pub async fn begin(pool: &PgPool) -> Result<Self, LedgerError> {
        let tx = pool.begin().await.map_err(persistence_failure)?;
        Ok(Self { tx })
    }

    pub async fn commit(self) -> Result<(), LedgerError> {
        self.tx.commit().await.map_err(persistence_failure)
    }
}

#[async_trait]
impl LedgerStore for PgLedgerStore {
    type Movement = Movement;

    async fn load_stock(&mut self, product_id: DbId) -> Result<Option<StockSnapshot>, LedgerError> {
        let row: Option<(DbId, i32, bool)> = sqlx::query_as(
            "SELECT id, current_stock, is_active FROM products WHERE id = $1 FOR UPDATE",
        )
        .bind(product_id)
        .fetch_optional(&mut *self.tx)
        .await
        .map_err(persistence_failure)?;

        Ok(row.map(|(product_id, current_stock, is_active)| StockSnapshot {
            product_id,
            current_stock,
            is_active,
        }))
    }

    async fn insert_movement(&mut self, entry: &LedgerEntry) -> Result<Movement, LedgerError> {
        let query = format!(
            "INSERT INTO movements
                (product_id, user_id, direction, quantity, balance_before, balance_after,
                 reason, notes)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {MOVEMENT_COLUMNS}"
        );
        sqlx::query_as::<_, Movement>(&query)
            .bind(entry.product_id)
            .bind(entry.user_id)
            .bind(entry.direction.as_str())
            .bind(entry.quantity)
            .bind(entry.balance_before)
            .bind(entry.balance_after)
            .bind(&entry.reason)
            .bind(&entry.notes)
            .fetch_one(&mut *self.tx)
            .await
            .map_err(persistence_failure)
    }

    async fn write_balance(&mut self, product_id: DbId, balance: i32) -> Result<(), LedgerError> {
        let result = sqlx::query("UPDATE products SET current_stock = $2 WHERE id = $1")
            .bind(product_id)
            .bind(balance)
            .execute(&mut *self.tx)
            .await
            .map_err(persistence_failure)?;

        if result.rows_affected() == 0 {
            return Err(LedgerError::PersistenceFailure(format!(
                "balance update for product {product_id} matched no rows"
            )));
        }
        Ok(())
    }
}

/// Entry point for recording stock movements.
pub struct LedgerRepo;

impl LedgerRepo {
    /// Record one movement atomically and return the persisted row.
    ///
    /// Rejections (unknown or inactive product, insufficient stock) leave the
    /// database untouched.
    pub async fn record(pool: &PgPool, request: &MovementRequest) -> Result<Movement, LedgerError> {
        let mut store = PgLedgerStore::begin(pool).await?;

        match record_movement(&mut store, request).await {
            Ok(movement) => {
                store.commit().await?;
                tracing::info!(
                    product_id = request.product_id,
                    direction = %request.direction,
                    quantity = request.quantity,
                    balance_after = movement.balance_after,
                    user_id = request.user_id,
                    "Stock movement recorded"
                );
                Ok(movement)
            }
            Err(err) => {
                tracing::warn!(
                    product_id = request.product_id,
                    direction = %request.direction,
                    quantity = request.quantity,
                    error = %err,
                    "Stock movement rejected"
                );
                Err(err)
            }
        }
    }
}

fn persistence_failure(err: sqlx::Error) -> LedgerError {
    tracing::error!(error = %err, "Ledger store error");
    LedgerError::PersistenceFailure(err.to_string())
}
