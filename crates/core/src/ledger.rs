//! Stock-movement ledger.
//!
//! A movement is validated, checked against the product's current balance,
//! and then persisted as two writes: the append-only movement row and the
//! product's new balance. Persistence goes through the [`LedgerStore`] trait
//! so the algorithm is independent of the backing database.
//!
//! Implementations must run all three store calls inside a single unit of
//! work. The Postgres store uses one transaction with a row lock on the
//! product.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::types::DbId;

/// Direction value for stock entering the warehouse.
pub const DIRECTION_INBOUND: &str = "entrada";

/// Direction value for stock leaving the warehouse.
pub const DIRECTION_OUTBOUND: &str = "saida";

/// Why a movement was rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LedgerError {
    #[error("Product with id {id} not found")]
    ProductNotFound { id: DbId },

    #[error("Product with id {id} is inactive")]
    ProductInactive { id: DbId },

    #[error("Quantity must be a positive integer, got '{0}'")]
    InvalidQuantity(String),

    #[error("A reason is required for every stock movement")]
    MissingReason,

    #[error("Unknown movement direction '{0}', expected 'entrada' or 'saida'")]
    InvalidDirection(String),

    #[error("Insufficient stock for this operation: available {available}, requested {requested}")]
    InsufficientStock { available: i32, requested: i32 },

    #[error("Failed to persist stock movement: {0}")]
    PersistenceFailure(String),
}

// ---------------------------------------------------------------------------
// Direction
// ---------------------------------------------------------------------------

/// Direction of a stock movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    #[serde(rename = "entrada")]
    Inbound,
    #[serde(rename = "saida")]
    Outbound,
}

impl Direction {
    /// Parse the stored/wire representation (`entrada` or `saida`).
    pub fn parse(value: &str) -> Result<Self, LedgerError> {
        match value.trim() {
            DIRECTION_INBOUND => Ok(Direction::Inbound),
            DIRECTION_OUTBOUND => Ok(Direction::Outbound),
            other => Err(LedgerError::InvalidDirection(other.to_string())),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Inbound => DIRECTION_INBOUND,
            Direction::Outbound => DIRECTION_OUTBOUND,
        }
    }

    /// Apply `quantity` to `balance` in this direction.
    ///
    /// Returns `None` on integer overflow. The result may be negative; the
    /// caller decides whether that is acceptable.
    pub fn apply(self, balance: i32, quantity: i32) -> Option<i32> {
        match self {
            Direction::Inbound => balance.checked_add(quantity),
            Direction::Outbound => balance.checked_sub(quantity),
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Request validation
// ---------------------------------------------------------------------------

/// A quantity as it arrives on the wire: forms post text, API clients post
/// numbers.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum QuantityInput {
    Integer(i64),
    Decimal(f64),
    Text(String),
}

impl QuantityInput {
    /// Parse into a strictly positive `i32`.
    pub fn parse(&self) -> Result<i32, LedgerError> {
        let value = match self {
            QuantityInput::Integer(n) => *n,
            QuantityInput::Decimal(f) => return Err(LedgerError::InvalidQuantity(f.to_string())),
            QuantityInput::Text(s) => s
                .trim()
                .parse::<i64>()
                .map_err(|_| LedgerError::InvalidQuantity(s.clone()))?,
        };
        let value =
            i32::try_from(value).map_err(|_| LedgerError::InvalidQuantity(value.to_string()))?;
        validate_quantity(value)?;
        Ok(value)
    }
}

/// Reject zero and negative quantities.
pub fn validate_quantity(quantity: i32) -> Result<(), LedgerError> {
    if quantity <= 0 {
        return Err(LedgerError::InvalidQuantity(quantity.to_string()));
    }
    Ok(())
}

/// A validated request to move stock. Construct with [`MovementRequest::new`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementRequest {
    pub product_id: DbId,
    pub direction: Direction,
    pub quantity: i32,
    pub reason: String,
    pub notes: Option<String>,
    /// The acting user, taken from the caller's session.
    pub user_id: DbId,
}

impl MovementRequest {
    /// Validate raw input. Nothing here touches the store.
    ///
    /// Blank notes are stored as `None`; the reason is trimmed and must not
    /// be empty.
    pub fn new(
        product_id: DbId,
        direction: &str,
        quantity: &QuantityInput,
        reason: &str,
        notes: Option<&str>,
        user_id: DbId,
    ) -> Result<Self, LedgerError> {
        let direction = Direction::parse(direction)?;
        let quantity = quantity.parse()?;

        let reason = reason.trim();
        if reason.is_empty() {
            return Err(LedgerError::MissingReason);
        }

        let notes = notes
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string);

        Ok(Self {
            product_id,
            direction,
            quantity,
            reason: reason.to_string(),
            notes,
            user_id,
        })
    }
}

// ---------------------------------------------------------------------------
// Planning
// ---------------------------------------------------------------------------

/// The part of a product row the ledger needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StockSnapshot {
    pub product_id: DbId,
    pub current_stock: i32,
    pub is_active: bool,
}

/// A fully computed movement, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub product_id: DbId,
    pub direction: Direction,
    pub quantity: i32,
    pub balance_before: i32,
    pub balance_after: i32,
    pub reason: String,
    pub notes: Option<String>,
    pub user_id: DbId,
}

/// Compute the entry for `request` against the product's current `stock`.
///
/// Fails with [`LedgerError::InsufficientStock`] when an outbound movement
/// would drive the balance below zero.
pub fn plan_movement(
    request: &MovementRequest,
    stock: StockSnapshot,
) -> Result<LedgerEntry, LedgerError> {
    validate_quantity(request.quantity)?;

    if !stock.is_active {
        return Err(LedgerError::ProductInactive {
            id: stock.product_id,
        });
    }

    let balance_before = stock.current_stock;
    let balance_after = request
        .direction
        .apply(balance_before, request.quantity)
        .ok_or_else(|| LedgerError::InvalidQuantity(request.quantity.to_string()))?;

    if balance_after < 0 {
        return Err(LedgerError::InsufficientStock {
            available: balance_before,
            requested: request.quantity,
        });
    }

    Ok(LedgerEntry {
        product_id: stock.product_id,
        direction: request.direction,
        quantity: request.quantity,
        balance_before,
        balance_after,
        reason: request.reason.clone(),
        notes: request.notes.clone(),
        user_id: request.user_id,
    })
}

// ---------------------------------------------------------------------------
// Store seam
// ---------------------------------------------------------------------------

/// Persistence operations required to record a movement.
#[async_trait]
pub trait LedgerStore: Send {
    /// The persisted movement row returned to the caller.
    type Movement: Send;

    /// Read the product's balance and active flag. `None` if it does not exist.
    async fn load_stock(&mut self, product_id: DbId) -> Result<Option<StockSnapshot>, LedgerError>;

    /// Append the movement row.
    async fn insert_movement(&mut self, entry: &LedgerEntry)
        -> Result<Self::Movement, LedgerError>;

    /// Overwrite the product's current balance.
    async fn write_balance(&mut self, product_id: DbId, balance: i32) -> Result<(), LedgerError>;
}

/// Record a stock movement: read, compute, append the movement, update the
/// balance. On any rejection before step 4 nothing is written.
pub async fn record_movement<S>(
    store: &mut S,
    request: &MovementRequest,
) -> Result<S::Movement, LedgerError>
where
    S: LedgerStore + ?Sized,
{
    validate_quantity(request.quantity)?;

    let stock = store
        .load_stock(request.product_id)
        .await?
        .ok_or(LedgerError::ProductNotFound {
            id: request.product_id,
        })?;

    let entry = plan_movement(request, stock)?;

    let movement = store.insert_movement(&entry).await?;
    store
        .write_balance(entry.product_id, entry.balance_after)
        .await?;

    Ok(movement)
}
