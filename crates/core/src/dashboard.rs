//! Dashboard aggregation over active products.
//!
//! The caller fetches active products, today's movement count and the
//! category count; everything else is computed here in memory.

use chrono::{NaiveTime, Utc};
use serde::Serialize;

use crate::types::Timestamp;

/// How many low-stock products the dashboard lists.
pub const LOW_STOCK_PREVIEW_LIMIT: usize = 5;

/// Anything that carries a current balance and a minimum threshold.
pub trait StockLevel {
    fn current_stock(&self) -> i32;
    fn min_stock(&self) -> i32;

    /// A product is low on stock when its balance is at or below the minimum.
    fn is_low_stock(&self) -> bool {
        self.current_stock() <= self.min_stock()
    }
}

/// Aggregated dashboard numbers plus a preview of low-stock products.
#[derive(Debug, Clone, Serialize)]
pub struct StockSummary<T: Serialize> {
    pub total_products: usize,
    pub low_stock_count: usize,
    pub movements_today: i64,
    pub category_count: i64,
    /// First [`LOW_STOCK_PREVIEW_LIMIT`] low-stock products, in input order.
    pub low_stock: Vec<T>,
}

/// Build the dashboard summary.
///
/// `active_products` should already be limited to active rows; ordering is
/// preserved in the preview list.
pub fn summarize<T>(
    active_products: Vec<T>,
    movements_today: i64,
    category_count: i64,
) -> StockSummary<T>
where
    T: StockLevel + Serialize,
{
    let total_products = active_products.len();
    let low: Vec<T> = active_products
        .into_iter()
        .filter(|p| p.is_low_stock())
        .collect();
    let low_stock_count = low.len();

    StockSummary {
        total_products,
        low_stock_count,
        movements_today,
        category_count,
        low_stock: low.into_iter().take(LOW_STOCK_PREVIEW_LIMIT).collect(),
    }
}

/// Midnight (UTC) of the day containing `now`. Movements at or after this
/// instant count as "today".
pub fn start_of_day(now: Timestamp) -> Timestamp {
    now.date_naive().and_time(NaiveTime::MIN).and_utc()
}

/// [`start_of_day`] for the current instant.
pub fn start_of_today() -> Timestamp {
    start_of_day(Utc::now())
}
