//! Product entity model and DTOs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use stockroom_core::catalog::{
    normalize_optional, ProductRules, DEFAULT_MIN_STOCK, DEFAULT_UNIT_OF_MEASURE,
};
use stockroom_core::dashboard::StockLevel;
use stockroom_core::types::{DbId, Timestamp};

/// A product row from the `products` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Product {
    pub id: DbId,
    pub name: String,
    pub code: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub weight: Option<Decimal>,
    pub unit_of_measure: String,
    pub current_stock: i32,
    pub min_stock: i32,
    pub unit_price: Option<Decimal>,
    pub location: Option<String>,
    pub is_active: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl StockLevel for Product {
    fn current_stock(&self) -> i32 {
        self.current_stock
    }

    fn min_stock(&self) -> i32 {
        self.min_stock
    }
}

/// DTO for creating a product.
///
/// Omitted numbers fall back to the catalog defaults (`current_stock = 0`,
/// `min_stock = 10`); an omitted unit falls back to `"unidade"`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProduct {
    pub name: String,
    pub code: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub weight: Option<Decimal>,
    pub unit_of_measure: Option<String>,
    pub current_stock: Option<i32>,
    pub min_stock: Option<i32>,
    pub unit_price: Option<Decimal>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

impl CreateProduct {
    /// Trim text fields, drop blank optionals, and fill in catalog defaults.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            category_id: self.category_id,
            description: normalize_optional(self.description),
            product_type: normalize_optional(self.product_type),
            material: normalize_optional(self.material),
            size: normalize_optional(self.size),
            weight: self.weight,
            unit_of_measure: Some(
                normalize_optional(self.unit_of_measure)
                    .unwrap_or_else(|| DEFAULT_UNIT_OF_MEASURE.to_string()),
            ),
            current_stock: Some(self.current_stock.unwrap_or(0)),
            min_stock: Some(self.min_stock.unwrap_or(DEFAULT_MIN_STOCK)),
            unit_price: self.unit_price,
            location: normalize_optional(self.location),
            is_active: Some(self.is_active.unwrap_or(true)),
        }
    }

    pub fn rules(&self) -> ProductRules<'_> {
        ProductRules {
            name: &self.name,
            code: &self.code,
            current_stock: self.current_stock.unwrap_or(0),
            min_stock: self.min_stock.unwrap_or(DEFAULT_MIN_STOCK),
            unit_price: self.unit_price,
            weight: self.weight,
        }
    }
}

/// DTO for replacing a product.
///
/// This is a full replacement: every optional field that is absent is
/// written as NULL. `unit_of_measure` falls back to `"unidade"` and
/// `is_active` to `true` because those columns are NOT NULL.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateProduct {
    pub name: String,
    pub code: String,
    pub category_id: Option<DbId>,
    pub description: Option<String>,
    pub product_type: Option<String>,
    pub material: Option<String>,
    pub size: Option<String>,
    pub weight: Option<Decimal>,
    pub unit_of_measure: Option<String>,
    pub current_stock: i32,
    pub min_stock: i32,
    pub unit_price: Option<Decimal>,
    pub location: Option<String>,
    pub is_active: Option<bool>,
}

impl UpdateProduct {
    /// Trim text fields and drop blank optionals. Absent optionals stay
    /// `None` and are written as NULL.
    pub fn normalized(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: normalize_optional(self.description),
            product_type: normalize_optional(self.product_type),
            material: normalize_optional(self.material),
            size: normalize_optional(self.size),
            unit_of_measure: Some(
                normalize_optional(self.unit_of_measure)
                    .unwrap_or_else(|| DEFAULT_UNIT_OF_MEASURE.to_string()),
            ),
            location: normalize_optional(self.location),
            is_active: Some(self.is_active.unwrap_or(true)),
            ..self
        }
    }

    pub fn rules(&self) -> ProductRules<'_> {
        ProductRules {
            name: &self.name,
            code: &self.code,
            current_stock: self.current_stock,
            min_stock: self.min_stock,
            unit_price: self.unit_price,
            weight: self.weight,
        }
    }
}

/// Query parameters for listing products.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductListParams {
    /// Case-insensitive substring match on name, code, or product type.
    pub search: Option<String>,
    /// Only return active products.
    #[serde(default)]
    pub active_only: bool,
}
