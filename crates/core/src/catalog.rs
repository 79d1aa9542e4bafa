//! Product catalog rules shared by create and update.

use rust_decimal::Decimal;

use crate::error::CoreError;

/// Minimum stock applied to new products when none is given.
pub const DEFAULT_MIN_STOCK: i32 = 10;

/// Unit of measure applied to new products when none is given.
pub const DEFAULT_UNIT_OF_MEASURE: &str = "unidade";

/// The fields of a product payload that carry validation rules.
#[derive(Debug, Clone, Copy)]
pub struct ProductRules<'a> {
    pub name: &'a str,
    pub code: &'a str,
    pub current_stock: i32,
    pub min_stock: i32,
    pub unit_price: Option<Decimal>,
    pub weight: Option<Decimal>,
}

/// Validate a product payload before it reaches the store.
pub fn validate_product(rules: &ProductRules<'_>) -> Result<(), CoreError> {
    require_non_blank(rules.name, "name")?;
    require_non_blank(rules.code, "code")?;

    if rules.current_stock < 0 {
        return Err(CoreError::validation(format!(
            "current_stock must not be negative, got {}",
            rules.current_stock
        )));
    }
    if rules.min_stock < 0 {
        return Err(CoreError::validation(format!(
            "min_stock must not be negative, got {}",
            rules.min_stock
        )));
    }
    require_non_negative(rules.unit_price, "unit_price")?;
    require_non_negative(rules.weight, "weight")?;
    Ok(())
}

/// Trim an optional text field, mapping blank input to `None`.
pub fn normalize_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Build an `ILIKE` substring pattern for a free-text search term.
///
/// Returns `None` for a blank term. `%`, `_` and `\` in the term are escaped
/// so they match literally.
pub fn search_pattern(term: &str) -> Option<String> {
    let term = term.trim();
    if term.is_empty() {
        return None;
    }
    let mut escaped = String::with_capacity(term.len() + 2);
    escaped.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    Some(escaped)
}

fn require_non_blank(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::validation(format!("{field} is required")));
    }
    Ok(())
}

fn require_non_negative(value: Option<Decimal>, field: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if v < Decimal::ZERO => Err(CoreError::validation(format!(
            "{field} must not be negative, got {v}"
        ))),
        _ => Ok(()),
    }
}
