//! Repository for the `products` table.

use sqlx::PgPool;
use stockroom_core::catalog::search_pattern;
use stockroom_core::types::DbId;

use crate::models::product::{CreateProduct, Product, ProductListParams, UpdateProduct};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, code, category_id, description, product_type, material, size, \
                       weight, unit_of_measure, current_stock, min_stock, unit_price, location, \
                       is_active, created_at, updated_at";

/// Provides CRUD operations for catalog products.
///
/// `current_stock` is normally owned by the ledger; `create` and `update`
/// write it directly only because the catalog form carries it.
pub struct ProductRepo;

impl ProductRepo {
    /// Insert a new product, returning the created row.
    ///
    /// Expects a [`CreateProduct::normalized`] input; absent numbers fall
    /// back to the column defaults via `COALESCE`.
    pub async fn create(pool: &PgPool, input: &CreateProduct) -> Result<Product, sqlx::Error> {
        let query = format!(
            "INSERT INTO products
                (name, code, category_id, description, product_type, material, size, weight,
                 unit_of_measure, current_stock, min_stock, unit_price, location, is_active)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8,
                     COALESCE($9, 'unidade'), COALESCE($10, 0), COALESCE($11, 10),
                     $12, $13, COALESCE($14, true))
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.category_id)
            .bind(&input.description)
            .bind(&input.product_type)
            .bind(&input.material)
            .bind(&input.size)
            .bind(input.weight)
            .bind(&input.unit_of_measure)
            .bind(input.current_stock)
            .bind(input.min_stock)
            .bind(input.unit_price)
            .bind(&input.location)
            .bind(input.is_active)
            .fetch_one(pool)
            .await
    }

    /// Find a product by its internal ID.
    pub async fn find_by_id(pool: &PgPool, id: DbId) -> Result<Option<Product>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM products WHERE id = $1");
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List products ordered by name.
    ///
    /// `search` matches name, code, or product type case-insensitively;
    /// `active_only` hides deactivated products.
    pub async fn list(
        pool: &PgPool,
        params: &ProductListParams,
    ) -> Result<Vec<Product>, sqlx::Error> {
        let pattern = params.search.as_deref().and_then(search_pattern);
        let query = format!(
            "SELECT {COLUMNS} FROM products
             WHERE ($1::TEXT IS NULL
                    OR name ILIKE $1
                    OR code ILIKE $1
                    OR product_type ILIKE $1)
               AND ($2 = false OR is_active = true)
             ORDER BY name ASC, id ASC"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(pattern)
            .bind(params.active_only)
            .fetch_all(pool)
            .await
    }

    /// All active products ordered by name. Feeds the dashboard.
    pub async fn list_active(pool: &PgPool) -> Result<Vec<Product>, sqlx::Error> {
        let query =
            format!("SELECT {COLUMNS} FROM products WHERE is_active = true ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Product>(&query).fetch_all(pool).await
    }

    /// Replace every editable field of a product.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        input: &UpdateProduct,
    ) -> Result<Option<Product>, sqlx::Error> {
        let query = format!(
            "UPDATE products SET
                name = $2,
                code = $3,
                category_id = $4,
                description = $5,
                product_type = $6,
                material = $7,
                size = $8,
                weight = $9,
                unit_of_measure = COALESCE($10, 'unidade'),
                current_stock = $11,
                min_stock = $12,
                unit_price = $13,
                location = $14,
                is_active = COALESCE($15, true)
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Product>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.code)
            .bind(input.category_id)
            .bind(&input.description)
            .bind(&input.product_type)
            .bind(&input.material)
            .bind(&input.size)
            .bind(input.weight)
            .bind(&input.unit_of_measure)
            .bind(input.current_stock)
            .bind(input.min_stock)
            .bind(input.unit_price)
            .bind(&input.location)
            .bind(input.is_active)
            .fetch_optional(pool)
            .await
    }

    /// Hard-delete a product. Its movements survive with `product_id = NULL`.
    ///
    /// Returns `true` if a row was removed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
