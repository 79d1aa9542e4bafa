use sqlx::PgPool;

/// Connect, migrate, verify the schema is in place.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_full_bootstrap(pool: PgPool) {
    stockroom_db::health_check(&pool).await.unwrap();

    for table in ["users", "user_sessions", "categories", "products", "movements"] {
        let count: (i64,) = sqlx::query_as(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(&pool)
            .await
            .unwrap_or_else(|e| panic!("{table} query failed: {e}"));
        assert_eq!(count.0, 0, "{table} should start empty");
    }
}

/// `updated_at` is maintained by trigger on mutable tables.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_updated_at_trigger(pool: PgPool) {
    let (id, created): (i64, chrono::DateTime<chrono::Utc>) =
        sqlx::query_as("INSERT INTO categories (name) VALUES ('Ferragens') RETURNING id, updated_at")
            .fetch_one(&pool)
            .await
            .unwrap();

    let (updated,): (chrono::DateTime<chrono::Utc>,) =
        sqlx::query_as("UPDATE categories SET name = 'Fixadores' WHERE id = $1 RETURNING updated_at")
            .bind(id)
            .fetch_one(&pool)
            .await
            .unwrap();

    assert!(updated >= created);
}

/// The balance may never be stored negative.
#[sqlx::test(migrations = "../../db/migrations")]
async fn test_negative_stock_rejected_by_schema(pool: PgPool) {
    let result = sqlx::query(
        "INSERT INTO products (name, code, current_stock) VALUES ('Porca', 'PRC-1', -1)",
    )
    .execute(&pool)
    .await;
    assert!(result.is_err());
}
