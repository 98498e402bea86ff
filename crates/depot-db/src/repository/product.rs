//! # Product Repository
//!
//! Catalog reads and price maintenance. Order items keep their own price
//! snapshot, so [`ProductRepository::update_price`] never touches history.

use sqlx::SqlitePool;
use tracing::debug;

use super::in_placeholders;
use crate::error::{DbError, DbResult};
use depot_core::Product;

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Gets every product whose id is in `ids`, ordered by id.
    ///
    /// Unknown ids are skipped; compare the result against the input to
    /// find them.
    pub async fn get_many(&self, ids: &[i64]) -> DbResult<Vec<Product>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, price_cents FROM products WHERE id IN ({}) ORDER BY id",
            in_placeholders(ids.len())
        );

        let mut query = sqlx::query_as::<_, Product>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Inserts a product and returns it with its generated id.
    ///
    /// ## Returns
    /// * `Err(DbError::CheckViolation)` - price is negative
    pub async fn insert(&self, name: &str, price_cents: i64) -> DbResult<Product> {
        debug!(name = %name, price_cents, "Inserting product");

        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, price_cents)
            VALUES (?1, ?2)
            RETURNING id, name, price_cents
            "#,
        )
        .bind(name)
        .bind(price_cents)
        .fetch_one(&self.pool)
        .await?;

        Ok(product)
    }

    /// Changes the current price of a product.
    ///
    /// Only future orders see the new price.
    pub async fn update_price(&self, id: i64, price_cents: i64) -> DbResult<()> {
        debug!(id, price_cents, "Updating product price");

        let result = sqlx::query("UPDATE products SET price_cents = ?2 WHERE id = ?1")
            .bind(id)
            .bind(price_cents)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
