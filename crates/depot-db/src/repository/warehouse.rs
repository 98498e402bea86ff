//! # Warehouse Repository
//!
//! Warehouses and the per-(warehouse, product) stock table.
//!
//! ## Inventory Shape
//! ```text
//! ┌──────────────┬────────────┬──────────┐
//! │ warehouse_id │ product_id │ quantity │   one row per pair
//! ├──────────────┼────────────┼──────────┤   no row = not stocked
//! │      1       │     1      │    50    │   quantity >= 0
//! │      1       │     2      │   200    │
//! │      2       │     1      │    30    │
//! └──────────────┴────────────┴──────────┘
//! ```
//!
//! The order flow only reads stock. [`WarehouseRepository::set_stock`] is
//! for seeding and replenishment.

use sqlx::SqlitePool;
use tracing::debug;

use super::in_placeholders;
use crate::error::DbResult;
use depot_core::{InventoryEntry, Warehouse};

/// Repository for warehouse and inventory operations.
#[derive(Debug, Clone)]
pub struct WarehouseRepository {
    pool: SqlitePool,
}

impl WarehouseRepository {
    /// Creates a new WarehouseRepository.
    pub fn new(pool: SqlitePool) -> Self {
        WarehouseRepository { pool }
    }

    /// Gets every warehouse whose id is in `ids`, ordered by id.
    pub async fn get_many(&self, ids: &[i64]) -> DbResult<Vec<Warehouse>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT id, name, address, latitude, longitude FROM warehouses \
             WHERE id IN ({}) ORDER BY id",
            in_placeholders(ids.len())
        );

        let mut query = sqlx::query_as::<_, Warehouse>(&sql);
        for id in ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }

    /// Inserts a warehouse and returns it with its generated id.
    pub async fn insert(
        &self,
        name: &str,
        address: &str,
        latitude: f64,
        longitude: f64,
    ) -> DbResult<Warehouse> {
        debug!(name = %name, "Inserting warehouse");

        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            INSERT INTO warehouses (name, address, latitude, longitude)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING id, name, address, latitude, longitude
            "#,
        )
        .bind(name)
        .bind(address)
        .bind(latitude)
        .bind(longitude)
        .fetch_one(&self.pool)
        .await?;

        Ok(warehouse)
    }

    /// Sets the stock of a product at a warehouse, creating the row if
    /// needed.
    ///
    /// ## Returns
    /// * `Err(DbError::ForeignKeyViolation)` - unknown warehouse or product
    /// * `Err(DbError::CheckViolation)` - negative quantity
    pub async fn set_stock(&self, warehouse_id: i64, product_id: i64, quantity: i64) -> DbResult<()> {
        debug!(warehouse_id, product_id, quantity, "Setting stock");

        sqlx::query(
            r#"
            INSERT INTO inventory (warehouse_id, product_id, quantity)
            VALUES (?1, ?2, ?3)
            ON CONFLICT (warehouse_id, product_id) DO UPDATE SET quantity = excluded.quantity
            "#,
        )
        .bind(warehouse_id)
        .bind(product_id)
        .bind(quantity)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Every inventory row for any of `product_ids`, across all warehouses.
    pub async fn inventory_for(&self, product_ids: &[i64]) -> DbResult<Vec<InventoryEntry>> {
        if product_ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!(
            "SELECT warehouse_id, product_id, quantity FROM inventory \
             WHERE product_id IN ({}) ORDER BY warehouse_id, product_id",
            in_placeholders(product_ids.len())
        );

        let mut query = sqlx::query_as::<_, InventoryEntry>(&sql);
        for id in product_ids {
            query = query.bind(*id);
        }

        Ok(query.fetch_all(&self.pool).await?)
    }
}
