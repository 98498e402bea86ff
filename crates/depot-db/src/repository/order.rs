//! # Order Repository
//!
//! Committed orders and their items.
//!
//! ## Write Path
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  insert_with_items(order, items)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                 │
//! │   ├── INSERT orders ... RETURNING *          → order.id                │
//! │   ├── INSERT order_items (order.id, ...)     × each item               │
//! │   │        │                                                            │
//! │   │        └── any failure ──► tx dropped ──► ROLLBACK (no order row)  │
//! │  COMMIT                                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Orders are immutable once committed. There is no update or delete.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use depot_core::{NewOrder, NewOrderItem, Order, OrderItem};

const ORDER_COLUMNS: &str = "id, customer_id, warehouse_id, shipping_address, \
     shipping_latitude, shipping_longitude, total_cents, payment_id, status, created_at";

const ORDER_ITEM_COLUMNS: &str = "id, order_id, product_id, quantity, unit_price_cents";

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Writes an order and all of its items atomically.
    ///
    /// ## Returns
    /// * `Ok((Order, Vec<OrderItem>))` - committed rows with generated ids,
    ///   items in input order
    /// * `Err(DbError)` - nothing was written
    pub async fn insert_with_items(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> DbResult<(Order, Vec<OrderItem>)> {
        debug!(
            customer_id = order.customer_id,
            warehouse_id = order.warehouse_id,
            items = items.len(),
            "Inserting order"
        );

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        let insert_order = format!(
            r#"
            INSERT INTO orders (
                customer_id, warehouse_id, shipping_address,
                shipping_latitude, shipping_longitude,
                total_cents, payment_id, status, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            RETURNING {ORDER_COLUMNS}
            "#
        );

        let stored = sqlx::query_as::<_, Order>(&insert_order)
            .bind(order.customer_id)
            .bind(order.warehouse_id)
            .bind(&order.shipping_address)
            .bind(order.shipping_latitude)
            .bind(order.shipping_longitude)
            .bind(order.total_cents)
            .bind(&order.payment_id)
            .bind(order.status)
            .bind(Utc::now())
            .fetch_one(&mut *tx)
            .await?;

        let insert_item = format!(
            r#"
            INSERT INTO order_items (order_id, product_id, quantity, unit_price_cents)
            VALUES (?1, ?2, ?3, ?4)
            RETURNING {ORDER_ITEM_COLUMNS}
            "#
        );

        let mut stored_items = Vec::with_capacity(items.len());
        for item in items {
            let stored_item = sqlx::query_as::<_, OrderItem>(&insert_item)
                .bind(stored.id)
                .bind(item.product_id)
                .bind(item.quantity)
                .bind(item.unit_price_cents)
                .fetch_one(&mut *tx)
                .await?;
            stored_items.push(stored_item);
        }

        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

        debug!(order_id = stored.id, "Order committed");
        Ok((stored, stored_items))
    }

    /// Gets an order by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Order>> {
        let sql = format!("SELECT {ORDER_COLUMNS} FROM orders WHERE id = ?1");

        let order = sqlx::query_as::<_, Order>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(order)
    }

    /// Gets the items of an order in insertion order.
    pub async fn get_items(&self, order_id: i64) -> DbResult<Vec<OrderItem>> {
        let sql = format!("SELECT {ORDER_ITEM_COLUMNS} FROM order_items WHERE order_id = ?1 ORDER BY id");

        let items = sqlx::query_as::<_, OrderItem>(&sql)
            .bind(order_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(items)
    }

    /// Counts orders (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM orders")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    /// Counts order items across all orders.
    pub async fn count_items(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM order_items")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use depot_core::{NewOrder, NewOrderItem, OrderStatus};

    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};

    /// One customer, one warehouse, two products.
    async fn setup() -> (Database, i64, i64, i64, i64) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = db.customers().insert("Bob Smith", "bob@example.com").await.unwrap();
        let warehouse = db
            .warehouses()
            .insert("Central Warehouse", "456 Commerce St", 32.7767, -96.7970)
            .await
            .unwrap();
        let laptop = db.products().insert("Laptop", 99_999).await.unwrap();
        let mouse = db.products().insert("Wireless Mouse", 2_999).await.unwrap();
        (db, customer.id, warehouse.id, laptop.id, mouse.id)
    }

    fn new_order(customer_id: i64, warehouse_id: i64, total_cents: i64) -> NewOrder {
        NewOrder {
            customer_id,
            warehouse_id,
            shipping_address: "1 Main St, Springfield, IL 62701, USA".to_string(),
            shipping_latitude: 39.78,
            shipping_longitude: -89.65,
            total_cents,
            payment_id: "pay_0123456789abcdef".to_string(),
            status: OrderStatus::Confirmed,
        }
    }

    #[tokio::test]
    async fn test_insert_and_read_back() {
        let (db, customer_id, warehouse_id, laptop, mouse) = setup().await;

        let items = [
            NewOrderItem { product_id: laptop, quantity: 1, unit_price_cents: 99_999 },
            NewOrderItem { product_id: mouse, quantity: 3, unit_price_cents: 2_999 },
        ];
        let (order, stored_items) = db
            .orders()
            .insert_with_items(&new_order(customer_id, warehouse_id, 108_996), &items)
            .await
            .unwrap();

        assert!(order.id > 0);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(stored_items.len(), 2);
        assert!(stored_items.iter().all(|i| i.order_id == order.id));

        let loaded = db.orders().get_by_id(order.id).await.unwrap().unwrap();
        assert_eq!(loaded.total_cents, 108_996);
        assert_eq!(loaded.payment_id, "pay_0123456789abcdef");
        assert_eq!(loaded.created_at, order.created_at);

        let loaded_items = db.orders().get_items(order.id).await.unwrap();
        assert_eq!(loaded_items, stored_items);
        assert_eq!(loaded_items[1].quantity, 3);
    }

    #[tokio::test]
    async fn test_failed_item_rolls_back_order() {
        let (db, customer_id, warehouse_id, laptop, _) = setup().await;

        let items = [
            NewOrderItem { product_id: laptop, quantity: 1, unit_price_cents: 99_999 },
            // No such product: the FK check fails on the second row
            NewOrderItem { product_id: 4040, quantity: 1, unit_price_cents: 100 },
        ];
        let err = db
            .orders()
            .insert_with_items(&new_order(customer_id, warehouse_id, 100_099), &items)
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ForeignKeyViolation { .. }));
        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(db.orders().count_items().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_order() {
        let (db, ..) = setup().await;
        assert!(db.orders().get_by_id(1).await.unwrap().is_none());
        assert!(db.orders().get_items(1).await.unwrap().is_empty());
    }
}
