//! # Persistence Gateway
//!
//! The port through which the order flow reads reference data and writes
//! orders. depot-db implements it on top of SQLite; tests implement it in
//! memory.
//!
//! ## Contract
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Reads (steps 1-4)                    Write (step 7)                   │
//! │  ─────────────────                    ──────────────                   │
//! │  get_customer(id)                     insert_order_with_items(         │
//! │  get_products(ids)                        order, items)                │
//! │  get_inventory(product_ids)           ├── order row first              │
//! │  get_warehouses(ids)                  ├── then every item row          │
//! │                                       └── ALL OR NOTHING               │
//! │  Read-back                                                              │
//! │  get_order(id), get_order_items(id)                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Inventory is only read. Nothing here reserves or decrements stock.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::{
    Customer, InventoryEntry, NewOrder, NewOrderItem, Order, OrderItem, Product, Warehouse,
};

/// A storage failure, already rendered to a message by the adapter.
#[derive(Debug, Clone, Error)]
#[error("{0}")]
pub struct GatewayError(pub String);

impl GatewayError {
    pub fn new(message: impl Into<String>) -> Self {
        GatewayError(message.into())
    }
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

/// Storage operations the order flow needs.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    /// Looks up one customer.
    async fn get_customer(&self, id: i64) -> GatewayResult<Option<Customer>>;

    /// Looks up products by id. Ids with no row are simply absent from the
    /// result; order of the result is unspecified.
    async fn get_products(&self, ids: &[i64]) -> GatewayResult<Vec<Product>>;

    /// Every inventory row for any of the given products, across all
    /// warehouses.
    async fn get_inventory(&self, product_ids: &[i64]) -> GatewayResult<Vec<InventoryEntry>>;

    /// Looks up warehouses by id.
    async fn get_warehouses(&self, ids: &[i64]) -> GatewayResult<Vec<Warehouse>>;

    /// Writes the order and its items in one transaction and returns the
    /// stored order with its generated id and timestamp.
    ///
    /// If any item fails to insert, the order row must not survive.
    async fn insert_order_with_items(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> GatewayResult<(Order, Vec<OrderItem>)>;

    /// Reads back a committed order.
    async fn get_order(&self, id: i64) -> GatewayResult<Option<Order>>;

    /// Items of a committed order, in insertion order.
    async fn get_order_items(&self, order_id: i64) -> GatewayResult<Vec<OrderItem>>;
}

/// A failed lookup surfaces as a storage failure with nothing charged.
impl From<GatewayError> for crate::error::OrderError {
    fn from(err: GatewayError) -> Self {
        crate::error::OrderError::storage(err.0)
    }
}
