//! # Repository Module
//!
//! Database repository implementations for Depot.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  OrderGateway (gateway.rs)          seed bin / tests                   │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  CustomerRepository   get_by_id · insert · count                       │
//! │  ProductRepository    get_many · insert · update_price · count         │
//! │  WarehouseRepository  get_many · insert · set_stock · inventory_for    │
//! │  OrderRepository      insert_with_items (tx) · get_by_id · get_items   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`CustomerRepository`](customer::CustomerRepository) - Customers
//! - [`ProductRepository`](product::ProductRepository) - Catalog and prices
//! - [`WarehouseRepository`](warehouse::WarehouseRepository) - Warehouses and stock
//! - [`OrderRepository`](order::OrderRepository) - Orders and order items

pub mod customer;
pub mod order;
pub mod product;
pub mod warehouse;

/// `?, ?, ?` for an `IN (...)` list of `n` bound values.
///
/// Callers must not pass `0`; `IN ()` is a syntax error in SQLite.
pub(crate) fn in_placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}
