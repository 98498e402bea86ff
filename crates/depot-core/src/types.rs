//! # Domain Types
//!
//! Core domain types used throughout Depot.
//!
//! ## Type Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  Read-only reference data            Written by create_order           │
//! │  ─────────────────────────           ───────────────────────           │
//! │  Customer   (id, name, email)        Order     (id, customer_id,       │
//! │  Product    (id, name, price)                   warehouse_id, total,   │
//! │  Warehouse  (id, name, address,                 payment_id, status)    │
//! │              lat, lng)               OrderItem (order_id, product_id,  │
//! │  InventoryEntry                                 qty, unit price        │
//! │   (warehouse_id, product_id, qty)               SNAPSHOT)              │
//! │                                                                         │
//! │  Inbound: OrderRequest ──► OrderService ──► OrderReceipt :Outbound     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## References, Not Object Graphs
//! Entities point at each other through plain integer ids. Relationships
//! are resolved by explicit gateway lookups, never by lazy traversal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::money::Money;

// =============================================================================
// Reference Data
// =============================================================================

/// A customer who can place orders. Read-only for the order flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    pub name: String,
    /// Unique across customers.
    pub email: String,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,
    pub name: String,
    /// Current unit price in cents. Never negative; zero is a free item.
    pub price_cents: i64,
}

/// A point on the globe in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

/// A fulfillment location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    pub id: i64,
    pub name: String,
    /// Free-text postal address.
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Warehouse {
    /// Location of the warehouse.
    #[inline]
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }

    /// The slice of the warehouse shown to callers.
    pub fn summary(&self) -> WarehouseSummary {
        WarehouseSummary {
            id: self.id,
            name: self.name.clone(),
            address: self.address.clone(),
        }
    }
}

/// Current stock of one product at one warehouse.
///
/// Keyed by `(warehouse_id, product_id)`; has no identity of its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct InventoryEntry {
    pub warehouse_id: i64,
    pub product_id: i64,
    pub quantity: i64,
}

// =============================================================================
// Order Request (inbound)
// =============================================================================

/// Structured shipping address from the request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingAddress {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip: String,
    pub country: String,
}

impl ShippingAddress {
    /// Renders the one canonical string that is geocoded and stored.
    ///
    /// ## Format
    /// `"{street}, {city}, {state} {zip}, {country}"`
    pub fn to_canonical_string(&self) -> String {
        format!(
            "{}, {}, {} {}, {}",
            self.street, self.city, self.state, self.zip, self.country
        )
    }
}

/// Payment card data. Only the number reaches the payment processor.
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

impl CreditCard {
    /// Last four characters of the card number.
    pub fn last_four(&self) -> &str {
        let len = self.number.len();
        self.number.get(len.saturating_sub(4)..).unwrap_or("")
    }
}

/// Card data never appears in logs.
impl fmt::Debug for CreditCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CreditCard")
            .field("number", &format_args!("****{}", self.last_four()))
            .field("expiry", &self.expiry)
            .field("cvv", &"***")
            .finish()
    }
}

/// One requested line: a product and how many of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub product_id: i64,
    pub quantity: i64,
}

/// The full "create order" request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRequest {
    pub customer_id: i64,
    pub shipping_address: ShippingAddress,
    pub credit_card: CreditCard,
    /// Non-empty; product ids are expected to be unique.
    pub items: Vec<OrderItemRequest>,
}

// =============================================================================
// Order (persisted)
// =============================================================================

/// Lifecycle status of a persisted order.
///
/// An order row is only ever written once payment succeeded, so the only
/// state a stored order can be in is `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Confirmed,
}

/// An order ready to be written. Id and timestamp are assigned by storage.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    pub customer_id: i64,
    pub warehouse_id: i64,
    pub shipping_address: String,
    pub shipping_latitude: f64,
    pub shipping_longitude: f64,
    pub total_cents: i64,
    pub payment_id: String,
    pub status: OrderStatus,
}

/// A line ready to be written with its order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NewOrderItem {
    pub product_id: i64,
    pub quantity: i64,
    /// Product price captured when the order was placed.
    pub unit_price_cents: i64,
}

/// A committed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    pub id: i64,
    pub customer_id: i64,
    pub warehouse_id: i64,
    pub shipping_address: String,
    pub shipping_latitude: f64,
    pub shipping_longitude: f64,
    pub total_cents: i64,
    pub payment_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Returns the order total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

/// A committed order line.
///
/// Uses the snapshot pattern: `unit_price_cents` is frozen at order time and
/// does not follow later product price changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
}

impl OrderItem {
    /// Returns the snapshot unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }
}

// =============================================================================
// Order Receipt (outbound)
// =============================================================================

/// The warehouse as shown in a receipt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WarehouseSummary {
    pub id: i64,
    pub name: String,
    pub address: String,
}

/// One receipt line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItemDetail {
    pub product_id: i64,
    pub product_name: String,
    pub quantity: i64,
    /// Snapshot price, in dollars on the wire.
    #[serde(with = "crate::money::decimal")]
    pub unit_price: Money,
}

/// What the caller gets back for a confirmed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderReceipt {
    pub id: i64,
    pub customer_id: i64,
    pub warehouse: WarehouseSummary,
    pub shipping_address: String,
    /// Total, in dollars on the wire.
    #[serde(with = "crate::money::decimal")]
    pub total_amount: Money,
    pub payment_id: String,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub items: Vec<OrderItemDetail>,
}

// =============================================================================
// Unit Tests
// =============================================================================
