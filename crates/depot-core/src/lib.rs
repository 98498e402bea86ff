//! # depot-core: Order Orchestration for Depot
//!
//! This crate holds every decision the order flow makes: which request is
//! acceptable, which warehouse ships it, what it costs, and in which order
//! payment and persistence happen. It performs no I/O itself; storage and
//! the payment network are reached through traits.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Depot Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  apps/order-api (axum)                          │   │
//! │  │          POST /orders  ·  GET /orders/{id}  ·  GET /health      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ depot-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │  orders   │  │ warehouse │  │  payment  │  │    geo    │  │   │
//! │  │   │ Service   │─►│ Selector  │  │ Processor │  │ Geocoder  │  │   │
//! │  │   └─────┬─────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │         │ OrderGateway (trait)                                  │   │
//! │  └─────────┼───────────────────────────────────────────────────────┘   │
//! │            │                                                            │
//! │  ┌─────────▼───────────────────────────────────────────────────────┐   │
//! │  │                    depot-db (SQLite)                            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Product, Warehouse, Order, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`error`] - Order error taxonomy and validation errors
//! - [`validation`] - Request validation
//! - [`geo`] - Deterministic geocoder and haversine distance
//! - [`warehouse`] - Single-warehouse fulfillment selection
//! - [`payment`] - Payment processor port and stand-in
//! - [`gateway`] - Persistence port
//! - [`orders`] - The order orchestrator
//!
//! ## Example Usage
//!
//! ```rust
//! use depot_core::geo::{haversine_km, Geocoder, HashGeocoder};
//!
//! let geocoder = HashGeocoder;
//! let a = geocoder.geocode("1 Main St, Springfield, IL 62701, USA");
//! let b = geocoder.geocode("1 MAIN ST, SPRINGFIELD, IL 62701, USA");
//!
//! // Case-insensitive and deterministic
//! assert_eq!(a, b);
//! assert_eq!(haversine_km(a, b), 0.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod gateway;
pub mod geo;
pub mod money;
pub mod orders;
pub mod payment;
pub mod types;
pub mod validation;
pub mod warehouse;

#[cfg(test)]
mod testing;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{ErrorCategory, OrderError, OrderResult, ValidationError};
pub use gateway::{GatewayError, OrderGateway};
pub use money::Money;
pub use orders::OrderService;
pub use types::*;
