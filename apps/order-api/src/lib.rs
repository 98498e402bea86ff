//! # Depot Order API
//!
//! HTTP surface over [`OrderService`].
//!
//! ## Routes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  POST /orders        OrderRequest JSON  → 201 OrderReceipt             │
//! │  GET  /orders/{id}                      → 200 OrderReceipt | 404       │
//! │  GET  /health                           → 200 healthy | 503 unhealthy  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
pub mod error;
pub mod routes;

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;

use depot_core::geo::HashGeocoder;
use depot_core::payment::MockPaymentProcessor;
use depot_core::OrderService;
use depot_db::Database;

/// The order service as wired for this binary.
pub type DepotOrderService = OrderService<Database, HashGeocoder, MockPaymentProcessor>;

/// Shared application state.
#[derive(Debug, Clone)]
pub struct AppState {
    pub orders: Arc<DepotOrderService>,
}

impl AppState {
    pub fn new(db: Database) -> Self {
        AppState {
            orders: Arc::new(OrderService::new(db, HashGeocoder, MockPaymentProcessor)),
        }
    }

    pub fn db(&self) -> &Database {
        self.orders.gateway()
    }
}

/// Builds the router with all routes bound to `state`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/orders", post(routes::create_order))
        .route("/orders/{id}", get(routes::get_order))
        .route("/health", get(routes::health))
        .with_state(state)
}
