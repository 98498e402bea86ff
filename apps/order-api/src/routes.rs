//! # Route Handlers
//!
//! Each handler parses its input, calls the order service once and maps the
//! result. No business rules live here.

use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use tracing::{debug, info};

use depot_core::{OrderReceipt, OrderRequest};

use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// `POST /orders`
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<OrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<OrderReceipt>)> {
    let Json(request) = payload?;

    debug!(
        customer_id = request.customer_id,
        items = request.items.len(),
        "Order request received"
    );

    let receipt = state.orders.create_order(&request).await?;

    info!(order_id = receipt.id, "Order created");
    Ok((StatusCode::CREATED, Json(receipt)))
}

/// `GET /orders/{id}`
pub async fn get_order(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<OrderReceipt>> {
    let Path(id) = id?;

    state
        .orders
        .get_order(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Order", id))
}

/// Health check body.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: &'static str,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthResponse>) {
    if state.db().health_check().await {
        (
            StatusCode::OK,
            Json(HealthResponse {
                status: "healthy",
                database: "ok",
            }),
        )
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(HealthResponse {
                status: "unhealthy",
                database: "unavailable",
            }),
        )
    }
}

// =============================================================================
// Router Tests
// =============================================================================
