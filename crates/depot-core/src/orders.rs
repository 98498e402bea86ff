//! # Order Orchestrator
//!
//! Sequences validation, warehouse selection, payment and persistence into
//! one logical transaction.
//!
//! ## create_order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  0. validate request            ─✗─► InvalidRequest                    │
//! │  1. get_customer                ─✗─► CustomerNotFound                  │
//! │  2. get_products (all ids)      ─✗─► ProductsNotFound [every missing]  │
//! │  3. canonical address → geocode                                        │
//! │  4. select_warehouse            ─✗─► NoWarehouseAvailable              │
//! │  5. total = Σ price × qty   (prices from step 2, never re-read)        │
//! │  6. charge                      ─✗─► PaymentFailed(reason)             │
//! │  ───────────── nothing written above this line ──────────────          │
//! │  7. insert_order_with_items     ─✗─► Storage (charge NOT reversed)     │
//! │  8. compose receipt                                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Steps 1-6 only read. Step 7 is the one mutation and is atomic in the
//! gateway. There is no idempotency key: retrying a request whose charge
//! succeeded charges again.

use std::collections::HashMap;

use tracing::{debug, error, info, warn};

use crate::error::{OrderError, OrderResult};
use crate::gateway::OrderGateway;
use crate::geo::Geocoder;
use crate::money::Money;
use crate::payment::PaymentProcessor;
use crate::types::{
    NewOrder, NewOrderItem, Order, OrderItem, OrderItemDetail, OrderReceipt, OrderRequest,
    OrderStatus, Product, Warehouse,
};
use crate::validation::validate_order_request;
use crate::warehouse::{select_warehouse, RequiredItems};

/// The order orchestrator.
///
/// Generic over its three collaborators so that storage, geocoding and the
/// card network can each be swapped without touching this code.
#[derive(Debug, Clone)]
pub struct OrderService<G, Geo, P> {
    gateway: G,
    geocoder: Geo,
    payments: P,
}

impl<G, Geo, P> OrderService<G, Geo, P>
where
    G: OrderGateway,
    Geo: Geocoder,
    P: PaymentProcessor,
{
    pub fn new(gateway: G, geocoder: Geo, payments: P) -> Self {
        OrderService {
            gateway,
            geocoder,
            payments,
        }
    }

    /// The storage gateway this service writes through.
    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    /// Creates, charges and persists an order.
    ///
    /// ## Returns
    /// * `Ok(OrderReceipt)` - the order is committed and `confirmed`
    /// * `Err(OrderError)` - see the module table; nothing is written on
    ///   any error except a `Storage` error raised by step 7 itself, which
    ///   leaves no partial order behind either
    pub async fn create_order(&self, request: &OrderRequest) -> OrderResult<OrderReceipt> {
        validate_order_request(request)?;

        // 1. Customer
        let customer = self
            .gateway
            .get_customer(request.customer_id)
            .await?
            .ok_or_else(|| {
                warn!(customer_id = request.customer_id, "Order rejected: unknown customer");
                OrderError::CustomerNotFound(request.customer_id)
            })?;

        // 2. Products, with their prices as of now
        let product_ids: Vec<i64> = request.items.iter().map(|i| i.product_id).collect();
        let products: HashMap<i64, Product> = self
            .gateway
            .get_products(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        let missing: Vec<i64> = product_ids
            .iter()
            .copied()
            .filter(|id| !products.contains_key(id))
            .collect();
        if !missing.is_empty() {
            warn!(missing = ?missing, "Order rejected: unknown products");
            return Err(OrderError::ProductsNotFound(missing));
        }

        // 3. Where it ships
        let shipping_address = request.shipping_address.to_canonical_string();
        let ship_to = self.geocoder.geocode(&shipping_address);
        debug!(
            latitude = ship_to.latitude,
            longitude = ship_to.longitude,
            "Shipping address geocoded"
        );

        // 4. Who ships it
        let required = RequiredItems::from_lines(&request.items);
        let selection = select_warehouse(&self.gateway, &required, ship_to)
            .await?
            .ok_or_else(|| {
                warn!(products = ?product_ids, "Order rejected: no warehouse covers all items");
                OrderError::NoWarehouseAvailable
            })?;
        debug!(
            warehouse_id = selection.warehouse.id,
            distance_km = selection.distance_km,
            "Warehouse selected"
        );

        // 5. What it costs, from the snapshot taken in step 2
        let lines: Vec<NewOrderItem> = request
            .items
            .iter()
            .map(|item| NewOrderItem {
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: products[&item.product_id].price_cents,
            })
            .collect();
        let total: Money = lines
            .iter()
            .map(|line| Money::from_cents(line.unit_price_cents).multiply_quantity(line.quantity))
            .sum();

        // 6. Charge
        let description = format!(
            "Order for customer {}: {} items",
            customer.id,
            request.items.len()
        );
        let payment = self
            .payments
            .charge(&request.credit_card.number, total, &description)
            .await;

        let payment_id = match (payment.success, payment.payment_id) {
            (true, Some(id)) => id,
            (_, _) => {
                let reason = payment
                    .error_message
                    .unwrap_or_else(|| "Unknown error".to_string());
                warn!(
                    customer_id = customer.id,
                    card = %request.credit_card.last_four(),
                    reason = %reason,
                    "Order rejected: payment failed"
                );
                return Err(OrderError::PaymentFailed(reason));
            }
        };

        // 7. Persist, all or nothing
        let new_order = NewOrder {
            customer_id: customer.id,
            warehouse_id: selection.warehouse.id,
            shipping_address,
            shipping_latitude: ship_to.latitude,
            shipping_longitude: ship_to.longitude,
            total_cents: total.cents(),
            payment_id: payment_id.clone(),
            status: OrderStatus::Confirmed,
        };

        let (order, items) = self
            .gateway
            .insert_order_with_items(&new_order, &lines)
            .await
            .map_err(|e| {
                error!(
                    payment_id = %payment_id,
                    customer_id = customer.id,
                    total = %total,
                    error = %e,
                    "Order write failed after successful charge"
                );
                OrderError::Storage {
                    message: e.to_string(),
                    payment_id: Some(payment_id.clone()),
                }
            })?;

        info!(
            order_id = order.id,
            customer_id = order.customer_id,
            warehouse_id = order.warehouse_id,
            total = %total,
            payment_id = %order.payment_id,
            "Order confirmed"
        );

        // 8. Receipt
        Ok(compose_receipt(order, &items, &selection.warehouse, &products))
    }

    /// Reads back a committed order as a receipt.
    ///
    /// Product names are the current names; quantities and prices are the
    /// stored snapshot.
    pub async fn get_order(&self, id: i64) -> OrderResult<Option<OrderReceipt>> {
        let Some(order) = self.gateway.get_order(id).await? else {
            return Ok(None);
        };

        let items = self.gateway.get_order_items(order.id).await?;

        let warehouse = self
            .gateway
            .get_warehouses(&[order.warehouse_id])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| {
                OrderError::storage(format!(
                    "Warehouse {} referenced by order {} is missing",
                    order.warehouse_id, order.id
                ))
            })?;

        let product_ids: Vec<i64> = items.iter().map(|i| i.product_id).collect();
        let products: HashMap<i64, Product> = self
            .gateway
            .get_products(&product_ids)
            .await?
            .into_iter()
            .map(|p| (p.id, p))
            .collect();

        Ok(Some(compose_receipt(order, &items, &warehouse, &products)))
    }
}

fn compose_receipt(
    order: Order,
    items: &[OrderItem],
    warehouse: &Warehouse,
    products: &HashMap<i64, Product>,
) -> OrderReceipt {
    let items = items
        .iter()
        .map(|item| OrderItemDetail {
            product_id: item.product_id,
            product_name: products
                .get(&item.product_id)
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            quantity: item.quantity,
            unit_price: item.unit_price(),
        })
        .collect();

    OrderReceipt {
        id: order.id,
        customer_id: order.customer_id,
        warehouse: warehouse.summary(),
        shipping_address: order.shipping_address.clone(),
        total_amount: order.total(),
        payment_id: order.payment_id.clone(),
        status: order.status,
        created_at: order.created_at,
        items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
