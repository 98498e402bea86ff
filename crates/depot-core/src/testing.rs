//! In-memory collaborators for unit tests.

use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::gateway::{GatewayError, GatewayResult, OrderGateway};
use crate::money::Money;
use crate::payment::{PaymentProcessor, PaymentResult};
use crate::types::{
    Customer, InventoryEntry, NewOrder, NewOrderItem, Order, OrderItem, Product, Warehouse,
};

#[derive(Debug, Default)]
struct State {
    customers: Vec<Customer>,
    products: Vec<Product>,
    warehouses: Vec<Warehouse>,
    inventory: Vec<InventoryEntry>,
    orders: Vec<Order>,
    order_items: Vec<OrderItem>,
    fail_item_inserts: bool,
}

/// Vec-backed [`OrderGateway`] with builder-style seeding.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: Mutex<State>,
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn seed(self, f: impl FnOnce(&mut State)) -> Self {
        f(&mut self.state.lock().unwrap());
        self
    }

    pub fn with_customer(self, id: i64, name: &str, email: &str) -> Self {
        self.seed(|s| {
            s.customers.push(Customer {
                id,
                name: name.to_string(),
                email: email.to_string(),
            })
        })
    }

    pub fn with_product(self, id: i64, name: &str, price_cents: i64) -> Self {
        self.seed(|s| {
            s.products.push(Product {
                id,
                name: name.to_string(),
                price_cents,
            })
        })
    }

    pub fn with_warehouse(self, warehouse: Warehouse) -> Self {
        self.seed(|s| s.warehouses.push(warehouse))
    }

    pub fn with_warehouse_at(self, id: i64, name: &str, latitude: f64, longitude: f64) -> Self {
        self.with_warehouse(Warehouse {
            id,
            name: name.to_string(),
            address: format!("{} Depot Rd", id),
            latitude,
            longitude,
        })
    }

    pub fn with_stock(self, warehouse_id: i64, product_id: i64, quantity: i64) -> Self {
        self.seed(|s| {
            s.inventory.push(InventoryEntry {
                warehouse_id,
                product_id,
                quantity,
            })
        })
    }

    /// Makes every `insert_order_with_items` fail after the order row would
    /// have been written, to exercise rollback.
    pub fn failing_item_inserts(self) -> Self {
        self.seed(|s| s.fail_item_inserts = true)
    }

    pub fn set_price(&self, product_id: i64, price_cents: i64) {
        let mut state = self.state.lock().unwrap();
        if let Some(product) = state.products.iter_mut().find(|p| p.id == product_id) {
            product.price_cents = price_cents;
        }
    }

    pub fn order_count(&self) -> usize {
        self.state.lock().unwrap().orders.len()
    }

    pub fn order_item_count(&self) -> usize {
        self.state.lock().unwrap().order_items.len()
    }
}

#[async_trait]
impl OrderGateway for InMemoryGateway {
    async fn get_customer(&self, id: i64) -> GatewayResult<Option<Customer>> {
        let state = self.state.lock().unwrap();
        Ok(state.customers.iter().find(|c| c.id == id).cloned())
    }

    async fn get_products(&self, ids: &[i64]) -> GatewayResult<Vec<Product>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .cloned()
            .collect())
    }

    async fn get_inventory(&self, product_ids: &[i64]) -> GatewayResult<Vec<InventoryEntry>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .inventory
            .iter()
            .filter(|e| product_ids.contains(&e.product_id))
            .copied()
            .collect())
    }

    async fn get_warehouses(&self, ids: &[i64]) -> GatewayResult<Vec<Warehouse>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .warehouses
            .iter()
            .filter(|w| ids.contains(&w.id))
            .cloned()
            .collect())
    }

    async fn insert_order_with_items(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> GatewayResult<(Order, Vec<OrderItem>)> {
        let mut state = self.state.lock().unwrap();

        if state.fail_item_inserts {
            return Err(GatewayError::new("order_items insert failed"));
        }

        let order_id = state.orders.len() as i64 + 1;
        let stored = Order {
            id: order_id,
            customer_id: order.customer_id,
            warehouse_id: order.warehouse_id,
            shipping_address: order.shipping_address.clone(),
            shipping_latitude: order.shipping_latitude,
            shipping_longitude: order.shipping_longitude,
            total_cents: order.total_cents,
            payment_id: order.payment_id.clone(),
            status: order.status,
            created_at: Utc::now(),
        };

        let first_item_id = state.order_items.len() as i64 + 1;
        let stored_items: Vec<OrderItem> = items
            .iter()
            .enumerate()
            .map(|(i, item)| OrderItem {
                id: first_item_id + i as i64,
                order_id,
                product_id: item.product_id,
                quantity: item.quantity,
                unit_price_cents: item.unit_price_cents,
            })
            .collect();

        state.orders.push(stored.clone());
        state.order_items.extend(stored_items.iter().copied());

        Ok((stored, stored_items))
    }

    async fn get_order(&self, id: i64) -> GatewayResult<Option<Order>> {
        let state = self.state.lock().unwrap();
        Ok(state.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn get_order_items(&self, order_id: i64) -> GatewayResult<Vec<OrderItem>> {
        let state = self.state.lock().unwrap();
        Ok(state
            .order_items
            .iter()
            .filter(|i| i.order_id == order_id)
            .copied()
            .collect())
    }
}

/// Wraps a processor and remembers every charge it was asked to make.
#[derive(Debug, Default)]
pub struct RecordingProcessor<P> {
    inner: P,
    calls: Mutex<Vec<(Money, String)>>,
}

impl<P> RecordingProcessor<P> {
    pub fn new(inner: P) -> Self {
        RecordingProcessor {
            inner,
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn charges(&self) -> Vec<Money> {
        self.calls.lock().unwrap().iter().map(|(a, _)| *a).collect()
    }

    pub fn descriptions(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, d)| d.clone())
            .collect()
    }
}

#[async_trait]
impl<P: PaymentProcessor> PaymentProcessor for RecordingProcessor<P> {
    async fn charge(&self, card_number: &str, amount: Money, description: &str) -> PaymentResult {
        self.calls
            .lock()
            .unwrap()
            .push((amount, description.to_string()));
        self.inner.charge(card_number, amount, description).await
    }
}
