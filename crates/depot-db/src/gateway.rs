//! # OrderGateway for SQLite
//!
//! Connects the order flow in depot-core to the repositories. Every method
//! is a thin delegation; [`DbError`](crate::DbError) is rendered into a
//! [`GatewayError`] at this boundary.

use async_trait::async_trait;

use crate::pool::Database;
use depot_core::gateway::{GatewayResult, OrderGateway};
use depot_core::{
    Customer, InventoryEntry, NewOrder, NewOrderItem, Order, OrderItem, Product, Warehouse,
};

#[async_trait]
impl OrderGateway for Database {
    async fn get_customer(&self, id: i64) -> GatewayResult<Option<Customer>> {
        Ok(self.customers().get_by_id(id).await?)
    }

    async fn get_products(&self, ids: &[i64]) -> GatewayResult<Vec<Product>> {
        Ok(self.products().get_many(ids).await?)
    }

    async fn get_inventory(&self, product_ids: &[i64]) -> GatewayResult<Vec<InventoryEntry>> {
        Ok(self.warehouses().inventory_for(product_ids).await?)
    }

    async fn get_warehouses(&self, ids: &[i64]) -> GatewayResult<Vec<Warehouse>> {
        Ok(self.warehouses().get_many(ids).await?)
    }

    async fn insert_order_with_items(
        &self,
        order: &NewOrder,
        items: &[NewOrderItem],
    ) -> GatewayResult<(Order, Vec<OrderItem>)> {
        Ok(self.orders().insert_with_items(order, items).await?)
    }

    async fn get_order(&self, id: i64) -> GatewayResult<Option<Order>> {
        Ok(self.orders().get_by_id(id).await?)
    }

    async fn get_order_items(&self, order_id: i64) -> GatewayResult<Vec<OrderItem>> {
        Ok(self.orders().get_items(order_id).await?)
    }
}

// =============================================================================
// Integration Tests (OrderService over SQLite)
// =============================================================================

#[cfg(test)]
mod tests {
    use depot_core::geo::{Geocoder, HashGeocoder};
    use depot_core::payment::MockPaymentProcessor;
    use depot_core::{
        CreditCard, ErrorCategory, Money, OrderError, OrderItemRequest, OrderRequest,
        OrderService, OrderStatus, ShippingAddress,
    };

    use crate::pool::{Database, DbConfig};
    use crate::seed::seed_development_data;

    type Service = OrderService<Database, HashGeocoder, MockPaymentProcessor>;

    async fn seeded() -> (Database, Service) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        seed_development_data(&db).await.unwrap();
        let service = OrderService::new(db.clone(), HashGeocoder, MockPaymentProcessor);
        (db, service)
    }

    fn request(customer_id: i64, card: &str, items: &[(i64, i64)]) -> OrderRequest {
        OrderRequest {
            customer_id,
            shipping_address: ShippingAddress {
                street: "1600 Pennsylvania Ave NW".to_string(),
                city: "Washington".to_string(),
                state: "DC".to_string(),
                zip: "20500".to_string(),
                country: "USA".to_string(),
            },
            credit_card: CreditCard {
                number: card.to_string(),
                expiry: "08/29".to_string(),
                cvv: "321".to_string(),
            },
            items: items
                .iter()
                .map(|&(product_id, quantity)| OrderItemRequest { product_id, quantity })
                .collect(),
        }
    }

    #[tokio::test]
    async fn test_order_is_persisted_with_snapshot() {
        let (db, service) = seeded().await;

        // Keyboard (5) is not stocked at Central, so West or East Coast ships
        let receipt = service
            .create_order(&request(1, "4111111111111111", &[(1, 2), (5, 1)]))
            .await
            .unwrap();

        assert_eq!(receipt.total_amount, Money::from_cents(2 * 99_999 + 14_999));
        assert_ne!(receipt.warehouse.id, 2);
        assert_eq!(receipt.status, OrderStatus::Confirmed);
        assert_eq!(receipt.items.len(), 2);
        assert_eq!(receipt.items[1].product_name, "Mechanical Keyboard");

        let stored = db.orders().get_by_id(receipt.id).await.unwrap().unwrap();
        let expected = HashGeocoder.geocode(&receipt.shipping_address);
        assert_eq!(stored.shipping_latitude, expected.latitude);
        assert_eq!(stored.shipping_longitude, expected.longitude);
        assert_eq!(stored.payment_id, receipt.payment_id);

        // Later price change does not touch the stored order
        db.products().update_price(1, 89_999).await.unwrap();
        let reread = service.get_order(receipt.id).await.unwrap().unwrap();
        assert_eq!(reread.total_amount, receipt.total_amount);
        assert_eq!(reread.items[0].unit_price, Money::from_cents(99_999));
        assert_eq!(reread.created_at, receipt.created_at);
    }

    #[tokio::test]
    async fn test_free_item_alongside_paid_item() {
        let (db, service) = seeded().await;
        let sticker = db.products().insert("Sticker", 0).await.unwrap();
        for warehouse_id in 1..=3 {
            db.warehouses().set_stock(warehouse_id, sticker.id, 100).await.unwrap();
        }

        let receipt = service
            .create_order(&request(1, "4111111111111111", &[(1, 1), (sticker.id, 2)]))
            .await
            .unwrap();

        assert_eq!(receipt.total_amount, Money::from_cents(99_999));
        assert_eq!(receipt.items[1].unit_price, Money::zero());

        let items = db.orders().get_items(receipt.id).await.unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[1].unit_price_cents, 0);
    }

    #[tokio::test]
    async fn test_inventory_is_not_decremented() {
        let (db, service) = seeded().await;
        let before = db.warehouses().inventory_for(&[2]).await.unwrap();

        service
            .create_order(&request(2, "4111111111111111", &[(2, 10)]))
            .await
            .unwrap();

        assert_eq!(db.warehouses().inventory_for(&[2]).await.unwrap(), before);
    }

    #[tokio::test]
    async fn test_rejections_write_nothing() {
        let (db, service) = seeded().await;

        let cases = [
            (request(99, "4111111111111111", &[(1, 1)]), ErrorCategory::NotFound),
            (request(1, "4111111111111111", &[(1, 1), (42, 1)]), ErrorCategory::NotFound),
            // No warehouse holds 60 laptops
            (request(1, "4111111111111111", &[(1, 60)]), ErrorCategory::Unfulfillable),
            (request(1, "0000111122223333", &[(1, 1)]), ErrorCategory::Payment),
            (request(1, "4111111111111111", &[]), ErrorCategory::Validation),
        ];

        for (req, category) in cases {
            let err = service.create_order(&req).await.unwrap_err();
            assert_eq!(err.category(), category, "{err}");
        }

        assert_eq!(db.orders().count().await.unwrap(), 0);
        assert_eq!(db.orders().count_items().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_products_message() {
        let (_, service) = seeded().await;

        let err = service
            .create_order(&request(1, "4111111111111111", &[(41, 1), (3, 1), (42, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::ProductsNotFound(_)));
        assert_eq!(err.to_string(), "Products not found: 41, 42");
    }

    #[tokio::test]
    async fn test_closed_pool_surfaces_as_storage() {
        let (db, service) = seeded().await;
        db.close().await;

        let err = service
            .create_order(&request(1, "4111111111111111", &[(1, 1)]))
            .await
            .unwrap_err();
        assert!(matches!(err, OrderError::Storage { payment_id: None, .. }));
    }
}
