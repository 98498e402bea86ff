//! # Warehouse Selection
//!
//! Picks the single warehouse that ships an order.
//!
//! ## Algorithm
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Required: {laptop: 2, mouse: 1}          Ship-to: (lat, lng)          │
//! │                                                                         │
//! │  1. COVERAGE  - inventory rows for the requested products              │
//! │     WH1 laptop 50 ✓  mouse 200 ✓   → covers 2/2 → QUALIFIES            │
//! │     WH2 laptop 30 ✓  (no mouse)    → covers 1/2                        │
//! │     WH3 laptop  1 ✗  mouse 300 ✓   → covers 1/2                        │
//! │                                                                         │
//! │  2. NEAREST   - haversine(ship_to, warehouse) over qualifiers          │
//! │     smallest distance wins; equal distance → lowest warehouse id       │
//! │                                                                         │
//! │  No qualifier (or nothing required) → None                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is read, never reserved. Two concurrent orders can both see the
//! same warehouse as qualifying and together exceed its stock.

use std::collections::{BTreeMap, BTreeSet};

use tracing::debug;

use crate::gateway::{GatewayResult, OrderGateway};
use crate::geo::haversine_km;
use crate::types::{Coordinate, InventoryEntry, OrderItemRequest, Warehouse};

// =============================================================================
// Required Items
// =============================================================================

/// Products an order needs, each with the minimum quantity a warehouse
/// must hold.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequiredItems(BTreeMap<i64, i64>);

impl RequiredItems {
    /// Builds the requirement set from request lines.
    ///
    /// Lines are expected to have unique product ids; validation rejects
    /// duplicates before this runs.
    pub fn from_lines(lines: &[OrderItemRequest]) -> Self {
        RequiredItems(
            lines
                .iter()
                .map(|line| (line.product_id, line.quantity))
                .collect(),
        )
    }

    /// Adds (or replaces) a requirement.
    pub fn require(mut self, product_id: i64, min_quantity: i64) -> Self {
        self.0.insert(product_id, min_quantity);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Minimum quantity required for a product, if it is required at all.
    pub fn min_quantity(&self, product_id: i64) -> Option<i64> {
        self.0.get(&product_id).copied()
    }

    /// Required product ids in ascending order.
    pub fn product_ids(&self) -> Vec<i64> {
        self.0.keys().copied().collect()
    }
}

// =============================================================================
// Selection
// =============================================================================

/// The chosen warehouse and how far it is from the ship-to point.
#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseSelection {
    pub warehouse: Warehouse,
    pub distance_km: f64,
}

/// Ids of warehouses whose stock covers every requirement, ascending.
///
/// A warehouse qualifies iff for every required product it has an inventory
/// row with `quantity >= min_quantity`. Rows for products that are not
/// required are ignored.
pub fn qualifying_warehouse_ids(required: &RequiredItems, inventory: &[InventoryEntry]) -> Vec<i64> {
    if required.is_empty() {
        return Vec::new();
    }

    let mut covered: BTreeMap<i64, BTreeSet<i64>> = BTreeMap::new();
    for entry in inventory {
        if let Some(min) = required.min_quantity(entry.product_id) {
            if entry.quantity >= min {
                covered
                    .entry(entry.warehouse_id)
                    .or_default()
                    .insert(entry.product_id);
            }
        }
    }

    covered
        .into_iter()
        .filter(|(_, products)| products.len() == required.len())
        .map(|(warehouse_id, _)| warehouse_id)
        .collect()
}

/// The candidate closest to `ship_to`; equal distances go to the lowest id.
pub fn nearest_warehouse(candidates: &[Warehouse], ship_to: Coordinate) -> Option<(&Warehouse, f64)> {
    let mut best: Option<(&Warehouse, f64)> = None;

    for warehouse in candidates {
        let distance = haversine_km(ship_to, warehouse.coordinate());
        best = match best {
            Some((current, best_distance))
                if best_distance < distance
                    || (best_distance == distance && current.id < warehouse.id) =>
            {
                Some((current, best_distance))
            }
            _ => Some((warehouse, distance)),
        };
    }

    best
}

/// Runs coverage then nearest-neighbour against the gateway.
///
/// ## Queries
/// 1. `get_inventory(required product ids)`
/// 2. `get_warehouses(qualifying ids)` - skipped when nothing qualifies
pub async fn select_warehouse<G>(
    gateway: &G,
    required: &RequiredItems,
    ship_to: Coordinate,
) -> GatewayResult<Option<WarehouseSelection>>
where
    G: OrderGateway + ?Sized,
{
    if required.is_empty() {
        return Ok(None);
    }

    let inventory = gateway.get_inventory(&required.product_ids()).await?;
    let qualifying = qualifying_warehouse_ids(required, &inventory);

    debug!(
        required = required.len(),
        inventory_rows = inventory.len(),
        qualifying = ?qualifying,
        "Warehouse coverage computed"
    );

    if qualifying.is_empty() {
        return Ok(None);
    }

    let candidates = gateway.get_warehouses(&qualifying).await?;

    Ok(nearest_warehouse(&candidates, ship_to).map(|(warehouse, distance_km)| {
        WarehouseSelection {
            warehouse: warehouse.clone(),
            distance_km,
        }
    }))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::InMemoryGateway;

    fn stock(warehouse_id: i64, product_id: i64, quantity: i64) -> InventoryEntry {
        InventoryEntry {
            warehouse_id,
            product_id,
            quantity,
        }
    }

    fn warehouse(id: i64, latitude: f64, longitude: f64) -> Warehouse {
        Warehouse {
            id,
            name: format!("Warehouse {}", id),
            address: format!("{} Depot Rd", id),
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_coverage_requires_every_product() {
        let required = RequiredItems::default().require(1, 2).require(5, 1);
        let inventory = [
            stock(1, 1, 50),
            stock(1, 5, 75),
            // Missing product 5 entirely
            stock(2, 1, 30),
            // Insufficient quantity of product 1
            stock(3, 1, 1),
            stock(3, 5, 50),
        ];
        assert_eq!(qualifying_warehouse_ids(&required, &inventory), vec![1]);
    }

    #[test]
    fn test_coverage_quantity_boundary() {
        let required = RequiredItems::default().require(1, 5);
        assert_eq!(qualifying_warehouse_ids(&required, &[stock(1, 1, 5)]), vec![1]);
        assert!(qualifying_warehouse_ids(&required, &[stock(1, 1, 4)]).is_empty());
    }

    #[test]
    fn test_coverage_ignores_unrequested_products() {
        let required = RequiredItems::default().require(1, 1);
        let inventory = [stock(1, 2, 100), stock(2, 1, 1), stock(2, 9, 0)];
        assert_eq!(qualifying_warehouse_ids(&required, &inventory), vec![2]);
    }

    #[test]
    fn test_empty_requirements_qualify_nothing() {
        let inventory = [stock(1, 1, 100)];
        assert!(qualifying_warehouse_ids(&RequiredItems::default(), &inventory).is_empty());
    }

    #[test]
    fn test_nearest_picks_minimum_distance() {
        let ship_to = Coordinate { latitude: 40.0, longitude: -75.0 };
        let candidates = [
            warehouse(1, 37.7749, -122.4194),
            warehouse(2, 40.7128, -74.0060),
            warehouse(3, 32.7767, -96.7970),
        ];
        let (picked, _) = nearest_warehouse(&candidates, ship_to).unwrap();
        assert_eq!(picked.id, 2);
    }

    #[test]
    fn test_nearest_tie_goes_to_lowest_id() {
        let ship_to = Coordinate { latitude: 40.0, longitude: -100.0 };
        // Same location, listed highest id first
        let candidates = [
            warehouse(9, 41.0, -100.0),
            warehouse(4, 41.0, -100.0),
            warehouse(7, 41.0, -100.0),
        ];
        let (picked, _) = nearest_warehouse(&candidates, ship_to).unwrap();
        assert_eq!(picked.id, 4);
    }

    #[test]
    fn test_nearest_of_nothing() {
        let ship_to = Coordinate { latitude: 40.0, longitude: -100.0 };
        assert!(nearest_warehouse(&[], ship_to).is_none());
    }

    #[tokio::test]
    async fn test_select_single_qualifier() {
        let gateway = InMemoryGateway::new()
            .with_warehouse(warehouse(1, 37.7749, -122.4194))
            .with_warehouse(warehouse(2, 40.7128, -74.0060))
            .with_stock(1, 1, 10)
            .with_stock(2, 1, 1);

        let required = RequiredItems::default().require(1, 2);
        let ship_to = Coordinate { latitude: 40.7, longitude: -74.0 };

        let selection = select_warehouse(&gateway, &required, ship_to)
            .await
            .unwrap()
            .unwrap();
        // Only warehouse 1 has enough, even though 2 is much closer
        assert_eq!(selection.warehouse.id, 1);
    }

    #[tokio::test]
    async fn test_select_closest_of_several() {
        let gateway = InMemoryGateway::new()
            .with_warehouse(warehouse(1, 37.7749, -122.4194))
            .with_warehouse(warehouse(2, 40.7128, -74.0060))
            .with_stock(1, 1, 10)
            .with_stock(2, 1, 10);

        let required = RequiredItems::default().require(1, 2);
        let ship_to = Coordinate { latitude: 40.7, longitude: -74.0 };

        let selection = select_warehouse(&gateway, &required, ship_to)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(selection.warehouse.id, 2);
        assert!(selection.distance_km < 5.0);
    }

    #[tokio::test]
    async fn test_select_none_qualifies() {
        let gateway = InMemoryGateway::new()
            .with_warehouse(warehouse(1, 37.7749, -122.4194))
            .with_stock(1, 1, 1);

        let required = RequiredItems::default().require(1, 2);
        let ship_to = Coordinate { latitude: 40.7, longitude: -74.0 };

        assert!(select_warehouse(&gateway, &required, ship_to)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_select_with_no_requirements() {
        let gateway = InMemoryGateway::new()
            .with_warehouse(warehouse(1, 37.7749, -122.4194))
            .with_stock(1, 1, 100);

        let ship_to = Coordinate { latitude: 40.7, longitude: -74.0 };
        assert!(select_warehouse(&gateway, &RequiredItems::default(), ship_to)
            .await
            .unwrap()
            .is_none());
    }
}
