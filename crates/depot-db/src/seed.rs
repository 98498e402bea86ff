//! # Development Data
//!
//! A small fixed catalog used by the `seed` binary and by tests.
//!
//! ## Stock Matrix
//! ```text
//! ┌──────────────────────┬────────┬───────┬─────┬───────┬──────────┐
//! │ Warehouse            │ Laptop │ Mouse │ Hub │ Stand │ Keyboard │
//! ├──────────────────────┼────────┼───────┼─────┼───────┼──────────┤
//! │ 1 West Coast (SF)    │   50   │  200  │ 150 │  100  │    75    │
//! │ 2 Central (Dallas)   │   30   │  250  │ 100 │   80  │    --    │
//! │ 3 East Coast (NYC)   │    5   │  300  │ 200 │  120  │    50    │
//! └──────────────────────┴────────┴───────┴─────┴───────┴──────────┘
//! ```
//!
//! Rows are inserted in the order listed, so on an empty database the ids
//! are 1, 2, 3... as shown.

use tracing::info;

use crate::error::DbResult;
use crate::pool::Database;

/// (name, email)
const CUSTOMERS: &[(&str, &str)] = &[
    ("Alice Johnson", "alice@example.com"),
    ("Bob Smith", "bob@example.com"),
    ("Carol Williams", "carol@example.com"),
];

/// (name, price in cents)
const PRODUCTS: &[(&str, i64)] = &[
    ("Laptop", 99_999),
    ("Wireless Mouse", 2_999),
    ("USB-C Hub", 4_999),
    ("Monitor Stand", 7_999),
    ("Mechanical Keyboard", 14_999),
];

/// (name, address, latitude, longitude)
const WAREHOUSES: &[(&str, &str, f64, f64)] = &[
    (
        "West Coast Warehouse",
        "123 Tech Blvd, San Francisco, CA 94102, USA",
        37.7749,
        -122.4194,
    ),
    (
        "Central Warehouse",
        "456 Commerce St, Dallas, TX 75201, USA",
        32.7767,
        -96.7970,
    ),
    (
        "East Coast Warehouse",
        "789 Industrial Ave, New York, NY 10001, USA",
        40.7128,
        -74.0060,
    ),
];

/// Per warehouse (in `WAREHOUSES` order), quantity per product (in
/// `PRODUCTS` order). `None` means the warehouse does not stock it.
const STOCK: &[[Option<i64>; 5]] = &[
    [Some(50), Some(200), Some(150), Some(100), Some(75)],
    [Some(30), Some(250), Some(100), Some(80), None],
    [Some(5), Some(300), Some(200), Some(120), Some(50)],
];

/// What [`seed_development_data`] did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub customers: usize,
    pub products: usize,
    pub warehouses: usize,
    pub inventory_rows: usize,
    /// The database already had customers; nothing was inserted.
    pub skipped: bool,
}

/// Inserts the development catalog unless the database already has data.
pub async fn seed_development_data(db: &Database) -> DbResult<SeedReport> {
    let existing = db.customers().count().await?;
    if existing > 0 {
        info!(existing, "Database already seeded, skipping");
        return Ok(SeedReport {
            skipped: true,
            ..SeedReport::default()
        });
    }

    let mut report = SeedReport::default();

    for (name, email) in CUSTOMERS {
        db.customers().insert(name, email).await?;
        report.customers += 1;
    }

    let mut product_ids = Vec::with_capacity(PRODUCTS.len());
    for (name, price_cents) in PRODUCTS {
        product_ids.push(db.products().insert(name, *price_cents).await?.id);
        report.products += 1;
    }

    for ((name, address, latitude, longitude), stock) in WAREHOUSES.iter().zip(STOCK) {
        let warehouse = db
            .warehouses()
            .insert(name, address, *latitude, *longitude)
            .await?;
        report.warehouses += 1;

        for (product_id, quantity) in product_ids.iter().zip(stock) {
            if let Some(quantity) = quantity {
                db.warehouses()
                    .set_stock(warehouse.id, *product_id, *quantity)
                    .await?;
                report.inventory_rows += 1;
            }
        }
    }

    info!(
        customers = report.customers,
        products = report.products,
        warehouses = report.warehouses,
        inventory_rows = report.inventory_rows,
        "Development data seeded"
    );

    Ok(report)
}
