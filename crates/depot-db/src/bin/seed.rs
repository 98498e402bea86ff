//! # Seed Data Loader
//!
//! Populates a database with the development catalog: 3 customers,
//! 5 products, 3 warehouses and their stock.
//!
//! ## Usage
//! ```bash
//! # Seed ./orders.db (default)
//! cargo run -p depot-db --bin seed
//!
//! # Specify database path
//! cargo run -p depot-db --bin seed -- --db ./data/orders.db
//! ```
//!
//! Running it twice is harmless: a database that already has customers is
//! left untouched.

use std::env;

use depot_db::seed::seed_development_data;
use depot_db::{Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = env::var("DEPOT_DB_PATH").unwrap_or_else(|_| String::from("./orders.db"));

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Depot Seed Data Loader");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: $DEPOT_DB_PATH or ./orders.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🌱 Depot Seed Data Loader");
    println!("=========================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let report = seed_development_data(&db).await?;

    if report.skipped {
        println!("⚠ Database already has data");
        println!(
            "  {} customers, {} products, {} orders ({} order items)",
            db.customers().count().await?,
            db.products().count().await?,
            db.orders().count().await?,
            db.orders().count_items().await?
        );
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
    } else {
        println!("✓ {} customers", report.customers);
        println!("✓ {} products", report.products);
        println!("✓ {} warehouses", report.warehouses);
        println!("✓ {} inventory rows", report.inventory_rows);
    }

    db.close().await;
    Ok(())
}
