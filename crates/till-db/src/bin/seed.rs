//! # Seed Data Generator
//!
//! Populates the database with demo products for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database
//! cargo run -p till-db --bin seed
//!
//! # Specify a database path
//! cargo run -p till-db --bin seed -- --db ./data/till.db
//! ```
//!
//! Inserts a small demo catalog (codes already present are skipped) and
//! makes sure the standard tax class exists.

use std::env;

use till_db::{Database, DbConfig, DbError};

/// Demo catalog: (code, name, unit price in minor units, stock).
const DEMO_PRODUCTS: &[(&str, &str, i64, i64)] = &[
    ("4901234567890", "Green Tea 500ml", 150, 100),
    ("4901234567891", "Rice Ball Salmon", 120, 80),
    ("4901234567892", "Chocolate Bar", 99, 200),
    ("4901234567893", "Instant Noodles", 198, 60),
    ("4901234567894", "Mineral Water 2L", 98, 120),
    ("4901234567895", "Potato Chips", 158, 90),
    ("4901234567896", "Canned Coffee", 130, 150),
    ("4901234567897", "Sandwich Egg", 248, 30),
    ("4901234567898", "Yogurt Plain", 138, 45),
    ("4901234567899", "Energy Drink", 206, 70),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let db_path = parse_db_path();
    println!("Seeding database at {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;

    // Standard 10% class; normally created by migration, kept here so a
    // partially-initialized dev database still ends up usable
    db.tax_classes().upsert("10", 1000).await?;

    let products = db.products();
    let mut inserted = 0usize;
    let mut skipped = 0usize;

    for (code, name, price, stock) in DEMO_PRODUCTS {
        match products.insert(code, name, *price, *stock).await {
            Ok(product) => {
                inserted += 1;
                println!("  + [{}] {} ({} @ {})", product.id, code, name, price);
            }
            Err(DbError::UniqueViolation { .. }) => {
                skipped += 1;
            }
            Err(err) => return Err(err.into()),
        }
    }

    println!("Done: {inserted} inserted, {skipped} already present");

    db.close().await;
    Ok(())
}

/// Parses `--db <path>` from the command line, falling back to the
/// `DATABASE_PATH` env var and then `./till.db`.
fn parse_db_path() -> String {
    let args: Vec<String> = env::args().collect();
    for pair in args.windows(2) {
        if pair[0] == "--db" {
            return pair[1].clone();
        }
    }

    env::var("DATABASE_PATH").unwrap_or_else(|_| "./till.db".to_string())
}
