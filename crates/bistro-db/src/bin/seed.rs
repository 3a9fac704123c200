//! # Menu Seeder
//!
//! Creates the schema and inserts the default menu into an empty store.
//!
//! ## Usage
//! ```bash
//! # Seed ./bistro.db
//! cargo run -p bistro-db --bin seed
//!
//! # Specify database path
//! cargo run -p bistro-db --bin seed -- --db ./data/bistro.db
//! ```
//!
//! Running it again is harmless: a menu that already has rows is left alone.

use std::env;

use bistro_db::{Database, DbConfig, DEFAULT_MENU};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./bistro.db");

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
                println!("Bistro POS Menu Seeder");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./bistro.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            other => {
                eprintln!("Ignoring unknown argument: {}", other);
            }
        }
        i += 1;
    }

    println!("Bistro POS Menu Seeder");
    println!("======================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Connected, schema ready");

    let inserted = db.menu().seed_if_empty().await?;
    if inserted == 0 {
        let existing = db.menu().count().await?;
        println!("⚠ Menu already has {} items, nothing inserted", existing);
    } else {
        println!("✓ Inserted {} menu items", inserted);
        for (name, category, cents) in DEFAULT_MENU {
            println!("  {:<10} {:<9} {:>6.2}", name, category, *cents as f64 / 100.0);
        }
    }

    db.close().await;
    Ok(())
}
