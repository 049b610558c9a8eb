//! # Seed Data Generator
//!
//! Populates a development database with an energy drink catalog, a handful
//! of stores and some inventory.
//!
//! ## Usage
//! ```bash
//! # Uses DATABASE_URL
//! cargo run -p canscout-db --bin seed
//!
//! # Explicit database
//! cargo run -p canscout-db --bin seed -- --db postgres://localhost/canscout_dev
//! ```
//!
//! ## Generated Data
//! - Products: every brand × flavor × size combination below
//! - Barcodes: synthetic 12-digit codes `99{brand:04}{flavor:02}{size:02}00`
//! - Locations: fuel stations around Springfield, IL
//! - Inventory: each store carries roughly half the catalog

use anyhow::Context;
use std::env;

use canscout_core::{NewLocation, NewProduct};
use canscout_db::{Database, DbConfig};

/// (brand, flavors, caffeine_mg per 16 fl oz)
const BRANDS: &[(&str, &[&str], i32)] = &[
    (
        "Monster Energy",
        &["Original", "Ultra White", "Ultra Paradise", "Pipeline Punch", "Mango Loco"],
        160,
    ),
    ("Red Bull", &["Original", "Sugarfree", "Red Edition", "Yellow Edition"], 151),
    ("Bang", &["Black Cherry Vanilla", "Sour Heads", "Cotton Candy", "Blue Razz"], 300),
    ("Celsius", &["Sparkling Orange", "Kiwi Guava", "Peach Vibe"], 267),
    ("Reign", &["Melon Mania", "Razzle Berry", "Lemon HDZ"], 300),
    ("Rockstar", &["Original", "Punched", "Pure Zero Silver Ice"], 160),
];

/// (size label, volume relative to 16 fl oz in percent, base price in cents)
const SIZES: &[(&str, i32, i64)] = &[
    ("8.4 fl oz", 53, 229),
    ("12 fl oz", 75, 269),
    ("16 fl oz", 100, 299),
];

/// (name, address, city, state, postal code, lat, lng)
const STORES: &[(&str, &str, &str, &str, &str, f64, f64)] = &[
    ("Shell", "1200 S 6th St", "Springfield", "IL", "62703", 39.7884, -89.6466),
    ("Casey's", "2401 N Dirksen Pkwy", "Springfield", "IL", "62702", 39.8235, -89.6109),
    ("Circle K", "3000 S MacArthur Blvd", "Springfield", "IL", "62704", 39.7676, -89.6731),
    ("Speedway", "1725 Wabash Ave", "Springfield", "IL", "62704", 39.7739, -89.6810),
    ("Mobil", "901 E Stevenson Dr", "Springfield", "IL", "62703", 39.7614, -89.6391),
    ("Huck's", "500 W Jefferson St", "Springfield", "IL", "62702", 39.8030, -89.6570),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();

    let mut database_url = env::var("DATABASE_URL").ok();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    database_url = Some(args[i + 1].clone());
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("CanScout Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <URL>     PostgreSQL URL (default: $DATABASE_URL)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    let database_url = database_url.context("no database given: pass --db or set DATABASE_URL")?;

    println!("🌱 CanScout Seed Data Generator");
    println!("===============================");
    println!();

    let db = Database::new(DbConfig::new(database_url)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        return Ok(());
    }

    println!();
    println!("Generating products...");

    let start = std::time::Instant::now();
    let mut product_ids = Vec::new();

    for (brand_idx, (brand, flavors, caffeine_16oz)) in BRANDS.iter().enumerate() {
        for (flavor_idx, flavor) in flavors.iter().enumerate() {
            for (size_idx, (size, volume_pct, _)) in SIZES.iter().enumerate() {
                let product = generate_product(
                    brand,
                    flavor,
                    size,
                    caffeine_16oz * volume_pct / 100,
                    (brand_idx, flavor_idx, size_idx),
                );

                match db.products().insert(&product).await {
                    Ok(stored) => product_ids.push((stored.id, size_idx)),
                    Err(e) => eprintln!("Failed to insert {} {} {}: {}", brand, flavor, size, e),
                }
            }
        }
    }

    println!("✓ Generated {} products", product_ids.len());

    println!();
    println!("Generating locations...");

    let mut location_ids = Vec::new();
    for (name, address, city, state, postal_code, latitude, longitude) in STORES {
        let location = NewLocation {
            name: name.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            postal_code: postal_code.to_string(),
            latitude: *latitude,
            longitude: *longitude,
        };

        match db.locations().insert(&location).await {
            Ok(stored) => location_ids.push(stored.id),
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    println!("✓ Generated {} locations", location_ids.len());

    println!();
    println!("Generating inventory...");

    let mut rows = 0;
    for (store_idx, location_id) in location_ids.iter().enumerate() {
        for (product_idx, (product_id, size_idx)) in product_ids.iter().enumerate() {
            if (store_idx + product_idx) % 2 == 1 {
                continue;
            }

            let base = SIZES[*size_idx].2;
            let price_cents = base + ((store_idx * 13 + product_idx * 7) % 60) as i64;
            let in_stock = (store_idx + product_idx) % 7 != 0;

            db.inventory()
                .upsert(*location_id, *product_id, Some(price_cents), in_stock)
                .await?;
            rows += 1;
        }
    }

    println!("✓ Generated {} inventory rows in {:?}", rows, start.elapsed());

    println!();
    println!("Verifying search...");
    let results = db.products().search("ultra", 10).await?;
    println!("  Search 'ultra': {} results", results.len());

    println!();
    println!("✓ Seed complete!");

    Ok(())
}

/// Builds one catalog entry with a synthetic barcode.
fn generate_product(
    brand: &str,
    flavor: &str,
    size: &str,
    caffeine_mg: i32,
    (brand_idx, flavor_idx, size_idx): (usize, usize, usize),
) -> NewProduct {
    let sugar_free = flavor.contains("Ultra") || flavor.contains("Sugarfree") || flavor.contains("Zero");

    NewProduct {
        brand: brand.to_string(),
        flavor: flavor.to_string(),
        size: size.to_string(),
        caffeine_mg: Some(caffeine_mg),
        sugar_g: Some(if sugar_free { 0 } else { 27 + (flavor_idx as i32 * 5) % 30 }),
        calories: Some(if sugar_free { 10 } else { 110 + (flavor_idx as i32 * 20) % 120 }),
        barcode: Some(format!("99{:04}{:02}{:02}00", brand_idx, flavor_idx, size_idx)),
        description: None,
        image_url: None,
    }
}
