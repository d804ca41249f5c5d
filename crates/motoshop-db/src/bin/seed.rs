//! # Seed Data Generator
//!
//! Populates the database with demo shop data for development.
//!
//! ## Usage
//! ```bash
//! # Seed the default database file (./motoshop.db)
//! cargo run -p motoshop-db --bin seed
//!
//! # Specify database path
//! cargo run -p motoshop-db --bin seed -- --db ./data/motoshop.db
//! ```
//!
//! ## Generated Data
//! - A handful of customers with their motorcycles
//! - A parts catalog (oil, brakes, transmission, tires, electrics)
//! - One completed service order, one still open
//! - One customer sale and one walk-in sale

use std::env;

use chrono::NaiveDate;
use motoshop_core::{NewEmployee, NewProduct, NewVehicle, SaleLine};
use motoshop_db::{Database, DbConfig};

/// Parts catalog: (code, description, quantity, cost, price, reorder at)
const PARTS: &[(&str, &str, i64, i64, i64, i64)] = &[
    ("OIL-10W40", "Engine oil 10W40 1L", 24, 1800, 3500, 6),
    ("OIL-FILTER", "Oil filter", 15, 900, 2200, 4),
    ("SPK-PLUG", "Spark plug", 30, 800, 2500, 8),
    ("BRK-PAD-F", "Front brake pads", 12, 2400, 4990, 3),
    ("BRK-PAD-R", "Rear brake pads", 10, 2100, 4590, 3),
    ("BRK-FLUID", "Brake fluid DOT4 500ml", 8, 1500, 2900, 2),
    ("CHN-KIT-520", "Chain and sprocket kit 520", 5, 9800, 18900, 2),
    ("TIRE-F-R17", "Front tire 110/70 R17", 4, 21000, 38000, 2),
    ("TIRE-R-R17", "Rear tire 140/70 R17", 4, 24000, 42000, 2),
    ("BAT-12V6", "Battery 12V 6Ah", 6, 11000, 21000, 2),
    ("CLU-CABLE", "Clutch cable", 9, 1200, 2800, 3),
    ("AIR-FILTER", "Air filter", 11, 1400, 3200, 3),
];

/// Customers with one motorcycle each: (name, phone, brand, model, plate, year)
const CUSTOMERS: &[(&str, &str, &str, &str, &str, &str)] = &[
    ("Maria Souza", "11987654321", "Honda", "CG 160 Titan", "FRT2A18", "2021"),
    ("João Lima", "11976543210", "Yamaha", "Factor 150", "GDK9B77", "2019"),
    ("Ana Paula Ribeiro", "11965432109", "Honda", "CB 300F", "HJP4C55", "2023"),
    ("Carlos Eduardo Dias", "11954321098", "Kawasaki", "Ninja 400", "IKX7D31", "2022"),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    // Parse --db <path> (defaults to ./motoshop.db)
    let args: Vec<String> = env::args().collect();
    let mut db_path = "./motoshop.db".to_string();
    let mut i = 1;
    while i < args.len() {
        if args[i] == "--db" && i + 1 < args.len() {
            db_path = args[i + 1].clone();
            i += 2;
        } else {
            i += 1;
        }
    }

    println!("MotoShop seed tool");
    println!("Database: {}", db_path);

    let db = Database::new(DbConfig::new(&db_path)).await?;
    println!("✓ Migrations applied");

    let existing = db.products().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} products", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    // Parts catalog
    let mut products = Vec::new();
    for &(code, description, quantity, cost, price, reorder) in PARTS {
        let product = db
            .products()
            .create(&NewProduct {
                code: code.to_string(),
                description: description.to_string(),
                quantity_on_hand: quantity,
                cost_cents: cost,
                sale_price_cents: price,
                reorder_threshold: reorder,
            })
            .await?;
        products.push(product);
    }
    println!("✓ Seeded {} products", products.len());

    // Customers and their motorcycles
    let mut customers = Vec::new();
    let mut vehicles = Vec::new();
    for &(name, phone, brand, model, plate, year) in CUSTOMERS {
        let customer = db.customers().create(name, None, Some(phone)).await?;
        let vehicle = db
            .vehicles()
            .create(&NewVehicle {
                customer_id: customer.id.clone(),
                brand: brand.to_string(),
                model: model.to_string(),
                plate: plate.to_string(),
                year: Some(year.to_string()),
                color: None,
            })
            .await?;
        customers.push(customer);
        vehicles.push(vehicle);
    }
    println!("✓ Seeded {} customers with vehicles", customers.len());

    // Staff
    db.employees()
        .create(&NewEmployee {
            name: "Pedro Gomes".to_string(),
            tax_id: "52998224725".to_string(),
            phone: Some("11988887777".to_string()),
            role: "mechanic".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2022, 5, 2),
            salary_cents: 320000,
        })
        .await?;
    db.employees()
        .create(&NewEmployee {
            name: "Luciana Prado".to_string(),
            tax_id: "15350946056".to_string(),
            phone: None,
            role: "attendant".to_string(),
            hired_on: NaiveDate::from_ymd_opt(2023, 9, 18),
            salary_cents: 260000,
        })
        .await?;
    println!("✓ Seeded 2 employees");

    // A completed order: oil change on the first customer's bike
    let done = db
        .orders()
        .create(&customers[0].id, &vehicles[0].id, "oil and filter change")
        .await?;
    db.orders().add_part(&done.id, &products[0].id, 1).await?; // OIL-10W40
    db.orders().add_part(&done.id, &products[1].id, 1).await?; // OIL-FILTER
    db.orders().complete(&done.id, 4500).await?;
    let done_total = db.orders().total(&done.id).await?;

    // An open order: brakes, still waiting on parts
    let open = db
        .orders()
        .create(&customers[1].id, &vehicles[1].id, "front brake squeal")
        .await?;
    db.orders().add_part(&open.id, &products[3].id, 1).await?; // BRK-PAD-F

    println!("✓ Seeded 2 service orders (1 completed at {}, 1 open)", done_total);

    // One customer sale, one walk-in
    let receipt = db
        .sales()
        .register(
            Some(&customers[2].id),
            &[SaleLine {
                product_id: products[2].id.clone(), // SPK-PLUG
                quantity: 2,
            }],
        )
        .await?;
    let walk_in = db
        .sales()
        .register(
            None,
            &[SaleLine {
                product_id: products[5].id.clone(), // BRK-FLUID
                quantity: 1,
            }],
        )
        .await?;
    println!(
        "✓ Seeded 2 sales ({} and walk-in {})",
        receipt.total(),
        walk_in.total()
    );

    let low = db.products().low_stock().await?;
    println!();
    println!("Restock report ({} parts at or under threshold):", low.len());
    for product in &low {
        println!(
            "  {:12} {:28} {} on hand (threshold {})",
            product.code, product.description, product.quantity_on_hand, product.reorder_threshold
        );
    }

    println!();
    println!("✓ Seed complete!");

    db.close().await;

    Ok(())
}
