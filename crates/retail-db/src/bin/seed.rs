//! # Seed Data Generator
//!
//! Populates an empty database with a small demo retail chain.
//!
//! ## Usage
//! ```bash
//! # Seed ./retail.db (default)
//! cargo run -p retail-db --bin seed
//!
//! # Specify database path
//! cargo run -p retail-db --bin seed -- --db ./data/retail.db
//! ```
//!
//! ## Generated Data
//! - One admin, two managers and three customers (password `password`)
//! - Four stores spread over the coordinate plane
//! - A catalogue of products per store with varied stock and prices
//! - Three warehouses

use std::path::PathBuf;

use clap::Parser;
use retail_core::{NewUser, Role, User};
use retail_db::{Database, DbConfig, DbError, DbResult, SqlValue};

/// Retail Console Seed Data Generator
#[derive(Debug, Parser)]
#[command(name = "seed")]
struct SeedArgs {
    /// Database file path
    #[arg(short, long, default_value = "./retail.db")]
    db: PathBuf,
}

/// (name, role, latitude, longitude)
const USERS: &[(&str, Role, f64, f64)] = &[
    ("Ada", Role::Admin, 50.0, 50.0),
    ("Mia", Role::Manager, 12.0, 30.0),
    ("Oscar", Role::Manager, 70.0, 75.0),
    ("Amy", Role::Customer, 10.0, 10.0),
    ("Ben", Role::Customer, 60.0, 65.0),
    ("Cleo", Role::Customer, 35.0, 40.0),
];

/// (name, index of managing user in USERS, latitude, longitude, established)
const STORES: &[(&str, usize, f64, f64, &str)] = &[
    ("Corner Market", 1, 10.0, 35.0, "2015-03-14"),
    ("Harbor Foods", 1, 30.0, 20.0, "2018-07-01"),
    ("Hilltop Grocer", 2, 72.0, 80.0, "2011-11-23"),
    ("Uptown Deli", 2, 55.0, 60.0, "2020-02-29"),
];

const PRODUCTS: &[&str] = &[
    "Apple", "Banana", "Bread", "Butter", "Cheese", "Coffee", "Eggs", "Flour", "Milk", "Orange",
    "Pasta", "Rice", "Sugar", "Tea", "Tomato", "Widget",
];

/// (area, latitude, longitude)
const WAREHOUSES: &[(&str, f64, f64)] = &[
    ("North Depot", 20.0, 80.0),
    ("Central Hub", 50.0, 45.0),
    ("South Yard", 75.0, 10.0),
];

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = SeedArgs::parse();

    println!("Retail Console Seed Data Generator");
    println!("==================================");
    println!("Database: {}", args.db.display());
    println!();

    let db = Database::new(DbConfig::new(args.db.clone())).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db
        .executor()
        .execute_query("SELECT userID FROM Users", &[])
        .await?;
    if existing > 0 {
        println!("⚠ Database already has {} users", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        db.close().await;
        return Ok(());
    }

    let users = seed_users(&db).await?;
    println!("✓ Created {} users", users.len());

    let products = seed_stores(&db, &users).await?;
    println!("✓ Created {} stores with {} products", STORES.len(), products);

    seed_warehouses(&db).await?;
    println!("✓ Created {} warehouses", WAREHOUSES.len());

    println!();
    println!("Log in with any of these (password: password):");
    for user in &users {
        println!("  {:<8} {}", user.name, user.role);
    }

    db.close().await;
    println!();
    println!("✓ Seed complete!");

    Ok(())
}

async fn seed_users(db: &Database) -> DbResult<Vec<User>> {
    let mut created = Vec::with_capacity(USERS.len());

    for (name, role, latitude, longitude) in USERS {
        let mut user = db
            .users()
            .create(&NewUser {
                name: name.to_string(),
                password: "password".to_string(),
                latitude: *latitude,
                longitude: *longitude,
            })
            .await?;

        if *role != Role::Customer {
            user.role = *role;
            db.users().update(&user).await?;
        }
        created.push(user);
    }

    Ok(created)
}

/// Returns the number of products created.
async fn seed_stores(db: &Database, users: &[User]) -> DbResult<usize> {
    let executor = db.executor();
    let mut products = 0;

    for (store_idx, (name, manager_idx, latitude, longitude, established)) in
        STORES.iter().enumerate()
    {
        executor
            .execute_update(
                "INSERT INTO Store (name, managerID, latitude, longitude, dateEstablished) \
                 VALUES (?1, ?2, ?3, ?4, ?5)",
                &[
                    SqlValue::from(*name),
                    SqlValue::Integer(users[*manager_idx].user_id),
                    SqlValue::Real(*latitude),
                    SqlValue::Real(*longitude),
                    SqlValue::from(*established),
                ],
            )
            .await?;

        let store_id = last_store_id(db).await?;

        for (product_idx, product) in PRODUCTS.iter().enumerate() {
            let seed = store_idx * PRODUCTS.len() + product_idx;
            // Stock 0-40, price $0.49 - $9.99
            let units = ((seed * 7) % 41) as i64;
            let cents = 49 + ((seed * 37) % 951) as i64;

            executor
                .execute_update(
                    "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) \
                     VALUES (?1, ?2, ?3, ?4)",
                    &[
                        SqlValue::Integer(store_id),
                        SqlValue::from(*product),
                        SqlValue::Integer(units),
                        SqlValue::Real(cents as f64 / 100.0),
                    ],
                )
                .await?;
            products += 1;
        }
    }

    Ok(products)
}

async fn last_store_id(db: &Database) -> DbResult<i64> {
    let rows = db
        .executor()
        .execute_query_rows("SELECT MAX(storeID) FROM Store", &[])
        .await?;

    rows.first()
        .and_then(|row| row.first())
        .and_then(|cell| cell.parse().ok())
        .ok_or_else(|| DbError::Internal("store insert produced no id".to_string()))
}

async fn seed_warehouses(db: &Database) -> DbResult<()> {
    let executor = db.executor();

    for (area, latitude, longitude) in WAREHOUSES {
        executor
            .execute_update(
                "INSERT INTO Warehouse (area, latitude, longitude) VALUES (?1, ?2, ?3)",
                &[
                    SqlValue::from(*area),
                    SqlValue::Real(*latitude),
                    SqlValue::Real(*longitude),
                ],
            )
            .await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_db_path_argument() {
        let args = SeedArgs::try_parse_from(["seed"]).unwrap();
        assert_eq!(args.db, PathBuf::from("./retail.db"));

        let args = SeedArgs::try_parse_from(["seed", "--db", "/tmp/chain.db"]).unwrap();
        assert_eq!(args.db, PathBuf::from("/tmp/chain.db"));

        let args = SeedArgs::try_parse_from(["seed", "-d", "demo.db"]).unwrap();
        assert_eq!(args.db, PathBuf::from("demo.db"));

        assert!(SeedArgs::try_parse_from(["seed", "--db"]).is_err());
    }
}
