//! Drives the console menus with scripted input against an in-memory database.

use std::io::Cursor;

use retail_cli::menu::{self, UNRECOGNIZED_CHOICE};
use retail_cli::prompt::{Prompter, INVALID_INPUT};
use retail_core::{NewUser, Role, User};
use retail_db::{Database, DbConfig, SqlValue};

struct Chain {
    db: Database,
    manager: User,
    customer: User,
    /// (10, 35), managed by `manager`, "Widget" 5 units at 2.00.
    corner: i64,
    /// (80, 80), managed by someone else.
    outpost: i64,
}

async fn user(db: &Database, name: &str, role: Role, lat: f64, lon: f64) -> User {
    let mut user = db
        .users()
        .create(&NewUser {
            name: name.to_string(),
            password: "pw".to_string(),
            latitude: lat,
            longitude: lon,
        })
        .await
        .unwrap();
    if role != Role::Customer {
        user.role = role;
        db.users().update(&user).await.unwrap();
    }
    user
}

async fn store(db: &Database, name: &str, manager: &User, lat: f64, lon: f64) -> i64 {
    let executor = db.executor();
    executor
        .execute_update(
            "INSERT INTO Store (name, managerID, latitude, longitude, dateEstablished) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                SqlValue::from(name),
                SqlValue::from(manager.user_id),
                SqlValue::from(lat),
                SqlValue::from(lon),
                SqlValue::from("2020-01-01"),
            ],
        )
        .await
        .unwrap();

    let rows = executor
        .execute_query_rows("SELECT MAX(storeID) FROM Store", &[])
        .await
        .unwrap();
    rows[0][0].parse().unwrap()
}

async fn product(db: &Database, store_id: i64, name: &str, units: i64, price: f64) {
    db.executor()
        .execute_update(
            "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) \
             VALUES (?1, ?2, ?3, ?4)",
            &[
                SqlValue::from(store_id),
                SqlValue::from(name),
                SqlValue::from(units),
                SqlValue::from(price),
            ],
        )
        .await
        .unwrap();
}

async fn chain() -> Chain {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let manager = user(&db, "Mia", Role::Manager, 10.0, 30.0).await;
    let other_manager = user(&db, "Oscar", Role::Manager, 90.0, 90.0).await;
    user(&db, "Ada", Role::Admin, 50.0, 50.0).await;
    let customer = user(&db, "Amy", Role::Customer, 10.0, 10.0).await;

    let corner = store(&db, "Corner", &manager, 10.0, 35.0).await;
    let outpost = store(&db, "Outpost", &other_manager, 80.0, 80.0).await;
    product(&db, corner, "Widget", 5, 2.0).await;
    product(&db, outpost, "Gadget", 10, 9.5).await;

    db.executor()
        .execute_update(
            "INSERT INTO Warehouse (area, latitude, longitude) VALUES (?1, ?2, ?3)",
            &[
                SqlValue::from("North"),
                SqlValue::from(20.0_f64),
                SqlValue::from(20.0_f64),
            ],
        )
        .await
        .unwrap();

    Chain {
        db,
        manager,
        customer,
        corner,
        outpost,
    }
}

/// Runs the menus over `script` and returns everything printed.
async fn session(db: &Database, script: &str) -> String {
    let mut prompter = Prompter::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    menu::run(db, &mut prompter).await.unwrap();
    String::from_utf8(prompter.into_output()).unwrap()
}

async fn widget_units(chain: &Chain) -> i64 {
    chain
        .db
        .products()
        .get(chain.corner, "Widget")
        .await
        .unwrap()
        .unwrap()
        .number_of_units
}

#[tokio::test]
async fn test_create_user_then_log_in() {
    let chain = chain().await;

    let out = session(&chain.db, "1\nZoe\nsecret\n20\n30\n2\nZoe\nsecret\n20\n9\n").await;

    assert!(out.contains("User successfully created!"));
    assert!(out.contains("Welcome! You are logged in as customer."));
    assert!(out.contains("20. Log out"));
}

#[tokio::test]
async fn test_registration_reprompts_out_of_range_coordinates() {
    let chain = chain().await;

    let out = session(&chain.db, "1\nZoe\nsecret\n150\n20\n30\n9\n").await;

    assert_eq!(out.matches(INVALID_INPUT).count(), 1);
    assert!(out.contains("User successfully created!"));

    let users = chain.db.users().list_all().await.unwrap();
    let zoe = users.iter().find(|u| u.name == "Zoe").unwrap();
    assert_eq!((zoe.latitude, zoe.longitude), (20.0, 30.0));
}

#[tokio::test]
async fn test_wrong_password_stays_on_main_menu() {
    let chain = chain().await;

    let out = session(&chain.db, "2\nAmy\nnope\n9\n").await;

    assert!(out.contains("Invalid name or password."));
    assert!(!out.contains("Log out"));
}

#[tokio::test]
async fn test_customer_orders_widget_until_stock_runs_out() {
    let chain = chain().await;
    let store = chain.corner;

    let script = format!(
        "2\nAmy\npw\n3\n{store}\nWidget\n3\n3\n{store}\nWidget\n3\n20\n9\n",
        store = store
    );
    let out = session(&chain.db, &script).await;

    assert!(out.contains("3 x Widget from store"));
    assert!(out.contains("Total: 6.00"));
    assert!(out.contains(
        "The product 'Widget' does not exist or there is not enough stock for 3 units!"
    ));
    assert_eq!(widget_units(&chain).await, 2);

    let orders = chain
        .db
        .orders()
        .recent_for_customer(chain.customer.user_id, 5)
        .await
        .unwrap();
    assert_eq!(orders.len(), 1);
}

#[tokio::test]
async fn test_order_total_too_large_is_not_printed() {
    let chain = chain().await;
    product(&chain.db, chain.corner, "Ingot", 5, 9.0e16).await;

    let script = format!("2\nAmy\npw\n3\n{}\nIngot\n2\n20\n9\n", chain.corner);
    let out = session(&chain.db, &script).await;

    assert!(out.contains("2 x Ingot from store"));
    assert!(!out.contains("Total:"));

    let ingot = chain
        .db
        .products()
        .get(chain.corner, "Ingot")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(ingot.number_of_units, 3);
}

#[tokio::test]
async fn test_far_store_is_rejected() {
    let chain = chain().await;

    let script = format!("2\nAmy\npw\n3\n{}\nGadget\n1\n20\n9\n", chain.outpost);
    let out = session(&chain.db, &script).await;

    assert!(out.contains(&format!(
        "The store {} does not exist or is too far!",
        chain.outpost
    )));
}

#[tokio::test]
async fn test_view_stores_lists_only_nearby() {
    let chain = chain().await;

    let out = session(&chain.db, "2\nAmy\npw\n1\n20\n9\n").await;

    assert!(out.contains("Corner"));
    assert!(out.contains("25.00"));
    assert!(!out.contains("Outpost"));
}

#[tokio::test]
async fn test_view_stores_includes_store_at_radius() {
    let chain = chain().await;
    store(&chain.db, "Edge", &chain.manager, 10.0, 40.0).await;

    let out = session(&chain.db, "2\nAmy\npw\n1\n20\n9\n").await;

    assert!(out.contains("Edge"));
    assert!(out.contains("30.00"));
}

#[tokio::test]
async fn test_invalid_and_unknown_choices() {
    let chain = chain().await;

    let out = session(&chain.db, "abc\n7\n2\nAmy\npw\n5\n20\n9\n").await;

    assert_eq!(out.matches(INVALID_INPUT).count(), 1);
    // 7 on the main menu, 5 on the customer menu
    assert_eq!(out.matches(UNRECOGNIZED_CHOICE).count(), 2);
}

#[tokio::test]
async fn test_end_of_input_ends_cleanly() {
    let chain = chain().await;

    session(&chain.db, "").await;
    session(&chain.db, "2\nAmy\npw\n3\n").await;

    assert_eq!(widget_units(&chain).await, 5);
}

#[tokio::test]
async fn test_manager_updates_own_product() {
    let chain = chain().await;

    let script = format!("2\nMia\npw\n5\n{}\nWidget\n12\n\n20\n9\n", chain.corner);
    let out = session(&chain.db, &script).await;

    assert!(out.contains("Stores you manage:"));
    assert!(out.contains("12 units at 2.00"));
    assert_eq!(widget_units(&chain).await, 12);

    let session_value = chain.manager.session();
    let updates = chain
        .db
        .products()
        .recent_updates(&session_value, chain.corner, 5)
        .await
        .unwrap();
    assert_eq!(updates.len(), 1);
    assert_eq!(updates[0].manager_id, chain.manager.user_id);
}

#[tokio::test]
async fn test_manager_cannot_touch_other_store() {
    let chain = chain().await;

    let script = format!("2\nMia\npw\n5\n{}\n7\n{}\n20\n9\n", chain.outpost, chain.outpost);
    let out = session(&chain.db, &script).await;

    assert_eq!(
        out.matches(&format!("You do not manage store {}", chain.outpost))
            .count(),
        2
    );

    let rows = chain
        .db
        .executor()
        .execute_query("SELECT updateNumber FROM ProductUpdates", &[])
        .await
        .unwrap();
    assert_eq!(rows, 0);
}

#[tokio::test]
async fn test_manager_supply_request_restocks() {
    let chain = chain().await;

    let script = format!("2\nMia\npw\n9\n1\n{}\nWidget\n10\n20\n9\n", chain.corner);
    let out = session(&chain.db, &script).await;

    assert!(out.contains("Supply request 1 placed"));
    assert_eq!(widget_units(&chain).await, 15);
}

#[tokio::test]
async fn test_admin_listings_and_user_update() {
    let chain = chain().await;

    let script = format!(
        "2\nAda\npw\n12\n13\n{}\n\n\n\n\nmanager\n3\n20\n9\n",
        chain.customer.user_id
    );
    let out = session(&chain.db, &script).await;

    assert!(out.contains("productName"));
    assert!(out.contains("Gadget"));
    assert!(out.contains("3. manager"));
    assert_eq!(out.matches(INVALID_INPUT).count(), 1);
    assert!(out.contains(&format!("User {} updated.", chain.customer.user_id)));

    let amy = chain
        .db
        .users()
        .get_by_id(chain.customer.user_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(amy.role, Role::Manager);
    assert_eq!(amy.name, "Amy");
    assert_eq!(amy.latitude, 10.0);
}
