//! Shared in-memory fixtures for repository tests.

use retail_core::{NewUser, Role, Store, User, Warehouse};

use crate::executor::SqlValue;
use crate::pool::{Database, DbConfig};

pub(crate) struct Fixture {
    pub db: Database,
    pub admin: User,
    pub manager: User,
    pub other_manager: User,
    /// Registered at (10, 10).
    pub customer: User,
    /// At (10, 35), managed by `manager`; carries "Widget" (5 units, 2.00).
    pub store: Store,
    /// At (10, 45), managed by `other_manager`; carries "Gadget".
    pub far_store: Store,
    pub warehouse: Warehouse,
}

pub(crate) async fn fixture() -> Fixture {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();

    let admin = user(&db, "Ada", Role::Admin, 50.0, 50.0).await;
    let manager = user(&db, "Mia", Role::Manager, 10.0, 30.0).await;
    let other_manager = user(&db, "Oscar", Role::Manager, 90.0, 90.0).await;
    let customer = user(&db, "Amy", Role::Customer, 10.0, 10.0).await;

    let corner = store(&db, "Corner", &manager, 10.0, 35.0).await;
    let outpost = store(&db, "Outpost", &other_manager, 10.0, 45.0).await;

    product(&db, corner.store_id, "Widget", 5, 2.0).await;
    product(&db, outpost.store_id, "Gadget", 10, 9.5).await;

    let north = warehouse(&db, "North", 20.0, 20.0).await;

    Fixture {
        db,
        admin,
        manager,
        other_manager,
        customer,
        store: corner,
        far_store: outpost,
        warehouse: north,
    }
}

pub(crate) async fn user(db: &Database, name: &str, role: Role, lat: f64, lon: f64) -> User {
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

pub(crate) async fn store(db: &Database, name: &str, manager: &User, lat: f64, lon: f64) -> Store {
    db.executor()
        .execute_update(
            "INSERT INTO Store (name, managerID, latitude, longitude, dateEstablished) \
             VALUES (?1, ?2, ?3, ?4, ?5)",
            &[
                name.into(),
                manager.user_id.into(),
                lat.into(),
                lon.into(),
                "2020-01-01".into(),
            ],
        )
        .await
        .unwrap();

    let id = last_id(db, "SELECT MAX(storeID) FROM Store").await;
    db.stores().get_by_id(id).await.unwrap().unwrap()
}

pub(crate) async fn product(db: &Database, store_id: i64, name: &str, units: i64, price: f64) {
    db.executor()
        .execute_update(
            "INSERT INTO Product (storeID, productName, numberOfUnits, pricePerUnit) \
             VALUES (?1, ?2, ?3, ?4)",
            &[store_id.into(), name.into(), units.into(), price.into()],
        )
        .await
        .unwrap();
}

pub(crate) async fn warehouse(db: &Database, area: &str, lat: f64, lon: f64) -> Warehouse {
    db.executor()
        .execute_update(
            "INSERT INTO Warehouse (area, latitude, longitude) VALUES (?1, ?2, ?3)",
            &[area.into(), SqlValue::Real(lat), SqlValue::Real(lon)],
        )
        .await
        .unwrap();

    let id = last_id(db, "SELECT MAX(warehouseID) FROM Warehouse").await;
    db.supply().warehouse(id).await.unwrap().unwrap()
}

async fn last_id(db: &Database, sql: &str) -> i64 {
    let rows = db.executor().execute_query_rows(sql, &[]).await.unwrap();
    rows[0][0].parse().unwrap()
}
