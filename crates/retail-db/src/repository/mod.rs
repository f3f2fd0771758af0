//! # Repository Module
//!
//! Database repository implementations for the retail schema.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Console command                                                       │
//! │       │                                                                 │
//! │       │  db.orders().place_order(&session, 1, "Widget", 3)             │
//! │       ▼                                                                 │
//! │  OrderRepository                                                       │
//! │  ├── BEGIN                                                             │
//! │  ├── distance check  (retail-core::geo)                                │
//! │  ├── stock check     (retail-core::Product::can_fulfill)               │
//! │  ├── INSERT Orders / conditional UPDATE Product                        │
//! │  └── COMMIT  (any early return rolls back)                             │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`] - Registration, login, admin edits
//! - [`StoreRepository`] - Store lookup and the distance filter
//! - [`ProductRepository`] - Product listing and audited updates
//! - [`OrderRepository`] - Order placement and order analytics
//! - [`SupplyRepository`] - Warehouses and supply requests

pub mod order;
pub mod product;
pub mod store;
pub mod supply;
pub mod user;

pub use order::OrderRepository;
pub use product::ProductRepository;
pub use store::StoreRepository;
pub use supply::SupplyRepository;
pub use user::UserRepository;

use retail_core::{CoreError, Session, Store};
use sqlx::{Executor, Sqlite};
use tracing::warn;

use crate::error::DbResult;

/// Loads a store and applies the ownership gate for `session`.
///
/// Works on the pool or inside an open transaction (`&mut *tx`).
pub(crate) async fn authorize_store<'e, E>(
    executor: E,
    session: &Session,
    store_id: i64,
) -> DbResult<Store>
where
    E: Executor<'e, Database = Sqlite>,
{
    let store = sqlx::query_as::<_, Store>(
        r#"
        SELECT storeID, name, managerID, latitude, longitude, dateEstablished
        FROM Store
        WHERE storeID = ?1
        "#,
    )
    .bind(store_id)
    .fetch_optional(executor)
    .await?
    .ok_or(CoreError::StoreNotFound(store_id))?;

    if !session.can_manage(&store) {
        warn!(
            user_id = session.user_id,
            role = %session.role,
            store_id,
            "Store access rejected"
        );
        return Err(CoreError::NotStoreManager { store_id }.into());
    }

    Ok(store)
}
