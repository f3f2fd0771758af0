//! # Store Repository
//!
//! Stores are reference data: the console reads them, never writes them.
//!
//! The delivery-radius filter runs in Rust over all store rows, using the
//! same `retail_core::geo` formula as order placement, so a store listed as
//! nearby is always orderable.

use retail_core::geo::is_within_radius;
use retail_core::{Coordinates, NearbyStore, Store};
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::DbResult;

/// Repository for store lookups.
#[derive(Debug, Clone)]
pub struct StoreRepository {
    pool: SqlitePool,
}

impl StoreRepository {
    /// Creates a new StoreRepository.
    pub fn new(pool: SqlitePool) -> Self {
        StoreRepository { pool }
    }

    /// Gets a store by id.
    pub async fn get_by_id(&self, store_id: i64) -> DbResult<Option<Store>> {
        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT storeID, name, managerID, latitude, longitude, dateEstablished
            FROM Store
            WHERE storeID = ?1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(store)
    }

    /// Lists every store ordered by id.
    pub async fn list_all(&self) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT storeID, name, managerID, latitude, longitude, dateEstablished
            FROM Store
            ORDER BY storeID
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Lists the stores a manager is responsible for.
    pub async fn managed_by(&self, manager_id: i64) -> DbResult<Vec<Store>> {
        let stores = sqlx::query_as::<_, Store>(
            r#"
            SELECT storeID, name, managerID, latitude, longitude, dateEstablished
            FROM Store
            WHERE managerID = ?1
            ORDER BY storeID
            "#,
        )
        .bind(manager_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(stores)
    }

    /// Stores within the delivery radius of `origin`, ordered by id.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let user = db.users().get_by_id(session.user_id).await?.unwrap();
    /// for nearby in db.stores().within_radius(&user.location()).await? {
    ///     println!("{} {:.2}", nearby.store.name, nearby.distance);
    /// }
    /// ```
    pub async fn within_radius(&self, origin: &Coordinates) -> DbResult<Vec<NearbyStore>> {
        let nearby: Vec<NearbyStore> = self
            .list_all()
            .await?
            .into_iter()
            .filter(|store| is_within_radius(origin, &store.location()))
            .map(|store| NearbyStore {
                distance: origin.distance_to(&store.location()),
                store,
            })
            .collect();

        debug!(
            latitude = origin.latitude,
            longitude = origin.longitude,
            count = nearby.len(),
            "Stores within radius"
        );
        Ok(nearby)
    }
}
