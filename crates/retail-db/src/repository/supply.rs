//! # Supply Repository
//!
//! Warehouses (reference data) and the supply request log.
//!
//! A supply request restocks a store product from a warehouse: the product
//! quantity is incremented and a `ProductSupplyRequests` row is appended in
//! the same transaction. Warehouse stock is not tracked.

use retail_core::validation::validate_unit_ceiling;
use retail_core::{CoreError, Session, SupplyRequest, ValidationError, Warehouse};
use sqlx::SqlitePool;
use tracing::{debug, info};

use super::authorize_store;
use crate::error::DbResult;

/// Repository for warehouses and supply requests.
#[derive(Debug, Clone)]
pub struct SupplyRepository {
    pool: SqlitePool,
}

impl SupplyRepository {
    /// Creates a new SupplyRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SupplyRepository { pool }
    }

    /// Gets a warehouse by id.
    pub async fn warehouse(&self, warehouse_id: i64) -> DbResult<Option<Warehouse>> {
        let warehouse = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT warehouseID, area, latitude, longitude
            FROM Warehouse
            WHERE warehouseID = ?1
            "#,
        )
        .bind(warehouse_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(warehouse)
    }

    /// Lists every warehouse ordered by id.
    pub async fn warehouses(&self) -> DbResult<Vec<Warehouse>> {
        let warehouses = sqlx::query_as::<_, Warehouse>(
            r#"
            SELECT warehouseID, area, latitude, longitude
            FROM Warehouse
            ORDER BY warehouseID
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(warehouses)
    }

    /// Restocks a store product from a warehouse.
    ///
    /// ## Errors
    /// * `Rejected(Validation)` - `units` is not positive, or the request or
    ///   the restocked level would exceed `MAX_UNITS`
    /// * `Rejected(WarehouseNotFound)` - Unknown warehouse
    /// * `Rejected(StoreNotFound | NotStoreManager)` - Ownership gate failed
    /// * `Rejected(ProductNotFound)` - The store does not carry the product
    pub async fn place_request(
        &self,
        session: &Session,
        warehouse_id: i64,
        store_id: i64,
        product_name: &str,
        units: i64,
    ) -> DbResult<SupplyRequest> {
        if units <= 0 {
            return Err(CoreError::from(ValidationError::MustBePositive {
                field: "units".to_string(),
            })
            .into());
        }
        validate_unit_ceiling("units", units, 1).map_err(CoreError::from)?;

        debug!(
            user_id = session.user_id,
            warehouse_id,
            store_id,
            product = %product_name,
            units,
            "Placing supply request"
        );

        let mut tx = self.pool.begin().await?;

        let warehouse: Option<(i64,)> =
            sqlx::query_as("SELECT warehouseID FROM Warehouse WHERE warehouseID = ?1")
                .bind(warehouse_id)
                .fetch_optional(&mut *tx)
                .await?;
        if warehouse.is_none() {
            return Err(CoreError::WarehouseNotFound(warehouse_id).into());
        }

        authorize_store(&mut *tx, session, store_id).await?;

        let stocked: Option<(i64,)> = sqlx::query_as(
            "SELECT numberOfUnits FROM Product WHERE storeID = ?1 AND productName = ?2",
        )
        .bind(store_id)
        .bind(product_name)
        .fetch_optional(&mut *tx)
        .await?;

        let Some((current_units,)) = stocked else {
            return Err(CoreError::ProductNotFound {
                store_id,
                product_name: product_name.to_string(),
            }
            .into());
        };

        let restocked_units =
            validate_unit_ceiling("number of units", current_units.saturating_add(units), 0)
                .map_err(CoreError::from)?;

        sqlx::query(
            r#"
            UPDATE Product
            SET numberOfUnits = ?3
            WHERE storeID = ?1 AND productName = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .bind(restocked_units)
        .execute(&mut *tx)
        .await?;

        let logged = sqlx::query(
            r#"
            INSERT INTO ProductSupplyRequests
                (managerID, warehouseID, storeID, productName, unitsRequested)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(session.user_id)
        .bind(warehouse_id)
        .bind(store_id)
        .bind(product_name)
        .bind(units)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        let request = SupplyRequest {
            request_number: logged.last_insert_rowid(),
            manager_id: session.user_id,
            warehouse_id,
            store_id,
            product_name: product_name.to_string(),
            units_requested: units,
        };

        info!(
            request_number = request.request_number,
            user_id = session.user_id,
            warehouse_id,
            store_id,
            product = %product_name,
            units,
            "Supply request placed"
        );
        Ok(request)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::test_support::fixture;
    use retail_core::validation::MAX_UNITS;
    use retail_core::{CoreError, ValidationError};

    #[tokio::test]
    async fn test_request_restocks_and_logs() {
        let fx = fixture().await;
        let supply = fx.db.supply();

        let request = supply
            .place_request(
                &fx.manager.session(),
                fx.warehouse.warehouse_id,
                fx.store.store_id,
                "Widget",
                10,
            )
            .await
            .unwrap();
        assert_eq!(request.units_requested, 10);
        assert_eq!(request.manager_id, fx.manager.user_id);

        let widget = fx.db.products().get(fx.store.store_id, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.number_of_units, 15);

        let logged = fx
            .db
            .executor()
            .execute_query("SELECT requestNumber FROM ProductSupplyRequests", &[])
            .await
            .unwrap();
        assert_eq!(logged, 1);
    }

    #[tokio::test]
    async fn test_rejections_write_nothing() {
        let fx = fixture().await;
        let supply = fx.db.supply();
        let session = fx.manager.session();

        let unknown_warehouse = supply
            .place_request(&session, 404, fx.store.store_id, "Widget", 1)
            .await;
        assert!(matches!(
            unknown_warehouse,
            Err(DbError::Rejected(CoreError::WarehouseNotFound(404)))
        ));

        let foreign_store = supply
            .place_request(
                &session,
                fx.warehouse.warehouse_id,
                fx.far_store.store_id,
                "Gadget",
                1,
            )
            .await;
        assert!(matches!(
            foreign_store,
            Err(DbError::Rejected(CoreError::NotStoreManager { .. }))
        ));

        let unknown_product = supply
            .place_request(
                &session,
                fx.warehouse.warehouse_id,
                fx.store.store_id,
                "Nothing",
                1,
            )
            .await;
        assert!(matches!(
            unknown_product,
            Err(DbError::Rejected(CoreError::ProductNotFound { .. }))
        ));

        assert!(supply
            .place_request(&session, fx.warehouse.warehouse_id, fx.store.store_id, "Widget", 0)
            .await
            .is_err());

        let logged = fx
            .db
            .executor()
            .execute_query("SELECT requestNumber FROM ProductSupplyRequests", &[])
            .await
            .unwrap();
        assert_eq!(logged, 0);
    }

    #[tokio::test]
    async fn test_oversized_request_leaves_stock_intact() {
        let fx = fixture().await;
        let supply = fx.db.supply();
        let session = fx.manager.session();
        let warehouse_id = fx.warehouse.warehouse_id;
        let store_id = fx.store.store_id;

        let huge = supply
            .place_request(&session, warehouse_id, store_id, "Widget", i64::MAX)
            .await;
        assert!(matches!(
            huge,
            Err(DbError::Rejected(CoreError::Validation(
                ValidationError::OutOfRange { .. }
            )))
        ));

        // Each request fits, but the running total may not pass the ceiling.
        supply
            .place_request(&session, warehouse_id, store_id, "Widget", MAX_UNITS - 5)
            .await
            .unwrap();
        let over = supply
            .place_request(&session, warehouse_id, store_id, "Widget", 1)
            .await;
        assert!(matches!(
            over,
            Err(DbError::Rejected(CoreError::Validation(
                ValidationError::OutOfRange { .. }
            )))
        ));

        let products = fx.db.products().list_for_store(store_id).await.unwrap();
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].number_of_units, MAX_UNITS);
    }

    #[tokio::test]
    async fn test_stock_column_refuses_non_integers() {
        let fx = fixture().await;

        let result = fx
            .db
            .executor()
            .execute_update(
                "UPDATE Product SET numberOfUnits = 1.5 WHERE productName = 'Widget'",
                &[],
            )
            .await;
        assert!(result.is_err());

        let widget = fx.db.products().get(fx.store.store_id, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.number_of_units, 5);
    }

    #[tokio::test]
    async fn test_warehouse_lookup() {
        let fx = fixture().await;
        let supply = fx.db.supply();

        assert_eq!(supply.warehouses().await.unwrap(), vec![fx.warehouse.clone()]);
        assert!(supply.warehouse(404).await.unwrap().is_none());
    }
}
