//! # Order Repository
//!
//! Order placement and the order-based analytics views.
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      place_order (one transaction)                      │
//! │                                                                         │
//! │  1. Customer coordinates ── current Users row                           │
//! │  2. Store lookup ─────────── missing or distance > 30                   │
//! │        │                      └──► StoreUnavailable, ROLLBACK            │
//! │  3. Product lookup ───────── missing or units < requested               │
//! │        │                      └──► ProductUnavailable, ROLLBACK          │
//! │  4. INSERT Orders (orderTime truncated to the second)                   │
//! │  5. UPDATE Product SET numberOfUnits = numberOfUnits - n                │
//! │        WHERE ... AND numberOfUnits >= n                                 │
//! │        │                                                                │
//! │        ├── 0 rows ──► ProductUnavailable, ROLLBACK (order row undone)    │
//! │        └── 1 row  ──► COMMIT                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The guard in step 5 keeps the stock check honest when another console
//! sells the same product between steps 3 and 5.

use retail_core::geo::is_within_radius;
use retail_core::{
    timestamp_now, CoreError, Coordinates, Order, PopularCustomer, PopularProduct, Product,
    Session, Store, ValidationError,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::authorize_store;
use crate::error::DbResult;

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Places an order for the session user.
    ///
    /// ## Errors
    /// * `Rejected(Validation)` - `units` is not positive
    /// * `Rejected(UserNotFound)` - The session user no longer exists
    /// * `Rejected(StoreUnavailable)` - Store missing or too far away
    /// * `Rejected(ProductUnavailable)` - Product missing or not enough stock
    ///
    /// On any error nothing is written.
    pub async fn place_order(
        &self,
        session: &Session,
        store_id: i64,
        product_name: &str,
        units: i64,
    ) -> DbResult<Order> {
        if units <= 0 {
            return Err(CoreError::from(ValidationError::MustBePositive {
                field: "units".to_string(),
            })
            .into());
        }

        debug!(
            user_id = session.user_id,
            store_id,
            product = %product_name,
            units,
            "Placing order"
        );

        let mut tx = self.pool.begin().await?;

        let customer: Option<(f64, f64)> =
            sqlx::query_as("SELECT latitude, longitude FROM Users WHERE userID = ?1")
                .bind(session.user_id)
                .fetch_optional(&mut *tx)
                .await?;
        let (latitude, longitude) = customer.ok_or(CoreError::UserNotFound(session.user_id))?;
        let origin = Coordinates::new(latitude, longitude);

        let store = sqlx::query_as::<_, Store>(
            r#"
            SELECT storeID, name, managerID, latitude, longitude, dateEstablished
            FROM Store
            WHERE storeID = ?1
            "#,
        )
        .bind(store_id)
        .fetch_optional(&mut *tx)
        .await?;

        if !store.is_some_and(|s| is_within_radius(&origin, &s.location())) {
            warn!(user_id = session.user_id, store_id, "Order rejected: store unavailable");
            return Err(CoreError::StoreUnavailable { store_id }.into());
        }

        let unavailable = || CoreError::ProductUnavailable {
            store_id,
            product_name: product_name.to_string(),
            requested: units,
        };

        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT storeID, productName, numberOfUnits, pricePerUnit
            FROM Product
            WHERE storeID = ?1 AND productName = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .fetch_optional(&mut *tx)
        .await?;

        if !product.is_some_and(|p| p.can_fulfill(units)) {
            warn!(
                user_id = session.user_id,
                store_id,
                product = %product_name,
                units,
                "Order rejected: product unavailable"
            );
            return Err(unavailable().into());
        }

        let order_time = timestamp_now();
        let inserted = sqlx::query(
            r#"
            INSERT INTO Orders (customerID, storeID, productName, unitsOrdered, orderTime)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(session.user_id)
        .bind(store_id)
        .bind(product_name)
        .bind(units)
        .bind(order_time)
        .execute(&mut *tx)
        .await?;

        let decremented = sqlx::query(
            r#"
            UPDATE Product
            SET numberOfUnits = numberOfUnits - ?3
            WHERE storeID = ?1 AND productName = ?2 AND numberOfUnits >= ?3
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .bind(units)
        .execute(&mut *tx)
        .await?;

        if decremented.rows_affected() == 0 {
            warn!(store_id, product = %product_name, "Stock changed during order");
            return Err(unavailable().into());
        }

        tx.commit().await?;

        let order = Order {
            order_number: inserted.last_insert_rowid(),
            customer_id: session.user_id,
            store_id,
            product_name: product_name.to_string(),
            units_ordered: units,
            order_time,
        };

        info!(
            order_number = order.order_number,
            user_id = session.user_id,
            store_id,
            product = %product_name,
            units,
            "Order placed"
        );
        Ok(order)
    }

    /// The customer's own most recent orders, newest first.
    pub async fn recent_for_customer(&self, customer_id: i64, limit: u32) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT orderNumber, customerID, storeID, productName, unitsOrdered, orderTime
            FROM Orders
            WHERE customerID = ?1
            ORDER BY orderTime DESC, orderNumber DESC
            LIMIT ?2
            "#,
        )
        .bind(customer_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Every order of a store, newest first.
    pub async fn for_store(&self, session: &Session, store_id: i64) -> DbResult<Vec<Order>> {
        authorize_store(&self.pool, session, store_id).await?;

        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT orderNumber, customerID, storeID, productName, unitsOrdered, orderTime
            FROM Orders
            WHERE storeID = ?1
            ORDER BY orderTime DESC, orderNumber DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Products of a store ranked by number of orders; ties by name.
    pub async fn popular_products(
        &self,
        session: &Session,
        store_id: i64,
        limit: u32,
    ) -> DbResult<Vec<PopularProduct>> {
        authorize_store(&self.pool, session, store_id).await?;

        let products = sqlx::query_as::<_, PopularProduct>(
            r#"
            SELECT productName, COUNT(*) AS orderCount
            FROM Orders
            WHERE storeID = ?1
            GROUP BY productName
            ORDER BY orderCount DESC, productName ASC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Customers of a store ranked by number of orders; ties by id.
    pub async fn popular_customers(
        &self,
        session: &Session,
        store_id: i64,
        limit: u32,
    ) -> DbResult<Vec<PopularCustomer>> {
        authorize_store(&self.pool, session, store_id).await?;

        let customers = sqlx::query_as::<_, PopularCustomer>(
            r#"
            SELECT o.customerID AS customerID, u.name AS name, COUNT(*) AS orderCount
            FROM Orders o
            JOIN Users u ON u.userID = o.customerID
            WHERE o.storeID = ?1
            GROUP BY o.customerID, u.name
            ORDER BY orderCount DESC, o.customerID ASC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(customers)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use crate::error::DbError;
    use crate::test_support::{fixture, product, store, user};
    use retail_core::{CoreError, Role};

    #[tokio::test]
    async fn test_widget_scenario() {
        let fx = fixture().await;
        let session = fx.customer.session();
        let orders = fx.db.orders();

        let order = orders
            .place_order(&session, fx.store.store_id, "Widget", 3)
            .await
            .unwrap();
        assert_eq!(order.units_ordered, 3);
        assert_eq!(order.customer_id, fx.customer.user_id);

        let widget = fx.db.products().get(fx.store.store_id, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.number_of_units, 2);

        let again = orders
            .place_order(&session, fx.store.store_id, "Widget", 3)
            .await;
        assert!(matches!(
            again,
            Err(DbError::Rejected(CoreError::ProductUnavailable { requested: 3, .. }))
        ));

        let widget = fx.db.products().get(fx.store.store_id, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.number_of_units, 2);

        let history = orders.recent_for_customer(fx.customer.user_id, 5).await.unwrap();
        assert_eq!(history, vec![order]);
    }

    #[tokio::test]
    async fn test_far_or_missing_store_is_unavailable() {
        let fx = fixture().await;
        let session = fx.customer.session();
        let orders = fx.db.orders();

        for store_id in [fx.far_store.store_id, 404] {
            let result = orders.place_order(&session, store_id, "Gadget", 1).await;
            assert!(matches!(
                result,
                Err(DbError::Rejected(CoreError::StoreUnavailable { .. }))
            ));
        }

        let gadget = fx
            .db
            .products()
            .get(fx.far_store.store_id, "Gadget")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(gadget.number_of_units, 10);
        assert!(orders
            .recent_for_customer(fx.customer.user_id, 5)
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn test_store_exactly_at_radius_is_reachable() {
        let fx = fixture().await;
        // Customer at (10, 10), store 30 units away.
        let edge = store(&fx.db, "Edge", &fx.manager, 10.0, 40.0).await;
        product(&fx.db, edge.store_id, "Lamp", 4, 12.0).await;

        let order = fx
            .db
            .orders()
            .place_order(&fx.customer.session(), edge.store_id, "Lamp", 1)
            .await
            .unwrap();
        assert_eq!(order.store_id, edge.store_id);

        let lamp = fx.db.products().get(edge.store_id, "Lamp").await.unwrap().unwrap();
        assert_eq!(lamp.number_of_units, 3);
    }

    #[tokio::test]
    async fn test_unknown_product_and_bad_units() {
        let fx = fixture().await;
        let session = fx.customer.session();
        let orders = fx.db.orders();

        assert!(matches!(
            orders.place_order(&session, fx.store.store_id, "Nothing", 1).await,
            Err(DbError::Rejected(CoreError::ProductUnavailable { .. }))
        ));
        assert!(matches!(
            orders.place_order(&session, fx.store.store_id, "Widget", 0).await,
            Err(DbError::Rejected(CoreError::Validation(_)))
        ));
    }

    #[tokio::test]
    async fn test_exact_stock_can_be_ordered() {
        let fx = fixture().await;

        fx.db
            .orders()
            .place_order(&fx.customer.session(), fx.store.store_id, "Widget", 5)
            .await
            .unwrap();

        let widget = fx.db.products().get(fx.store.store_id, "Widget").await.unwrap().unwrap();
        assert_eq!(widget.number_of_units, 0);
    }

    #[tokio::test]
    async fn test_popularity_rankings() {
        let fx = fixture().await;
        product(&fx.db, fx.store.store_id, "Apple", 50, 0.5).await;
        product(&fx.db, fx.store.store_id, "Bread", 50, 3.0).await;
        let bob = user(&fx.db, "Bob", Role::Customer, 12.0, 12.0).await;

        let orders = fx.db.orders();
        let amy = fx.customer.session();
        let bob_session = bob.session();
        for (who, name) in [
            (&amy, "Bread"),
            (&amy, "Apple"),
            (&bob_session, "Bread"),
            (&amy, "Widget"),
        ] {
            orders
                .place_order(who, fx.store.store_id, name, 1)
                .await
                .unwrap();
        }

        let staff = fx.manager.session();
        let popular = orders
            .popular_products(&staff, fx.store.store_id, 5)
            .await
            .unwrap();
        let ranked: Vec<(&str, i64)> = popular
            .iter()
            .map(|p| (p.product_name.as_str(), p.order_count))
            .collect();
        assert_eq!(ranked, vec![("Bread", 2), ("Apple", 1), ("Widget", 1)]);

        let customers = orders
            .popular_customers(&staff, fx.store.store_id, 5)
            .await
            .unwrap();
        assert_eq!(customers[0].customer_id, fx.customer.user_id);
        assert_eq!(customers[0].name, "Amy");
        assert_eq!(customers[0].order_count, 3);
        assert_eq!(customers[1].customer_id, bob.user_id);

        let all = orders.for_store(&staff, fx.store.store_id).await.unwrap();
        assert_eq!(all.len(), 4);
        assert!(all.windows(2).all(|w| {
            (w[0].order_time, w[0].order_number) > (w[1].order_time, w[1].order_number)
        }));

        let limited = orders
            .popular_products(&staff, fx.store.store_id, 2)
            .await
            .unwrap();
        assert_eq!(limited.len(), 2);
    }

    #[tokio::test]
    async fn test_analytics_respect_ownership() {
        let fx = fixture().await;
        let orders = fx.db.orders();

        let foreign = orders
            .popular_products(&fx.manager.session(), fx.far_store.store_id, 5)
            .await;
        assert!(matches!(
            foreign,
            Err(DbError::Rejected(CoreError::NotStoreManager { .. }))
        ));
        assert!(orders
            .for_store(&fx.customer.session(), fx.store.store_id)
            .await
            .is_err());
        assert!(orders
            .popular_customers(&fx.admin.session(), fx.far_store.store_id, 5)
            .await
            .unwrap()
            .is_empty());
    }
}
