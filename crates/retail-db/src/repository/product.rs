//! # Product Repository
//!
//! Database operations for store products and the product update audit log.
//!
//! ## Audited Update
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    update_with_audit                                    │
//! │                                                                         │
//! │  Console reads product (units=5, price=2.00) and prompts new values     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  BEGIN                                                                  │
//! │  ├── ownership gate (manager → own stores, admin → any)                 │
//! │  ├── UPDATE Product SET units=?, price=?                                │
//! │  │     WHERE ... AND numberOfUnits = 5 AND pricePerUnit = 2.0           │
//! │  │        │                                                             │
//! │  │        ├── 0 rows → Conflict (someone else changed it), ROLLBACK     │
//! │  │        └── 1 row  → continue                                         │
//! │  ├── INSERT ProductUpdates (actor, store, product, now)                 │
//! │  COMMIT                                                                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use retail_core::validation::validate_unit_ceiling;
use retail_core::{
    timestamp_now, CoreError, Product, ProductChanges, ProductUpdate, Session, ValidationError,
};
use sqlx::SqlitePool;
use tracing::{debug, info, warn};

use super::authorize_store;
use crate::error::{DbError, DbResult};

/// Repository for product database operations.
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists the products of one store by name. Open to every role.
    pub async fn list_for_store(&self, store_id: i64) -> DbResult<Vec<Product>> {
        debug!(store_id, "Listing products");

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT storeID, productName, numberOfUnits, pricePerUnit
            FROM Product
            WHERE storeID = ?1
            ORDER BY productName
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets one product of a store.
    pub async fn get(&self, store_id: i64, product_name: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            SELECT storeID, productName, numberOfUnits, pricePerUnit
            FROM Product
            WHERE storeID = ?1 AND productName = ?2
            "#,
        )
        .bind(store_id)
        .bind(product_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Replaces the stock level and price of a product and logs the edit.
    ///
    /// ## Arguments
    /// * `session` - Acting manager or admin; recorded in the audit row
    /// * `current` - The product as it was displayed to the user
    /// * `changes` - Absolute replacement values
    ///
    /// A price equal to `current.price()` writes `current.price_per_unit`
    /// back as stored, so sub-cent values survive a quantity-only edit.
    ///
    /// ## Errors
    /// * `Rejected(StoreNotFound | NotStoreManager)` - Ownership gate failed
    /// * `Rejected(Validation)` - Negative quantity or price
    /// * `Conflict` - The product changed (or vanished) since `current` was read
    pub async fn update_with_audit(
        &self,
        session: &Session,
        current: &Product,
        changes: ProductChanges,
    ) -> DbResult<ProductUpdate> {
        if changes.number_of_units < 0 {
            return Err(CoreError::from(ValidationError::MustNotBeNegative {
                field: "number of units".to_string(),
            })
            .into());
        }
        validate_unit_ceiling("number of units", changes.number_of_units, 0)
            .map_err(CoreError::from)?;
        if changes.price.is_negative() {
            return Err(CoreError::from(ValidationError::MustNotBeNegative {
                field: "price".to_string(),
            })
            .into());
        }

        debug!(
            store_id = current.store_id,
            product = %current.product_name,
            units = changes.number_of_units,
            price = %changes.price,
            "Updating product"
        );

        let new_price = if changes.price == current.price() {
            current.price_per_unit
        } else {
            changes.price.to_dollars()
        };

        let mut tx = self.pool.begin().await?;

        authorize_store(&mut *tx, session, current.store_id).await?;

        let result = sqlx::query(
            r#"
            UPDATE Product
            SET numberOfUnits = ?1, pricePerUnit = ?2
            WHERE storeID = ?3 AND productName = ?4
              AND numberOfUnits = ?5 AND pricePerUnit = ?6
            "#,
        )
        .bind(changes.number_of_units)
        .bind(new_price)
        .bind(current.store_id)
        .bind(&current.product_name)
        .bind(current.number_of_units)
        .bind(current.price_per_unit)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            warn!(
                store_id = current.store_id,
                product = %current.product_name,
                "Product changed since it was read"
            );
            return Err(DbError::Conflict(format!(
                "product '{}' at store {} was changed by someone else",
                current.product_name, current.store_id
            )));
        }

        let updated_on = timestamp_now();
        let audit = sqlx::query(
            r#"
            INSERT INTO ProductUpdates (managerID, storeID, productName, updatedOn)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(session.user_id)
        .bind(current.store_id)
        .bind(&current.product_name)
        .bind(updated_on)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        info!(
            user_id = session.user_id,
            store_id = current.store_id,
            product = %current.product_name,
            units = changes.number_of_units,
            price = %changes.price,
            "Product updated"
        );

        Ok(ProductUpdate {
            update_number: audit.last_insert_rowid(),
            manager_id: session.user_id,
            store_id: current.store_id,
            product_name: current.product_name.clone(),
            updated_on,
        })
    }

    /// Most recent audit rows of a store, newest first.
    pub async fn recent_updates(
        &self,
        session: &Session,
        store_id: i64,
        limit: u32,
    ) -> DbResult<Vec<ProductUpdate>> {
        authorize_store(&self.pool, session, store_id).await?;

        let updates = sqlx::query_as::<_, ProductUpdate>(
            r#"
            SELECT updateNumber, managerID, storeID, productName, updatedOn
            FROM ProductUpdates
            WHERE storeID = ?1
            ORDER BY updatedOn DESC, updateNumber DESC
            LIMIT ?2
            "#,
        )
        .bind(store_id)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(updates)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
