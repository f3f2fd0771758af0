//! # Domain Types
//!
//! Core domain types used throughout the retail console.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │      User       │   │      Store      │   │    Product      │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  userID         │◄──│  managerID      │   │  (storeID,      │       │
//! │  │  role (type)    │   │  storeID        │◄──│   productName)  │       │
//! │  │  lat / long     │   │  lat / long     │   │  numberOfUnits  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │     Order       │   │  ProductUpdate  │   │  SupplyRequest  │       │
//! │  │  (immutable)    │   │  (audit log)    │   │  (append-only)  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Field names follow Rust conventions; the `sqlx` feature maps them onto the
//! camelCase column names of the schema.

use chrono::{DateTime, NaiveDate, SubsecRound, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::geo::Coordinates;
use crate::money::Money;

// =============================================================================
// Role
// =============================================================================

/// What a user is allowed to do. Stored in `Users.type`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Manager,
    Admin,
}

impl Role {
    /// All roles, in menu order.
    pub const ALL: [Role; 3] = [Role::Customer, Role::Manager, Role::Admin];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Customer => "customer",
            Role::Manager => "manager",
            Role::Admin => "admin",
        }
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::Customer
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    /// Case-insensitive; surrounding whitespace is ignored so values padded
    /// by fixed-width CHAR columns still parse.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "customer" => Ok(Role::Customer),
            "manager" => Ok(Role::Manager),
            "admin" => Ok(Role::Admin),
            _ => Err(ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: Role::ALL.iter().map(|r| r.as_str().to_string()).collect(),
            }),
        }
    }
}

// =============================================================================
// Session
// =============================================================================

/// The authenticated identity for one interactive session.
///
/// Passed explicitly into every workflow; there is no process-wide login
/// state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Session {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "userID"))]
    pub user_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub role: Role,
}

impl Session {
    pub const fn new(user_id: i64, role: Role) -> Self {
        Session { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Managers and admins can run the inventory and analytics workflows.
    pub fn is_staff(&self) -> bool {
        matches!(self.role, Role::Manager | Role::Admin)
    }

    /// Ownership gate.
    ///
    /// ```text
    /// admin    → any store
    /// manager  → only stores where Store.managerID == session.user_id
    /// customer → none
    /// ```
    pub fn can_manage(&self, store: &Store) -> bool {
        match self.role {
            Role::Admin => true,
            Role::Manager => store.manager_id == self.user_id,
            Role::Customer => false,
        }
    }
}

// =============================================================================
// User
// =============================================================================

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "userID"))]
    pub user_id: i64,
    pub name: String,
    /// Stored and compared in plaintext.
    pub password: String,
    pub latitude: f64,
    pub longitude: f64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "type"))]
    pub role: Role,
}

impl User {
    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }

    pub fn session(&self) -> Session {
        Session::new(self.user_id, self.role)
    }
}

/// Input for registering a user. Always becomes a customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub password: String,
    pub latitude: f64,
    pub longitude: f64,
}

// =============================================================================
// Store
// =============================================================================

/// A retail store. Read-only for the console.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Store {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "storeID"))]
    pub store_id: i64,
    pub name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "managerID"))]
    pub manager_id: i64,
    pub latitude: f64,
    pub longitude: f64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "dateEstablished"))]
    pub date_established: NaiveDate,
}

impl Store {
    pub fn location(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// A store together with its distance from the viewing user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearbyStore {
    pub store: Store,
    pub distance: f64,
}

// =============================================================================
// Product
// =============================================================================

/// Stock of one product at one store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "storeID"))]
    pub store_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "productName"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "numberOfUnits"))]
    pub number_of_units: i64,
    /// Dollars, as stored in the REAL column. Use [`Product::price`].
    #[cfg_attr(feature = "sqlx", sqlx(rename = "pricePerUnit"))]
    pub price_per_unit: f64,
}

impl Product {
    /// Returns the unit price as Money.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_dollars(self.price_per_unit)
    }

    /// Checks if `quantity` units can be ordered.
    pub fn can_fulfill(&self, quantity: i64) -> bool {
        quantity > 0 && self.number_of_units >= quantity
    }
}

/// Replacement values for a product update. Both are absolute values.
///
/// A `price` equal to the product's current `price()` keeps the stored
/// `pricePerUnit` untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductChanges {
    pub number_of_units: i64,
    pub price: Money,
}

impl ProductChanges {
    /// Changes that leave the product as it is.
    pub fn unchanged(product: &Product) -> Self {
        ProductChanges {
            number_of_units: product.number_of_units,
            price: product.price(),
        }
    }
}

// =============================================================================
// Order
// =============================================================================

/// A placed order. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "orderNumber"))]
    pub order_number: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "customerID"))]
    pub customer_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "storeID"))]
    pub store_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "productName"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "unitsOrdered"))]
    pub units_ordered: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "orderTime"))]
    pub order_time: DateTime<Utc>,
}

// =============================================================================
// Product Update (audit log)
// =============================================================================

/// One entry of the product edit audit log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductUpdate {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "updateNumber"))]
    pub update_number: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "managerID"))]
    pub manager_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "storeID"))]
    pub store_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "productName"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "updatedOn"))]
    pub updated_on: DateTime<Utc>,
}

// =============================================================================
// Warehouse & Supply Requests
// =============================================================================

/// A warehouse that can restock stores. Reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Warehouse {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "warehouseID"))]
    pub warehouse_id: i64,
    pub area: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// A logged restock of a store product from a warehouse.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SupplyRequest {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "requestNumber"))]
    pub request_number: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "managerID"))]
    pub manager_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "warehouseID"))]
    pub warehouse_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "storeID"))]
    pub store_id: i64,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "productName"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "unitsRequested"))]
    pub units_requested: i64,
}

// =============================================================================
// Analytics
// =============================================================================

/// A product ranked by how often it was ordered at a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopularProduct {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "productName"))]
    pub product_name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "orderCount"))]
    pub order_count: i64,
}

/// A customer ranked by how many orders they placed at a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct PopularCustomer {
    #[cfg_attr(feature = "sqlx", sqlx(rename = "customerID"))]
    pub customer_id: i64,
    pub name: String,
    #[cfg_attr(feature = "sqlx", sqlx(rename = "orderCount"))]
    pub order_count: i64,
}

// =============================================================================
// Timestamps
// =============================================================================

/// Current time truncated to the second, used for orders and audit rows.
pub fn timestamp_now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(0)
}

// =============================================================================
// Unit Tests
// =============================================================================
