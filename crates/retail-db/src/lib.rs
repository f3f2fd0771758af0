//! # retail-db: Database Layer for the Retail Console
//!
//! This crate provides database access for the retail chain console.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Retail Console Data Flow                         │
//! │                                                                         │
//! │  Console command (place order)                                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     retail-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (embedded)  │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ StoreRepo     │    │ 001_initial_ │  │   │
//! │  │   │ QueryExecutor │    │ ProductRepo   │    │ schema.sql   │  │   │
//! │  │   │               │    │ OrderRepo     │    │              │  │   │
//! │  │   │               │    │ SupplyRepo    │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database (<dbname>.db)               │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`executor`] - Generic parameterized statement execution
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use retail_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("retail.db")).await?;
//!
//! if let Some(session) = db.users().authenticate("amy", "secret").await? {
//!     let order = db.orders().place_order(&session, 1, "Widget", 3).await?;
//! }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod executor;
pub mod migrations;
pub mod pool;
pub mod repository;

#[cfg(test)]
pub(crate) mod test_support;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use executor::{QueryExecutor, SqlValue};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::{
    OrderRepository, ProductRepository, StoreRepository, SupplyRepository, UserRepository,
};
