//! # retail-core: Pure Business Logic for the Retail Console
//!
//! This crate holds the domain model and every rule that can be decided
//! without touching the database.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Retail Console Architecture                        │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 Console (apps/retail-cli)                       │   │
//! │  │    Main menu ──► Role menu ──► Prompts ──► Report tables        │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ retail-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │    geo    │  │   money   │  │ validation│  │   │
//! │  │   │ User,Store│  │ distance  │  │  cents    │  │  parsing  │  │   │
//! │  │   │ Session   │  │ radius 30 │  │  parsing  │  │  ranges   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO STDIN • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 retail-db (Database Layer)                      │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Store, Product, Order, Session, ...)
//! - [`geo`] - Euclidean distance and the delivery radius
//! - [`money`] - Integer-cent prices
//! - [`validation`] - Console input parsing and range checks
//! - [`report`] - Fixed-width report tables
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use retail_core::geo::{is_within_radius, Coordinates};
//!
//! let customer = Coordinates::new(10.0, 10.0);
//! let store = Coordinates::new(10.0, 35.0);
//! assert!(is_within_radius(&customer, &store));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod geo;
pub mod money;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use geo::{Coordinates, DELIVERY_RADIUS};
pub use money::Money;
pub use report::Table;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Number of rows shown by the "recent" and "popular" views.
pub const TOP_N: u32 = 5;
