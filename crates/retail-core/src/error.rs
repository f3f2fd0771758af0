//! # Error Types
//!
//! Domain-specific error types for retail-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  retail-core errors (this file)                                        │
//! │  ├── CoreError        - Business rule rejections                       │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  retail-db errors (separate crate)                                     │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  Console errors (in app)                                               │
//! │  └── AppError         - What the menu reports to the user              │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → DbError → AppError → stdout       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::types::Role;

// =============================================================================
// Core Error
// =============================================================================

/// Business rule violations raised by the workflows.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    /// No store with this id.
    #[error("Store not found: {0}")]
    StoreNotFound(i64),

    /// Store is missing or outside the delivery radius of the customer.
    ///
    /// Both cases share one message; a far-away store reads the same as a
    /// missing one.
    #[error("The store {store_id} does not exist or is too far!")]
    StoreUnavailable { store_id: i64 },

    /// No product with this name at the store.
    #[error("Product '{product_name}' not found at store {store_id}")]
    ProductNotFound { store_id: i64, product_name: String },

    /// Product is missing or has fewer units than requested.
    ///
    /// ## User Workflow
    /// ```text
    /// Place order (qty: 5)
    ///      │
    ///      ▼
    /// Check stock: available=3
    ///      │
    ///      ▼
    /// ProductUnavailable { product_name: "Widget", requested: 5 }
    ///      │
    ///      ▼
    /// Console shows: "The product does not exist or there is not enough stock!"
    /// ```
    #[error("The product '{product_name}' does not exist or there is not enough stock for {requested} units!")]
    ProductUnavailable {
        store_id: i64,
        product_name: String,
        requested: i64,
    },

    /// No user with this id.
    #[error("User not found: {0}")]
    UserNotFound(i64),

    /// No warehouse with this id.
    #[error("Warehouse not found: {0}")]
    WarehouseNotFound(i64),

    /// Manager tried to act on a store managed by someone else.
    #[error("You do not manage store {store_id}")]
    NotStoreManager { store_id: i64 },

    /// The session role is not allowed to run this workflow.
    #[error("This action requires the {required} role")]
    RoleRequired { required: Role },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when user input doesn't meet requirements.
/// The console recovers from them by prompting again.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: f64, max: f64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    MustNotBeNegative { field: String },

    /// Invalid format (e.g., not a number).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::StoreUnavailable { store_id: 7 };
        assert_eq!(err.to_string(), "The store 7 does not exist or is too far!");

        let err = CoreError::RoleRequired {
            required: Role::Manager,
        };
        assert_eq!(err.to_string(), "This action requires the manager role");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::OutOfRange {
            field: "latitude".to_string(),
            min: 0.0,
            max: 100.0,
        };
        assert_eq!(err.to_string(), "latitude must be between 0 and 100");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "password".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
