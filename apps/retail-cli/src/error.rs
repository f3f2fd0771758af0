//! # Console Error Type
//!
//! Unified error type for console workflows.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in the Console                            │
//! │                                                                         │
//! │  Menu choice ──► Command Function ── Result<T, AppError>                │
//! │                        │                                                │
//! │                        ├── DbError::Rejected(CoreError) ──┐             │
//! │                        ├── DbError::Conflict ─────────────┤             │
//! │                        ├── DbError::QueryFailed ──────────┼──► AppError │
//! │                        └── io::Error / end of input ──────┘             │
//! │                                                                         │
//! │  AppError { kind: Input }  → session ends, pool is closed               │
//! │  any other kind            → message printed, menu shown again          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use retail_core::{CoreError, ValidationError};
use retail_db::DbError;
use thiserror::Error;

/// Error returned by console commands.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    /// How the menu loop should react.
    pub kind: ErrorKind,

    /// Human-readable message for display
    pub message: String,
}

/// Classification of console errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed or out-of-range input.
    Validation,

    /// Referenced user, store, product or warehouse does not exist.
    NotFound,

    /// Role or ownership gate refused the action.
    Forbidden,

    /// Business rule refused the action (distance, stock, stale data).
    Rejected,

    /// Database failure.
    Data,

    /// Input stream closed or unreadable.
    Input,
}

/// Result type for console operations.
pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    /// Creates a new console error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        AppError {
            kind,
            message: message.into(),
        }
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        AppError::new(ErrorKind::Forbidden, message)
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: impl std::fmt::Display) -> Self {
        AppError::new(ErrorKind::NotFound, format!("{} not found: {}", resource, id))
    }

    /// The input stream reached end of file.
    pub fn input_closed() -> Self {
        AppError::new(ErrorKind::Input, "End of input")
    }

    /// True when the session cannot continue reading input.
    pub fn ends_session(&self) -> bool {
        self.kind == ErrorKind::Input
    }
}

/// Converts core errors to console errors.
impl From<CoreError> for AppError {
    fn from(err: CoreError) -> Self {
        let kind = match &err {
            CoreError::StoreNotFound(_)
            | CoreError::ProductNotFound { .. }
            | CoreError::UserNotFound(_)
            | CoreError::WarehouseNotFound(_) => ErrorKind::NotFound,
            CoreError::StoreUnavailable { .. } | CoreError::ProductUnavailable { .. } => {
                ErrorKind::Rejected
            }
            CoreError::NotStoreManager { .. } | CoreError::RoleRequired { .. } => {
                ErrorKind::Forbidden
            }
            CoreError::Validation(e) => return AppError::from(e.clone()),
        };
        AppError::new(kind, err.to_string())
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::new(ErrorKind::Validation, err.to_string())
    }
}

/// Converts database errors to console errors.
impl From<DbError> for AppError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::Rejected(core) => AppError::from(core),
            DbError::NotFound { entity, id } => AppError::not_found(&entity, id),
            DbError::Conflict(message) => AppError::new(
                ErrorKind::Rejected,
                format!("{}; nothing was changed, please try again", message),
            ),
            DbError::UniqueViolation { field, value } => AppError::new(
                ErrorKind::Validation,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::ForeignKeyViolation { message } => {
                tracing::error!("Foreign key violation: {}", message);
                AppError::new(ErrorKind::Validation, "Invalid reference")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                AppError::new(ErrorKind::Data, "Database operation failed")
            }
            DbError::ConnectionFailed(e) => {
                tracing::error!("Connection failed: {}", e);
                AppError::new(ErrorKind::Data, "Database connection failed")
            }
            DbError::MigrationFailed(e) => {
                tracing::error!("Migration failed: {}", e);
                AppError::new(ErrorKind::Data, "Database migration failed")
            }
            DbError::PoolExhausted => AppError::new(ErrorKind::Data, "Database is busy"),
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                AppError::new(ErrorKind::Data, "Database operation failed")
            }
        }
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::new(ErrorKind::Input, format!("I/O error: {}", err))
    }
}
