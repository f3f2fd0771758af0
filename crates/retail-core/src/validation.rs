//! # Validation Module
//!
//! Parsing and validation of raw console input.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Console prompt                                               │
//! │  ├── Reads a raw line                                                  │
//! │  └── Re-prompts while THIS MODULE returns ValidationError              │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Workflow command                                             │
//! │  ├── Role / ownership gate                                             │
//! │  └── Store distance, stock level                                       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (SQLite)                                            │
//! │  ├── NOT NULL / CHECK constraints                                      │
//! │  └── Foreign key constraints                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Keep-Current Sentinel
//! Update prompts treat an empty line as "keep the stored value":
//! ```rust
//! use retail_core::validation::{keep_current, parse_units};
//!
//! assert_eq!(keep_current("", 7, parse_units).unwrap(), 7);
//! assert_eq!(keep_current("12", 7, parse_units).unwrap(), 12);
//! ```

use crate::error::ValidationError;
use crate::types::{NewUser, Role};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Lower bound of the coordinate plane.
pub const COORDINATE_MIN: f64 = 0.0;

/// Upper bound of the coordinate plane.
pub const COORDINATE_MAX: f64 = 100.0;

/// Longest accepted user name, matching the `Users.name` column.
pub const MAX_NAME_LEN: usize = 50;

/// Longest accepted product name, matching the `Product.productName` column.
pub const MAX_PRODUCT_NAME_LEN: usize = 30;

/// Largest quantity a single request or a stored stock level may hold.
pub const MAX_UNITS: i64 = 1_000_000;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a user name: non-empty after trimming, at most 50 characters.
pub fn validate_user_name(name: &str) -> ValidationResult<()> {
    validate_required_text("name", name, MAX_NAME_LEN)
}

/// Validates a password: non-empty, at most 50 characters.
///
/// Passwords are compared verbatim, so surrounding whitespace is kept.
pub fn validate_password(password: &str) -> ValidationResult<()> {
    if password.is_empty() {
        return Err(ValidationError::Required {
            field: "password".to_string(),
        });
    }
    if password.chars().count() > MAX_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "password".to_string(),
            max: MAX_NAME_LEN,
        });
    }
    Ok(())
}

/// Validates a product name and returns it trimmed.
///
/// ## Example
/// ```rust
/// use retail_core::validation::parse_product_name;
///
/// assert_eq!(parse_product_name("  Widget ").unwrap(), "Widget");
/// assert!(parse_product_name("").is_err());
/// ```
pub fn parse_product_name(input: &str) -> ValidationResult<String> {
    validate_required_text("product name", input, MAX_PRODUCT_NAME_LEN)?;
    Ok(input.trim().to_string())
}

fn validate_required_text(field: &str, value: &str, max: usize) -> ValidationResult<()> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }

    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Parses an integer identifier (store, user, warehouse).
pub fn parse_id(field: &str, input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a whole number".to_string(),
        })
}

/// Parses a unit count for orders and supply requests.
///
/// ## Rules
/// - Must be a whole number
/// - Must be positive (> 0)
/// - At most [`MAX_UNITS`]
pub fn parse_units(input: &str) -> ValidationResult<i64> {
    let units = parse_id("units", input)?;
    if units <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "units".to_string(),
        });
    }
    validate_unit_ceiling("units", units, 1)
}

/// Parses an absolute stock level for product updates (zero allowed).
pub fn parse_stock_level(input: &str) -> ValidationResult<i64> {
    let units = parse_id("number of units", input)?;
    if units < 0 {
        return Err(ValidationError::MustNotBeNegative {
            field: "number of units".to_string(),
        });
    }
    validate_unit_ceiling("number of units", units, 0)
}

/// Rejects quantities above [`MAX_UNITS`]; `min` only feeds the message.
///
/// ## Example
/// ```rust
/// use retail_core::validation::{validate_unit_ceiling, MAX_UNITS};
///
/// assert_eq!(validate_unit_ceiling("units", MAX_UNITS, 1).unwrap(), MAX_UNITS);
/// assert!(validate_unit_ceiling("units", i64::MAX, 1).is_err());
/// ```
pub fn validate_unit_ceiling(field: &str, units: i64, min: i64) -> ValidationResult<i64> {
    if units > MAX_UNITS {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: min as f64,
            max: MAX_UNITS as f64,
        });
    }
    Ok(units)
}

/// Reads the numbered type menu of the user update.
///
/// `1` keeps `current`; `2`, `3` and `4` select customer, manager and admin.
pub fn parse_role_choice(input: &str, current: Role) -> ValidationResult<Role> {
    match input.trim() {
        "1" => Ok(current),
        "2" => Ok(Role::Customer),
        "3" => Ok(Role::Manager),
        "4" => Ok(Role::Admin),
        _ => Err(ValidationError::NotAllowed {
            field: "type".to_string(),
            allowed: ["1", "2", "3", "4"].map(String::from).to_vec(),
        }),
    }
}

/// Validates that a coordinate lies in `[0, 100]`.
///
/// ## Example
/// ```rust
/// use retail_core::validation::validate_coordinate;
///
/// assert!(validate_coordinate("latitude", 0.0).is_ok());
/// assert!(validate_coordinate("latitude", 100.0).is_ok());
/// assert!(validate_coordinate("latitude", 100.5).is_err());
/// assert!(validate_coordinate("longitude", f64::NAN).is_err());
/// ```
pub fn validate_coordinate(field: &str, value: f64) -> ValidationResult<()> {
    // NaN fails both comparisons, so it is rejected here too.
    if !(COORDINATE_MIN..=COORDINATE_MAX).contains(&value) {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            min: COORDINATE_MIN,
            max: COORDINATE_MAX,
        });
    }
    Ok(())
}

/// Parses and range-checks a coordinate.
pub fn parse_coordinate(field: &str, input: &str) -> ValidationResult<f64> {
    let value = input
        .trim()
        .parse::<f64>()
        .map_err(|_| ValidationError::InvalidFormat {
            field: field.to_string(),
            reason: "expected a number".to_string(),
        })?;
    validate_coordinate(field, value)?;
    Ok(value)
}

// =============================================================================
// Composite Validators
// =============================================================================

/// Validates a registration before anything is written.
pub fn validate_new_user(user: &NewUser) -> ValidationResult<()> {
    validate_user_name(&user.name)?;
    validate_password(&user.password)?;
    validate_coordinate("latitude", user.latitude)?;
    validate_coordinate("longitude", user.longitude)?;
    Ok(())
}

/// Applies the keep-current sentinel: an empty (or all-whitespace) input
/// returns `current`, anything else goes through `parse`.
pub fn keep_current<T>(
    input: &str,
    current: T,
    parse: impl FnOnce(&str) -> ValidationResult<T>,
) -> ValidationResult<T> {
    if input.trim().is_empty() {
        Ok(current)
    } else {
        parse(input)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
