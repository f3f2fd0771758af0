//! # Console Commands
//!
//! One function per menu entry. Each command:
//!
//! 1. Checks the session role (the repositories re-check ownership)
//! 2. Prompts for its inputs, re-prompting on malformed values
//! 3. Calls a repository and prints the outcome
//!
//! ## Command Categories
//!
//! ### Account
//! - `create_user` - Register a customer
//! - `log_in` - Start a session
//!
//! ### Shopping (every role)
//! - `view_stores` - Stores within the delivery radius
//! - `view_products` - Products of a store
//! - `place_order` - Order units of a product
//! - `view_recent_orders` - The session user's latest orders
//!
//! ### Management (manager, admin)
//! - `update_product`, `view_recent_updates`, `view_popular_products`,
//!   `view_popular_customers`, `place_supply_request`, `view_store_orders`
//!
//! ### Administration (admin)
//! - `admin_view_users`, `admin_view_products`, `admin_update_user`,
//!   `admin_update_product`, `admin_view_stores`, `admin_view_warehouses`,
//!   `admin_view_supply_requests`, `admin_view_orders`

pub mod account;
pub mod admin;
pub mod management;
pub mod shopping;

pub use account::*;
pub use admin::*;
pub use management::*;
pub use shopping::*;

use retail_core::{CoreError, Role, Session};

use crate::error::AppResult;

/// Managers and admins only.
pub(crate) fn require_staff(session: &Session) -> AppResult<()> {
    if session.is_staff() {
        Ok(())
    } else {
        Err(CoreError::RoleRequired {
            required: Role::Manager,
        }
        .into())
    }
}

/// Admins only.
pub(crate) fn require_admin(session: &Session) -> AppResult<()> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(CoreError::RoleRequired {
            required: Role::Admin,
        }
        .into())
    }
}
