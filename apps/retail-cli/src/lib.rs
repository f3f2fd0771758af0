//! # Retail Console Library
//!
//! Menus and workflows of the retail chain console. The binary in `main.rs`
//! only wires stdin/stdout and the database into [`menu::run`].
//!
//! ## Module Organization
//! ```text
//! retail_cli/
//! ├── lib.rs          ◄─── You are here (tracing setup)
//! ├── config.rs       ◄─── <dbname> <port> <user> + RETAIL_* overrides
//! ├── prompt.rs       ◄─── Line input with re-prompting
//! ├── render.rs       ◄─── Report tables
//! ├── menu.rs         ◄─── Main menu and role menus
//! ├── commands/
//! │   ├── account.rs      ◄─── Create user, log in
//! │   ├── shopping.rs     ◄─── Stores, products, orders
//! │   ├── management.rs   ◄─── Inventory, supply, analytics
//! │   └── admin.rs        ◄─── Users and global listings
//! └── error.rs        ◄─── AppError for commands
//! ```

pub mod commands;
pub mod config;
pub mod error;
pub mod menu;
pub mod prompt;
pub mod render;

use tracing_subscriber::EnvFilter;

/// Filter used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_FILTER: &str = "warn,retail=info,sqlx=warn";

/// Installs the tracing subscriber.
///
/// Events go to stderr so the menus on stdout stay readable. Calling this
/// more than once is harmless.
pub fn init_tracing() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}
