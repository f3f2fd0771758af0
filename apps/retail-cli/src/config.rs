//! # Console Configuration
//!
//! Built once at startup from the command line and the environment.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`RETAIL_*`)
//! 2. Positional arguments `<dbname> <port> <user>`
//! 3. Defaults (this file)
//!
//! `<port>` and `<user>` describe the connection target. SQLite has no server,
//! so they are only recorded and logged.

use clap::Parser;
use retail_db::DbConfig;
use std::path::{Path, PathBuf};

/// Overrides the database file derived from `<dbname>`.
pub const ENV_DB_PATH: &str = "RETAIL_DB_PATH";

/// Overrides the pool size.
pub const ENV_MAX_CONNECTIONS: &str = "RETAIL_MAX_CONNECTIONS";

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

/// Command line arguments.
#[derive(Debug, Clone, Parser)]
#[command(name = "retail-cli", version, about = "Retail chain console")]
pub struct CliArgs {
    /// Database name; `<dbname>.db` unless it already names a file
    pub dbname: String,

    /// Port of the database endpoint (recorded only)
    pub port: u16,

    /// Database user (recorded only)
    pub user: String,
}

/// Resolved console configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub database_path: PathBuf,
    pub port: u16,
    pub user: String,
    pub max_connections: u32,
}

impl CliConfig {
    /// Builds the configuration from arguments and the process environment.
    pub fn from_args(args: CliArgs) -> Self {
        Self::with_env(args, |key| std::env::var(key).ok())
    }

    /// Builds the configuration with an injectable environment lookup.
    ///
    /// ## Environment Variables
    /// - `RETAIL_DB_PATH`: database file, replaces the one derived from `<dbname>`
    /// - `RETAIL_MAX_CONNECTIONS`: pool size (ignored unless a positive integer)
    pub fn with_env(args: CliArgs, env: impl Fn(&str) -> Option<String>) -> Self {
        let database_path = env(ENV_DB_PATH)
            .filter(|path| !path.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| resolve_db_path(&args.dbname));

        let max_connections = env(ENV_MAX_CONNECTIONS)
            .and_then(|value| value.trim().parse::<u32>().ok())
            .filter(|max| *max > 0)
            .unwrap_or(DEFAULT_MAX_CONNECTIONS);

        CliConfig {
            database_path,
            port: args.port,
            user: args.user,
            max_connections,
        }
    }

    /// Pool configuration for [`retail_db::Database::new`].
    pub fn db_config(&self) -> DbConfig {
        DbConfig::new(self.database_path.clone()).max_connections(self.max_connections)
    }
}

/// Maps `<dbname>` onto a SQLite file.
///
/// ```text
/// retail          → retail.db
/// retail.sqlite   → retail.sqlite
/// data/retail     → data/retail
/// ```
pub fn resolve_db_path(dbname: &str) -> PathBuf {
    let path = Path::new(dbname);
    let has_separator = dbname.contains('/') || dbname.contains(std::path::MAIN_SEPARATOR);

    if has_separator || path.extension().is_some() {
        path.to_path_buf()
    } else {
        PathBuf::from(format!("{}.db", dbname))
    }
}
