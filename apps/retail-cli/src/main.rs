//! # Retail Console Entry Point
//!
//! ```bash
//! retail-cli <dbname> <port> <user>
//! ```
//!
//! ## Startup Sequence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  1. Parse arguments (clap prints usage and exits on wrong arity)        │
//! │  2. Initialize tracing (stderr, RUST_LOG overrides)                     │
//! │  3. Connect to SQLite and run migrations, then a health check           │
//! │  4. Run the menus on stdin/stdout                                       │
//! │  5. Close the pool, whatever the menus returned                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io;
use std::process::ExitCode;

use clap::Parser;
use retail_cli::config::{CliArgs, CliConfig};
use retail_cli::menu::{self, GREETING};
use retail_cli::prompt::Prompter;
use retail_db::Database;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = CliArgs::parse();
    retail_cli::init_tracing();

    let config = CliConfig::from_args(args);
    println!("{}", GREETING);

    print!("Connecting to database...");
    info!(
        path = %config.database_path.display(),
        port = config.port,
        user = %config.user,
        "Connecting to database"
    );

    let db = match Database::new(config.db_config()).await {
        Ok(db) => db,
        Err(e) => {
            println!();
            error!(error = %e, "Startup failed");
            eprintln!("Unable to open database {}: {}", config.database_path.display(), e);
            return ExitCode::FAILURE;
        }
    };
    if !db.health_check().await {
        println!();
        error!(path = %config.database_path.display(), "Database did not answer");
        eprintln!("Database {} did not answer", config.database_path.display());
        db.close().await;
        return ExitCode::FAILURE;
    }
    println!("Done");

    let stdin = io::stdin();
    let mut prompter = Prompter::new(stdin.lock(), io::stdout());
    let outcome = menu::run(&db, &mut prompter).await;

    print!("Disconnecting from database...");
    db.close().await;
    println!("Done\n\nBye !");

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "Console stopped");
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
