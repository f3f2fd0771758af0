//! # Account Commands
//!
//! Registration and login from the main menu.

use std::io::{BufRead, Write};

use retail_core::validation::{parse_coordinate, validate_password, validate_user_name};
use retail_core::{NewUser, Session, User};
use retail_db::Database;
use tracing::debug;

use crate::error::AppResult;
use crate::prompt::Prompter;

/// Registers a new customer.
///
/// Name and password must be non-empty; coordinates are re-prompted until
/// they lie in `[0, 100]`.
pub async fn create_user<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> AppResult<User> {
    let name = prompter.read_parsed("\tEnter name: ", |s| {
        validate_user_name(s).map(|_| s.trim().to_string())
    })?;
    let password = prompter.read_parsed("\tEnter password: ", |s| {
        validate_password(s).map(|_| s.to_string())
    })?;
    let latitude = prompter.read_parsed("\tEnter latitude: ", |s| parse_coordinate("latitude", s))?;
    let longitude =
        prompter.read_parsed("\tEnter longitude: ", |s| parse_coordinate("longitude", s))?;

    let user = db
        .users()
        .create(&NewUser {
            name,
            password,
            latitude,
            longitude,
        })
        .await?;

    prompter.say(format!("User successfully created! Your user ID is {}.", user.user_id))?;
    Ok(user)
}

/// Checks credentials. Returns `None` (after telling the user) on mismatch.
pub async fn log_in<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> AppResult<Option<Session>> {
    let name = prompter.read_line("\tEnter name: ")?;
    let password = prompter.read_line("\tEnter password: ")?;

    let session = db.users().authenticate(&name, &password).await?;
    match &session {
        Some(session) => {
            debug!(user_id = session.user_id, role = %session.role, "Logged in");
            prompter.say(format!("Welcome! You are logged in as {}.", session.role))?;
        }
        None => prompter.say("Invalid name or password.")?,
    }

    Ok(session)
}
