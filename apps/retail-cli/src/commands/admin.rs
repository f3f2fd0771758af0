//! # Admin Commands
//!
//! Global user and product management plus raw listings of every table.
//! The listings go straight through the [`QueryExecutor`](retail_db::QueryExecutor)
//! with fixed statements.

use std::io::{BufRead, Write};

use retail_core::validation::{
    parse_coordinate, parse_id, parse_role_choice, validate_password, validate_user_name,
};
use retail_core::{CoreError, Session};
use retail_db::Database;

use super::{management, require_admin};
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::render::{print_query, print_table, stores_table, users_table};

const ALL_PRODUCTS_SQL: &str = "SELECT storeID, productName, numberOfUnits, pricePerUnit \
     FROM Product ORDER BY storeID, productName";

const ALL_WAREHOUSES_SQL: &str =
    "SELECT warehouseID, area, latitude, longitude FROM Warehouse ORDER BY warehouseID";

const ALL_SUPPLY_REQUESTS_SQL: &str = "SELECT requestNumber, managerID, warehouseID, storeID, \
     productName, unitsRequested FROM ProductSupplyRequests ORDER BY requestNumber DESC";

const TYPE_CHOICES: &[&str] = &["\t1. Keep", "\t2. customer", "\t3. manager", "\t4. admin"];

const ALL_ORDERS_SQL: &str = "SELECT orderNumber, customerID, storeID, productName, \
     unitsOrdered, orderTime FROM Orders ORDER BY orderTime DESC, orderNumber DESC";

/// Lists every user ordered by role, then name.
pub async fn admin_view_users<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    let users = db.users().list_all().await?;
    print_table(prompter, &users_table(&users))?;
    Ok(())
}

pub async fn admin_view_products<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    print_query(prompter, &db.executor(), ALL_PRODUCTS_SQL, &[]).await?;
    Ok(())
}

/// Edits any user. Blank answers keep the current values.
pub async fn admin_update_user<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;

    let user_id = prompter.read_parsed("\tEnter User ID: ", |s| parse_id("user ID", s))?;
    let mut user = db
        .users()
        .get_by_id(user_id)
        .await?
        .ok_or(CoreError::UserNotFound(user_id))?;

    prompter.say("Current values (leave blank to keep):")?;
    print_table(prompter, &users_table(std::slice::from_ref(&user)))?;

    user.name = prompter.read_optional("\tEnter name: ", user.name.clone(), |s| {
        validate_user_name(s).map(|_| s.trim().to_string())
    })?;
    user.password = prompter.read_optional("\tEnter password: ", user.password.clone(), |s| {
        validate_password(s).map(|_| s.to_string())
    })?;
    user.latitude = prompter.read_optional("\tEnter latitude: ", user.latitude, |s| {
        parse_coordinate("latitude", s)
    })?;
    user.longitude = prompter.read_optional("\tEnter longitude: ", user.longitude, |s| {
        parse_coordinate("longitude", s)
    })?;

    let current_role = user.role;
    prompter.say(format!("\tType (currently {}):", current_role))?;
    for line in TYPE_CHOICES {
        prompter.say(*line)?;
    }
    user.role = prompter.read_parsed("\tEnter choice for type: ", |s| {
        parse_role_choice(s, current_role)
    })?;

    db.users().update(&user).await?;
    prompter.say(format!("User {} updated.", user.user_id))?;
    Ok(())
}

/// Same as the manager update without the ownership restriction.
pub async fn admin_update_product<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    management::update_product(db, session, prompter).await
}

pub async fn admin_view_stores<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    let stores = db.stores().list_all().await?;
    print_table(prompter, &stores_table(&stores))?;
    Ok(())
}

pub async fn admin_view_warehouses<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    print_query(prompter, &db.executor(), ALL_WAREHOUSES_SQL, &[]).await?;
    Ok(())
}

pub async fn admin_view_supply_requests<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    if print_query(prompter, &db.executor(), ALL_SUPPLY_REQUESTS_SQL, &[]).await? == 0 {
        prompter.say("No supply requests yet.")?;
    }
    Ok(())
}

pub async fn admin_view_orders<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_admin(session)?;
    if print_query(prompter, &db.executor(), ALL_ORDERS_SQL, &[]).await? == 0 {
        prompter.say("No orders yet.")?;
    }
    Ok(())
}
