//! # Shopping Commands
//!
//! Available to every logged-in role.
//!
//! ## Order Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Enter Store ID ──► Enter Product Name ──► Enter Number of units        │
//! │                                                  │                      │
//! │                                                  ▼                      │
//! │                          orders().place_order (one transaction)         │
//! │                                                  │                      │
//! │              ┌───────────────────────────────────┼─────────────┐        │
//! │              ▼                                   ▼             ▼        │
//! │     store too far / missing        not enough stock       committed     │
//! │     "does not exist or is          "does not exist or     order row +   │
//! │      too far!"                      not enough stock"     decrement     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::io::{BufRead, Write};

use retail_core::validation::{parse_id, parse_product_name, parse_units};
use retail_core::{CoreError, Session, DELIVERY_RADIUS, TOP_N};
use retail_db::Database;

use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::render::{nearby_stores_table, orders_table, print_table, products_table};

/// Lists stores within the delivery radius of the user's stored location.
pub async fn view_stores<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    let user = db
        .users()
        .get_by_id(session.user_id)
        .await?
        .ok_or(CoreError::UserNotFound(session.user_id))?;

    let nearby = db.stores().within_radius(&user.location()).await?;
    if print_table(prompter, &nearby_stores_table(&nearby))? == 0 {
        prompter.say(format!("No stores within {} units of you.", DELIVERY_RADIUS))?;
    }
    Ok(())
}

/// Lists the products of a store.
pub async fn view_products<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    let store_id = prompter.read_parsed("\tEnter Store ID: ", |s| parse_id("store ID", s))?;

    if db.stores().get_by_id(store_id).await?.is_none() {
        return Err(CoreError::StoreNotFound(store_id).into());
    }

    let products = db.products().list_for_store(store_id).await?;
    if print_table(prompter, &products_table(&products))? == 0 {
        prompter.say("This store has no products.")?;
    }
    Ok(())
}

/// Places an order for the session user.
pub async fn place_order<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    let store_id = prompter.read_parsed("\tEnter Store ID: ", |s| parse_id("store ID", s))?;
    let product_name = prompter.read_parsed("\tEnter Product Name: ", parse_product_name)?;
    let units = prompter.read_parsed("\tEnter Number of units: ", parse_units)?;

    let order = db
        .orders()
        .place_order(session, store_id, &product_name, units)
        .await?;

    prompter.say(format!(
        "Order {} placed: {} x {} from store {}.",
        order.order_number, order.units_ordered, order.product_name, order.store_id
    ))?;

    let total = db
        .products()
        .get(store_id, &product_name)
        .await?
        .and_then(|product| product.price().checked_mul(units));
    if let Some(total) = total {
        prompter.say(format!("Total: {}", total))?;
    }
    Ok(())
}

/// Shows the session user's most recent orders.
pub async fn view_recent_orders<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    let orders = db.orders().recent_for_customer(session.user_id, TOP_N).await?;
    if print_table(prompter, &orders_table(&orders))? == 0 {
        prompter.say("You have not placed any orders yet.")?;
    }
    Ok(())
}
