//! # Management Commands
//!
//! Inventory and analytics for managers (their own stores) and admins (any
//! store). The repositories enforce the ownership gate inside their
//! transactions; [`choose_store`] checks it up front so the user is told
//! before answering further prompts.

use std::io::{BufRead, Write};

use retail_core::validation::{parse_id, parse_product_name, parse_stock_level, parse_units};
use retail_core::{CoreError, Money, Product, ProductChanges, Role, Session, Store, TOP_N};
use retail_db::Database;
use tracing::warn;

use super::require_staff;
use crate::error::AppResult;
use crate::prompt::Prompter;
use crate::render::{
    orders_table, popular_customers_table, popular_products_table, print_table, products_table,
    stores_table, updates_table, warehouses_table,
};

// =============================================================================
// Shared Prompts
// =============================================================================

/// Prompts for a store the session may manage.
///
/// Managers see the stores they manage before the prompt.
pub(crate) async fn choose_store<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<Store> {
    if session.role == Role::Manager {
        let managed = db.stores().managed_by(session.user_id).await?;
        prompter.say("Stores you manage:")?;
        if print_table(prompter, &stores_table(&managed))? == 0 {
            prompter.say("(none)")?;
        }
    }

    let store_id = prompter.read_parsed("\tEnter Store ID: ", |s| parse_id("store ID", s))?;
    let store = db
        .stores()
        .get_by_id(store_id)
        .await?
        .ok_or(CoreError::StoreNotFound(store_id))?;

    if !session.can_manage(&store) {
        warn!(user_id = session.user_id, store_id, "Store access denied");
        return Err(CoreError::NotStoreManager { store_id }.into());
    }
    Ok(store)
}

async fn choose_product<R: BufRead, W: Write>(
    db: &Database,
    store: &Store,
    prompter: &mut Prompter<R, W>,
) -> AppResult<Product> {
    let product_name = prompter.read_parsed("\tEnter Product Name: ", parse_product_name)?;
    let product = db
        .products()
        .get(store.store_id, &product_name)
        .await?
        .ok_or(CoreError::ProductNotFound {
            store_id: store.store_id,
            product_name,
        })?;
    Ok(product)
}

// =============================================================================
// Inventory
// =============================================================================

/// Replaces the quantity and price of a product and records the edit.
///
/// Blank answers keep the current values.
pub async fn update_product<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;

    let store = choose_store(db, session, prompter).await?;
    let product = choose_product(db, &store, prompter).await?;

    prompter.say("Current values (leave blank to keep):")?;
    print_table(prompter, &products_table(std::slice::from_ref(&product)))?;

    let current = ProductChanges::unchanged(&product);
    let number_of_units = prompter.read_optional(
        "\tEnter new Number of units: ",
        current.number_of_units,
        parse_stock_level,
    )?;
    let price = prompter.read_optional("\tEnter new Price per unit: ", current.price, Money::parse)?;

    let update = db
        .products()
        .update_with_audit(
            session,
            &product,
            ProductChanges {
                number_of_units,
                price,
            },
        )
        .await?;

    prompter.say(format!(
        "Product '{}' updated: {} units at {} (update #{}).",
        update.product_name, number_of_units, price, update.update_number
    ))?;
    Ok(())
}

/// Restocks a product from a warehouse.
pub async fn place_supply_request<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;

    let supply = db.supply();
    prompter.say("Warehouses:")?;
    print_table(prompter, &warehouses_table(&supply.warehouses().await?))?;

    let warehouse_id =
        prompter.read_parsed("\tEnter Warehouse ID: ", |s| parse_id("warehouse ID", s))?;
    if supply.warehouse(warehouse_id).await?.is_none() {
        return Err(CoreError::WarehouseNotFound(warehouse_id).into());
    }

    let store = choose_store(db, session, prompter).await?;
    let product = choose_product(db, &store, prompter).await?;
    let units = prompter.read_parsed("\tEnter Number of units: ", parse_units)?;

    let request = supply
        .place_request(
            session,
            warehouse_id,
            store.store_id,
            &product.product_name,
            units,
        )
        .await?;

    prompter.say(format!(
        "Supply request {} placed: {} x {} from warehouse {} to store {}.",
        request.request_number,
        request.units_requested,
        request.product_name,
        request.warehouse_id,
        request.store_id
    ))?;
    Ok(())
}

// =============================================================================
// Analytics
// =============================================================================

pub async fn view_recent_updates<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;
    let store = choose_store(db, session, prompter).await?;

    let updates = db
        .products()
        .recent_updates(session, store.store_id, TOP_N)
        .await?;
    if print_table(prompter, &updates_table(&updates))? == 0 {
        prompter.say("No product updates for this store.")?;
    }
    Ok(())
}

pub async fn view_popular_products<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;
    let store = choose_store(db, session, prompter).await?;

    let products = db
        .orders()
        .popular_products(session, store.store_id, TOP_N)
        .await?;
    if print_table(prompter, &popular_products_table(&products))? == 0 {
        prompter.say("No orders for this store.")?;
    }
    Ok(())
}

pub async fn view_popular_customers<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;
    let store = choose_store(db, session, prompter).await?;

    let customers = db
        .orders()
        .popular_customers(session, store.store_id, TOP_N)
        .await?;
    if print_table(prompter, &popular_customers_table(&customers))? == 0 {
        prompter.say("No orders for this store.")?;
    }
    Ok(())
}

/// Every order of a store, newest first.
pub async fn view_store_orders<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    require_staff(session)?;
    let store = choose_store(db, session, prompter).await?;

    let orders = db.orders().for_store(session, store.store_id).await?;
    if print_table(prompter, &orders_table(&orders))? == 0 {
        prompter.say("No orders for this store.")?;
    }
    Ok(())
}
