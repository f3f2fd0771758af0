//! # Report Rendering
//!
//! Builds [`Table`]s from domain rows and prints them through the
//! [`Prompter`]. Column headers use the schema's column names.

use std::io::{BufRead, Write};

use chrono::{DateTime, Utc};
use retail_core::report::format_distance;
use retail_core::{
    NearbyStore, Order, PopularCustomer, PopularProduct, Product, ProductUpdate, Store, Table,
    User, Warehouse,
};
use retail_db::{QueryExecutor, SqlValue};

use crate::error::AppResult;
use crate::prompt::Prompter;

/// Formats a stored timestamp for display.
pub fn format_time(time: &DateTime<Utc>) -> String {
    time.format("%Y-%m-%d %H:%M:%S").to_string()
}

// =============================================================================
// Table Builders
// =============================================================================

pub fn nearby_stores_table(stores: &[NearbyStore]) -> Table {
    let mut table = Table::new(["storeID", "name", "distance"]);
    for nearby in stores {
        table.push_row([
            nearby.store.store_id.to_string(),
            nearby.store.name.clone(),
            format_distance(nearby.distance),
        ]);
    }
    table
}

pub fn stores_table(stores: &[Store]) -> Table {
    let mut table = Table::new([
        "storeID",
        "name",
        "managerID",
        "latitude",
        "longitude",
        "dateEstablished",
    ]);
    for store in stores {
        table.push_row([
            store.store_id.to_string(),
            store.name.clone(),
            store.manager_id.to_string(),
            store.latitude.to_string(),
            store.longitude.to_string(),
            store.date_established.to_string(),
        ]);
    }
    table
}

/// Products of one store. Prices are shown in dollars and cents.
pub fn products_table(products: &[Product]) -> Table {
    let mut table = Table::new(["productName", "numberOfUnits", "pricePerUnit"]);
    for product in products {
        table.push_row([
            product.product_name.clone(),
            product.number_of_units.to_string(),
            product.price().to_string(),
        ]);
    }
    table
}

pub fn orders_table(orders: &[Order]) -> Table {
    let mut table = Table::new([
        "orderNumber",
        "customerID",
        "storeID",
        "productName",
        "unitsOrdered",
        "orderTime",
    ]);
    for order in orders {
        table.push_row([
            order.order_number.to_string(),
            order.customer_id.to_string(),
            order.store_id.to_string(),
            order.product_name.clone(),
            order.units_ordered.to_string(),
            format_time(&order.order_time),
        ]);
    }
    table
}

pub fn updates_table(updates: &[ProductUpdate]) -> Table {
    let mut table = Table::new([
        "updateNumber",
        "managerID",
        "storeID",
        "productName",
        "updatedOn",
    ]);
    for update in updates {
        table.push_row([
            update.update_number.to_string(),
            update.manager_id.to_string(),
            update.store_id.to_string(),
            update.product_name.clone(),
            format_time(&update.updated_on),
        ]);
    }
    table
}

pub fn popular_products_table(products: &[PopularProduct]) -> Table {
    let mut table = Table::new(["productName", "orderCount"]);
    for product in products {
        table.push_row([product.product_name.clone(), product.order_count.to_string()]);
    }
    table
}

pub fn popular_customers_table(customers: &[PopularCustomer]) -> Table {
    let mut table = Table::new(["customerID", "name", "orderCount"]);
    for customer in customers {
        table.push_row([
            customer.customer_id.to_string(),
            customer.name.clone(),
            customer.order_count.to_string(),
        ]);
    }
    table
}

pub fn warehouses_table(warehouses: &[Warehouse]) -> Table {
    let mut table = Table::new(["warehouseID", "area", "latitude", "longitude"]);
    for warehouse in warehouses {
        table.push_row([
            warehouse.warehouse_id.to_string(),
            warehouse.area.clone(),
            warehouse.latitude.to_string(),
            warehouse.longitude.to_string(),
        ]);
    }
    table
}

/// Users without their passwords.
pub fn users_table(users: &[User]) -> Table {
    let mut table = Table::new(["userID", "name", "latitude", "longitude", "type"]);
    for user in users {
        table.push_row([
            user.user_id.to_string(),
            user.name.clone(),
            user.latitude.to_string(),
            user.longitude.to_string(),
            user.role.to_string(),
        ]);
    }
    table
}

// =============================================================================
// Printing
// =============================================================================

/// Prints a table; an empty table prints nothing. Returns the row count.
pub fn print_table<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    table: &Table,
) -> AppResult<usize> {
    prompter.write_raw(&table.render())?;
    Ok(table.row_count())
}

/// Runs a query and prints its result set with a header row.
pub async fn print_query<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    executor: &QueryExecutor,
    sql: &str,
    params: &[SqlValue],
) -> AppResult<usize> {
    let table = executor.execute_query_table(sql, params).await?;
    print_table(prompter, &table)
}
