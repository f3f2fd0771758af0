//! # Menus
//!
//! The main menu and the role menu loop.
//!
//! ## Menu Layout
//! ```text
//! MAIN MENU                    MAIN MENU (logged in)
//! ---------                    ---------
//! 1. Create user               1-4    every role
//! 2. Log in                    5-10   ***MANAGER OPTIONS*** (manager, admin)
//! 9. < EXIT                    11-18  ***ADMIN OPTIONS***   (admin)
//!                              20     Log out
//! ```
//!
//! A failed command prints its message and the menu is shown again. Only an
//! input error (end of input) leaves the loops.

use std::io::{BufRead, Write};

use retail_core::{Role, Session};
use retail_db::Database;
use tracing::{debug, info};

use crate::commands;
use crate::error::{AppError, AppResult};
use crate::prompt::Prompter;

/// Printed before the first menu.
pub const GREETING: &str = "\n\n*******************************************************\n              User Interface      \t               \n*******************************************************\n";

/// Printed for numbers that are not on the current menu.
pub const UNRECOGNIZED_CHOICE: &str = "Unrecognized choice!";

const LOG_OUT_CHOICE: u32 = 20;

// =============================================================================
// Actions
// =============================================================================

/// An entry of the role menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ViewStores,
    ViewProducts,
    PlaceOrder,
    ViewRecentOrders,
    UpdateProduct,
    ViewRecentUpdates,
    ViewPopularProducts,
    ViewPopularCustomers,
    PlaceSupplyRequest,
    ViewStoreOrders,
    AdminViewUsers,
    AdminViewProducts,
    AdminUpdateUser,
    AdminUpdateProduct,
    AdminViewStores,
    AdminViewWarehouses,
    AdminViewSupplyRequests,
    AdminViewOrders,
}

/// (choice, action, label) in display order.
const ROLE_MENU: &[(u32, Action, &str)] = &[
    (1, Action::ViewStores, "View Stores within 30 units"),
    (2, Action::ViewProducts, "View Product List"),
    (3, Action::PlaceOrder, "Place a Order"),
    (4, Action::ViewRecentOrders, "View 5 recent orders"),
    (5, Action::UpdateProduct, "Update Product"),
    (6, Action::ViewRecentUpdates, "View 5 recent Product Updates Info"),
    (7, Action::ViewPopularProducts, "View 5 Popular Items"),
    (8, Action::ViewPopularCustomers, "View 5 Popular Customers"),
    (9, Action::PlaceSupplyRequest, "Place Product Supply Request to Warehouse"),
    (10, Action::ViewStoreOrders, "View Orders of a Store"),
    (11, Action::AdminViewUsers, "View all Users"),
    (12, Action::AdminViewProducts, "View all Products"),
    (13, Action::AdminUpdateUser, "Update User"),
    (14, Action::AdminUpdateProduct, "Update any Product"),
    (15, Action::AdminViewStores, "View all Stores"),
    (16, Action::AdminViewWarehouses, "View all Warehouses"),
    (17, Action::AdminViewSupplyRequests, "View all Supply Requests"),
    (18, Action::AdminViewOrders, "View all Orders"),
];

impl Action {
    /// Lowest role that sees this entry.
    pub fn required_role(&self) -> Role {
        match self {
            Action::ViewStores
            | Action::ViewProducts
            | Action::PlaceOrder
            | Action::ViewRecentOrders => Role::Customer,
            Action::UpdateProduct
            | Action::ViewRecentUpdates
            | Action::ViewPopularProducts
            | Action::ViewPopularCustomers
            | Action::PlaceSupplyRequest
            | Action::ViewStoreOrders => Role::Manager,
            Action::AdminViewUsers
            | Action::AdminViewProducts
            | Action::AdminUpdateUser
            | Action::AdminUpdateProduct
            | Action::AdminViewStores
            | Action::AdminViewWarehouses
            | Action::AdminViewSupplyRequests
            | Action::AdminViewOrders => Role::Admin,
        }
    }

    pub fn visible_to(&self, role: Role) -> bool {
        match self.required_role() {
            Role::Customer => true,
            Role::Manager => matches!(role, Role::Manager | Role::Admin),
            Role::Admin => role == Role::Admin,
        }
    }

    /// Resolves a menu number for a role; `None` if it is not on that menu.
    pub fn from_choice(role: Role, choice: u32) -> Option<Action> {
        ROLE_MENU
            .iter()
            .find(|(number, action, _)| *number == choice && action.visible_to(role))
            .map(|(_, action, _)| *action)
    }
}

// =============================================================================
// Menu Text
// =============================================================================

fn print_main_menu<R: BufRead, W: Write>(prompter: &mut Prompter<R, W>) -> AppResult<()> {
    prompter.say("MAIN MENU")?;
    prompter.say("---------")?;
    prompter.say("1. Create user")?;
    prompter.say("2. Log in")?;
    prompter.say("9. < EXIT")
}

fn print_role_menu<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    role: Role,
) -> AppResult<()> {
    prompter.say("\n\nMAIN MENU")?;
    prompter.say("---------")?;

    let mut section = Role::Customer;
    for (number, action, label) in ROLE_MENU {
        if !action.visible_to(role) {
            continue;
        }
        let required = action.required_role();
        if required != section {
            section = required;
            match required {
                Role::Manager => prompter.say("\n***MANAGER OPTIONS***")?,
                Role::Admin => prompter.say("\n***ADMIN OPTIONS***")?,
                Role::Customer => {}
            }
        }
        prompter.say(format!("{}. {}", number, label))?;
    }

    prompter.say(".........................")?;
    prompter.say(format!("{}. Log out", LOG_OUT_CHOICE))
}

// =============================================================================
// Loops
// =============================================================================

/// Runs the console until the user exits or the input ends.
pub async fn run<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    match main_menu(db, prompter).await {
        Err(e) if e.ends_session() => {
            debug!(reason = %e, "Input ended");
            Ok(())
        }
        other => other,
    }
}

async fn main_menu<R: BufRead, W: Write>(
    db: &Database,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    loop {
        print_main_menu(prompter)?;

        match prompter.read_choice()? {
            1 => {
                let created = commands::create_user(db, prompter).await.map(|_| ());
                report(prompter, created)?;
            }
            2 => match commands::log_in(db, prompter).await {
                Ok(Some(session)) => role_menu(db, &session, prompter).await?,
                Ok(None) => {}
                Err(e) => report(prompter, Err(e))?,
            },
            9 => return Ok(()),
            _ => prompter.say(UNRECOGNIZED_CHOICE)?,
        }
    }
}

async fn role_menu<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
) -> AppResult<()> {
    info!(user_id = session.user_id, role = %session.role, "Session started");

    loop {
        print_role_menu(prompter, session.role)?;

        let choice = prompter.read_choice()?;
        if choice == LOG_OUT_CHOICE {
            info!(user_id = session.user_id, "Session ended");
            return Ok(());
        }

        match Action::from_choice(session.role, choice) {
            Some(action) => {
                let result = perform(db, session, prompter, action).await;
                report(prompter, result)?;
            }
            None => prompter.say(UNRECOGNIZED_CHOICE)?,
        }
    }
}

async fn perform<R: BufRead, W: Write>(
    db: &Database,
    session: &Session,
    prompter: &mut Prompter<R, W>,
    action: Action,
) -> AppResult<()> {
    debug!(user_id = session.user_id, ?action, "Menu action");

    match action {
        Action::ViewStores => commands::view_stores(db, session, prompter).await,
        Action::ViewProducts => commands::view_products(db, prompter).await,
        Action::PlaceOrder => commands::place_order(db, session, prompter).await,
        Action::ViewRecentOrders => commands::view_recent_orders(db, session, prompter).await,
        Action::UpdateProduct => commands::update_product(db, session, prompter).await,
        Action::ViewRecentUpdates => commands::view_recent_updates(db, session, prompter).await,
        Action::ViewPopularProducts => {
            commands::view_popular_products(db, session, prompter).await
        }
        Action::ViewPopularCustomers => {
            commands::view_popular_customers(db, session, prompter).await
        }
        Action::PlaceSupplyRequest => commands::place_supply_request(db, session, prompter).await,
        Action::ViewStoreOrders => commands::view_store_orders(db, session, prompter).await,
        Action::AdminViewUsers => commands::admin_view_users(db, session, prompter).await,
        Action::AdminViewProducts => commands::admin_view_products(db, session, prompter).await,
        Action::AdminUpdateUser => commands::admin_update_user(db, session, prompter).await,
        Action::AdminUpdateProduct => commands::admin_update_product(db, session, prompter).await,
        Action::AdminViewStores => commands::admin_view_stores(db, session, prompter).await,
        Action::AdminViewWarehouses => {
            commands::admin_view_warehouses(db, session, prompter).await
        }
        Action::AdminViewSupplyRequests => {
            commands::admin_view_supply_requests(db, session, prompter).await
        }
        Action::AdminViewOrders => commands::admin_view_orders(db, session, prompter).await,
    }
}

/// Prints a command failure. Input errors are passed on.
fn report<R: BufRead, W: Write>(
    prompter: &mut Prompter<R, W>,
    result: AppResult<()>,
) -> AppResult<()> {
    match result {
        Ok(()) => Ok(()),
        Err(e) if e.ends_session() => Err(e),
        Err(AppError { message, .. }) => prompter.say(message),
    }
}
