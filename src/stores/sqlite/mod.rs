//! Contains convenience type alias and function for [AppState] that uses
//! the SQLite backend.

pub mod account;
pub mod ledger;

pub use account::SQLiteAccountStore;
pub use ledger::SQLiteLedgerStore;

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::{AppState, Error, db::initialize};

/// An alias for an [AppState] that uses SQLite for the backend.
pub type SQLAppState = AppState<SQLiteLedgerStore, SQLiteAccountStore>;

/// Creates an [AppState] instance that uses SQLite for the backend.
///
/// This function will modify the database by adding the application's tables
/// if they do not exist yet.
pub fn create_app_state(db_connection: Connection, jwt_secret: &str) -> Result<SQLAppState, Error> {
    initialize(&db_connection)?;

    let connection = Arc::new(Mutex::new(db_connection));
    let ledger_store = SQLiteLedgerStore::new(connection.clone());
    let account_store = SQLiteAccountStore::new(connection);

    Ok(AppState::new(jwt_secret, ledger_store, account_store))
}
