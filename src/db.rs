//! Creates the application's database schema.

use rusqlite::{Connection, Transaction as SqlTransaction, TransactionBehavior};

use crate::Error;

/// Create the application's tables if they do not exist yet.
///
/// The whole schema is created inside one exclusive transaction so that two
/// processes racing at first start cannot observe a half-built database.
///
/// Money columns are stored as TEXT holding the canonical decimal rendering,
/// and parsed back into `rust_decimal::Decimal` on read.
///
/// # Errors
///
/// Returns an [Error::SqlError] if there is an unexpected SQL error.
pub fn initialize(connection: &Connection) -> Result<(), Error> {
    connection.pragma_update(None, "foreign_keys", true)?;

    let transaction =
        SqlTransaction::new_unchecked(connection, TransactionBehavior::Exclusive)?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS account (
            id INTEGER PRIMARY KEY,
            username TEXT UNIQUE NOT NULL,
            password_hash TEXT NOT NULL,
            role TEXT NOT NULL DEFAULT 'user'
        )",
        (),
    )?;

    transaction.execute(
        "CREATE TABLE IF NOT EXISTS ledger (
            id INTEGER PRIMARY KEY,
            notes TEXT NOT NULL,
            opening_balance TEXT NOT NULL,
            total_in TEXT NOT NULL,
            total_out TEXT NOT NULL,
            total_balance TEXT NOT NULL
        )",
        (),
    )?;

    // AUTOINCREMENT stops SQLite from reusing rowids, so replaced transaction
    // sets always get fresh, strictly increasing IDs.
    for table in ["inbound_transaction", "outbound_transaction"] {
        transaction.execute(
            &format!(
                "CREATE TABLE IF NOT EXISTS {table} (
                    id INTEGER PRIMARY KEY AUTOINCREMENT,
                    description TEXT NOT NULL,
                    amount TEXT NOT NULL,
                    occurred_at TEXT NOT NULL,
                    ledger_id INTEGER NOT NULL
                        REFERENCES ledger(id) ON DELETE CASCADE
                )"
            ),
            (),
        )?;
    }

    transaction.commit()?;

    Ok(())
}
