//! Defines the store traits the route handlers depend on and their SQLite
//! implementations.

mod account;
mod ledger;
pub mod sqlite;

pub use account::AccountStore;
pub use ledger::LedgerStore;
pub use sqlite::{SQLAppState, SQLiteAccountStore, SQLiteLedgerStore, create_app_state};
