//! The data model for the club's cash book: the singleton ledger report, its
//! transactions, and the accounts that may edit it.

mod account;
mod ledger;
mod password;
mod transaction;

pub use account::{Account, AccountId, NewAccount, Role};
pub use ledger::{LEDGER_ID, LedgerDraft, LedgerReport, LedgerSummary};
pub use password::{PasswordHash, ValidatedPassword};
pub use transaction::{LedgerTransaction, NewTransaction};

/// An alias for the integer type used for database row IDs.
pub type DatabaseID = i64;
