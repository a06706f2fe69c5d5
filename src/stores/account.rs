//! Defines the account store trait.

use crate::{
    Error,
    models::{Account, AccountId, NewAccount, PasswordHash},
};

/// Handles the creation and retrieval of login accounts.
pub trait AccountStore {
    /// Create a new account in the store.
    ///
    /// # Errors
    ///
    /// Returns an [Error::DuplicateUsername] if the username is already taken.
    fn create(&mut self, new_account: NewAccount) -> Result<Account, Error>;

    /// Retrieve the account with the given `username`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no such account exists.
    fn get_by_username(&self, username: &str) -> Result<Account, Error>;

    /// Retrieve the account with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no such account exists.
    fn get_by_id(&self, id: AccountId) -> Result<Account, Error>;

    /// Replace the stored password hash for the account with the given `id`.
    ///
    /// # Errors
    ///
    /// Returns an [Error::NotFound] if no such account exists.
    fn update_password_hash(&mut self, id: AccountId, hash: PasswordHash) -> Result<(), Error>;
}
