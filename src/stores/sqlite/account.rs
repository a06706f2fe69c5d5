//! Implements a SQLite backed account store.

use std::sync::{Arc, Mutex};

use rusqlite::{Connection, Row, params};

use crate::{
    Error,
    models::{Account, AccountId, NewAccount, PasswordHash},
    stores::AccountStore,
};

/// Stores login accounts in a SQLite database.
#[derive(Debug, Clone)]
pub struct SQLiteAccountStore {
    connection: Arc<Mutex<Connection>>,
}

impl SQLiteAccountStore {
    /// Create a new store for the SQLite `connection`.
    pub fn new(connection: Arc<Mutex<Connection>>) -> Self {
        Self { connection }
    }

    fn map_row(row: &Row) -> rusqlite::Result<Account> {
        let password_hash: String = row.get(2)?;

        Ok(Account {
            id: AccountId::new(row.get(0)?),
            username: row.get(1)?,
            password_hash: PasswordHash::new_unchecked(&password_hash),
            role: row.get(3)?,
        })
    }
}

impl AccountStore for SQLiteAccountStore {
    /// Create a new account in the database.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::DuplicateUsername] if the username is already taken,
    /// - [Error::SqlError] if there is some other SQL error.
    fn create(&mut self, new_account: NewAccount) -> Result<Account, Error> {
        let connection = self.connection.lock().unwrap();

        connection
            .prepare(
                "INSERT INTO account (username, password_hash, role)
                 VALUES (?1, ?2, ?3)
                 RETURNING id, username, password_hash, role",
            )?
            .query_row(
                params![
                    new_account.username,
                    new_account.password_hash.to_string(),
                    new_account.role
                ],
                Self::map_row,
            )
            .map_err(|error| match error {
                // Code 2067 occurs when a UNIQUE constraint failed.
                rusqlite::Error::SqliteFailure(sql_error, Some(_))
                    if sql_error.extended_code == 2067 =>
                {
                    Error::DuplicateUsername(new_account.username.clone())
                }
                error => error.into(),
            })
    }

    /// Retrieve the account with the given `username`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no such account exists.
    fn get_by_username(&self, username: &str) -> Result<Account, Error> {
        let connection = self.connection.lock().unwrap();

        let account = connection.query_row(
            "SELECT id, username, password_hash, role FROM account WHERE username = ?1",
            [username],
            Self::map_row,
        )?;

        Ok(account)
    }

    /// Retrieve the account with the given `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no such account exists.
    fn get_by_id(&self, id: AccountId) -> Result<Account, Error> {
        let connection = self.connection.lock().unwrap();

        let account = connection.query_row(
            "SELECT id, username, password_hash, role FROM account WHERE id = ?1",
            [id.as_i64()],
            Self::map_row,
        )?;

        Ok(account)
    }

    /// Replace the stored password hash for the account with the given `id`.
    ///
    /// # Errors
    /// Returns an [Error::NotFound] if no such account exists.
    fn update_password_hash(&mut self, id: AccountId, hash: PasswordHash) -> Result<(), Error> {
        let connection = self.connection.lock().unwrap();

        let rows_changed = connection.execute(
            "UPDATE account SET password_hash = ?1 WHERE id = ?2",
            params![hash.to_string(), id.as_i64()],
        )?;

        if rows_changed == 0 {
            return Err(Error::NotFound);
        }

        Ok(())
    }
}

#[cfg(test)]
mod sqlite_account_store_tests {
    use std::sync::{Arc, Mutex};

    use rusqlite::Connection;

    use crate::{
        Error,
        db::initialize,
        models::{AccountId, NewAccount, PasswordHash, Role},
        stores::{AccountStore, SQLiteAccountStore},
    };

    fn new_store() -> SQLiteAccountStore {
        let connection = Connection::open_in_memory().unwrap();
        initialize(&connection).unwrap();

        SQLiteAccountStore::new(Arc::new(Mutex::new(connection)))
    }

    fn new_account(username: &str, role: Role) -> NewAccount {
        NewAccount {
            username: username.to_string(),
            password_hash: PasswordHash::from_raw_password("kok123", 4).unwrap(),
            role,
        }
    }

    #[test]
    fn create_then_get_by_username() {
        let mut store = new_store();

        let created = store.create(new_account("bendahara", Role::Admin)).unwrap();
        let fetched = store.get_by_username("bendahara").unwrap();

        assert_eq!(created, fetched);
        assert_eq!(fetched.role, Role::Admin);
    }

    #[test]
    fn create_then_get_by_id() {
        let mut store = new_store();

        let created = store.create(new_account("anggota", Role::User)).unwrap();
        let fetched = store.get_by_id(created.id).unwrap();

        assert_eq!(created, fetched);
    }

    #[test]
    fn create_fails_on_duplicate_username() {
        let mut store = new_store();
        store.create(new_account("bendahara", Role::Admin)).unwrap();

        let result = store.create(new_account("bendahara", Role::User));

        assert_eq!(
            result,
            Err(Error::DuplicateUsername("bendahara".to_string()))
        );
    }

    #[test]
    fn get_missing_account_returns_not_found() {
        let store = new_store();

        assert_eq!(store.get_by_username("nobody"), Err(Error::NotFound));
        assert_eq!(store.get_by_id(AccountId::new(42)), Err(Error::NotFound));
    }

    #[test]
    fn update_password_hash_replaces_the_hash() {
        let mut store = new_store();
        let account = store.create(new_account("bendahara", Role::Admin)).unwrap();

        let new_hash = PasswordHash::from_raw_password("rahasia-baru", 4).unwrap();
        store
            .update_password_hash(account.id, new_hash.clone())
            .unwrap();

        let fetched = store.get_by_id(account.id).unwrap();
        assert_eq!(fetched.password_hash, new_hash);
        assert!(fetched.password_hash.verify("rahasia-baru").unwrap());
    }

    #[test]
    fn update_password_hash_fails_for_missing_account() {
        let mut store = new_store();
        let hash = PasswordHash::from_raw_password("kok123", 4).unwrap();

        let result = store.update_password_hash(AccountId::new(42), hash);

        assert_eq!(result, Err(Error::NotFound));
    }
}
