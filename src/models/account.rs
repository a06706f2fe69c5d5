//! This file defines an account that can log in to the application and its
//! supporting types.

use std::{fmt::Display, str::FromStr};

use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSql, ToSqlOutput, ValueRef};
use serde::{Deserialize, Serialize};

use crate::models::PasswordHash;

/// A newtype wrapper for integer account IDs.
///
/// This helps disambiguate account IDs from other types of IDs, leading to
/// better compile time errors.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountId(i64);

impl AccountId {
    /// Wrap an integer row ID.
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// The underlying integer value.
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl Display for AccountId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// The permission level of an account.
///
/// Only admins may replace the ledger; every account may read it and change
/// its own password.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// May replace the ledger.
    Admin,
    /// Read-only beyond self-service password changes.
    User,
}

impl Role {
    /// The role name as stored in the database.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(string: &str) -> Result<Self, Self::Err> {
        match string {
            "admin" => Ok(Role::Admin),
            "user" => Ok(Role::User),
            other => Err(format!("unknown role \"{other}\"")),
        }
    }
}

impl FromSql for Role {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        value
            .as_str()
            .and_then(|string| Role::from_str(string).map_err(|e| FromSqlError::Other(e.into())))
    }
}

impl ToSql for Role {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(self.as_str().into())
    }
}

/// An account registered with the application.
///
/// Accounts are created out-of-band with the `create_account` binary and
/// retrieved via an [AccountStore](crate::stores::AccountStore).
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// The account's ID in the database.
    pub id: AccountId,
    /// The unique name the account logs in with.
    pub username: String,
    /// The salted bcrypt hash of the account's password.
    pub password_hash: PasswordHash,
    /// The account's permission level.
    pub role: Role,
}

/// The data for an account that has not been persisted yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewAccount {
    /// The unique name the account will log in with.
    pub username: String,
    /// The salted bcrypt hash of the account's password.
    pub password_hash: PasswordHash,
    /// The account's permission level.
    pub role: Role,
}
