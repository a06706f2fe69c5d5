//! Implements a struct that holds the state of the REST server.

use axum::extract::FromRef;
use jsonwebtoken::{DecodingKey, EncodingKey};

use crate::stores::{AccountStore, LedgerStore};

/// The keys used for signing and verifying auth tokens, derived from one
/// secret.
#[derive(Clone)]
pub struct JwtKeys {
    /// The key used to sign newly issued tokens.
    pub encoding: EncodingKey,
    /// The key used to verify tokens on incoming requests.
    pub decoding: DecodingKey,
}

impl JwtKeys {
    /// Derive both keys from a `secret` string.
    pub fn from_secret(secret: &str) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_ref()),
            decoding: DecodingKey::from_secret(secret.as_ref()),
        }
    }
}

/// The state of the REST server.
#[derive(Clone)]
pub struct AppState<L, A>
where
    L: LedgerStore + Send + Sync,
    A: AccountStore + Send + Sync,
{
    /// The keys for signing and verifying auth tokens.
    pub jwt_keys: JwtKeys,
    /// The store for the club's single ledger report.
    pub ledger_store: L,
    /// The store for login accounts.
    pub account_store: A,
}

impl<L, A> AppState<L, A>
where
    L: LedgerStore + Send + Sync,
    A: AccountStore + Send + Sync,
{
    /// Create a new [AppState].
    pub fn new(jwt_secret: &str, ledger_store: L, account_store: A) -> Self {
        Self {
            jwt_keys: JwtKeys::from_secret(jwt_secret),
            ledger_store,
            account_store,
        }
    }
}

/// The state needed to verify auth tokens, available to extractors without
/// dragging the store type parameters along.
#[derive(Clone)]
pub struct AuthState {
    /// The keys for signing and verifying auth tokens.
    pub jwt_keys: JwtKeys,
}

impl<L, A> FromRef<AppState<L, A>> for AuthState
where
    L: LedgerStore + Clone + Send + Sync,
    A: AccountStore + Clone + Send + Sync,
{
    fn from_ref(state: &AppState<L, A>) -> Self {
        Self {
            jwt_keys: state.jwt_keys.clone(),
        }
    }
}
