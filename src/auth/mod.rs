//! Handles authentication: password log-in, the signed token cookie, and the
//! extractor route handlers use to identify the caller.

mod change_password;
mod cookie;
mod log_in;
mod log_out;
mod me;
pub mod token;

pub use change_password::post_change_password;
pub use log_in::post_log_in;
pub use log_out::post_log_out;
pub use me::get_me;
pub use token::Claims;

pub(crate) use cookie::AUTH_COOKIE;

use axum::{
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::{
    Error,
    models::{Account, AccountId, Role},
    state::AuthState,
    auth::token::decode_token,
};

/// The identity established for a request, as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    /// The account's database ID.
    pub id: AccountId,
    /// The account's username.
    pub username: String,
    /// The account's role.
    pub role: Role,
}

impl From<&Account> for Identity {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id,
            username: account.username.clone(),
            role: account.role,
        }
    }
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Self {
            id: claims.sub,
            username: claims.username,
            role: claims.role,
        }
    }
}

impl<S> FromRequestParts<S> for Claims
where
    AuthState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Error;

    /// Extract and verify the caller's identity from the auth cookie.
    ///
    /// Rejects with [Error::Unauthenticated] when the cookie is absent and
    /// [Error::InvalidToken] when its token does not verify.
    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        let cookie = jar.get(AUTH_COOKIE).ok_or(Error::Unauthenticated)?;

        let auth_state = AuthState::from_ref(state);

        decode_token(cookie.value(), &auth_state.jwt_keys.decoding)
    }
}
