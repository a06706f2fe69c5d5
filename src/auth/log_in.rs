//! This file defines the route for handling log-in requests.

use axum::{Json, extract::State};
use axum_extra::extract::CookieJar;

use crate::{
    Error,
    auth::{Identity, cookie::set_auth_cookie, token::encode_token},
    state::AppState,
    stores::{AccountStore, LedgerStore},
};

/// The credentials submitted with a log-in request.
///
/// Both fields default to empty so that a missing field is reported as a
/// validation error rather than a deserialization failure.
#[derive(Debug, Default, serde::Deserialize)]
pub struct LogInPayload {
    /// The username entered during log-in.
    #[serde(default)]
    pub username: String,
    /// The password entered during log-in.
    #[serde(default)]
    pub password: String,
}

/// Handler for log-in requests via the POST method.
///
/// On success the auth cookie is set and the caller's identity returned.
///
/// # Errors
///
/// - [Error::Validation] when the username or password is missing or empty.
/// - [Error::InvalidCredentials] for an unknown username or a wrong password.
///   Both cases produce the identical response so the endpoint cannot be used
///   to probe for registered usernames.
pub async fn post_log_in<L, A>(
    State(state): State<AppState<L, A>>,
    jar: CookieJar,
    Json(payload): Json<LogInPayload>,
) -> Result<(CookieJar, Json<Identity>), Error>
where
    L: LedgerStore + Clone + Send + Sync,
    A: AccountStore + Clone + Send + Sync,
{
    if payload.username.is_empty() || payload.password.is_empty() {
        return Err(Error::Validation(
            "username and password must be provided".to_string(),
        ));
    }

    let account = match state.account_store.get_by_username(&payload.username) {
        Ok(account) => account,
        Err(Error::NotFound) => return Err(Error::InvalidCredentials),
        Err(error) => return Err(error),
    };

    let password_is_correct = account
        .password_hash
        .verify(&payload.password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !password_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let token = encode_token(&account, &state.jwt_keys.encoding)?;

    Ok((set_auth_cookie(jar, token), Json(Identity::from(&account))))
}
