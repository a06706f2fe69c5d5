//! This file defines the route for a logged-in account changing its own
//! password.

use axum::{Json, extract::State};
use serde_json::{Value, json};

use crate::{
    Error,
    auth::Claims,
    models::{PasswordHash, ValidatedPassword},
    state::AppState,
    stores::{AccountStore, LedgerStore},
};

/// The payload submitted with a change-password request.
#[derive(Debug, Default, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordPayload {
    /// The account's current password, for re-verification.
    #[serde(default)]
    pub current_password: String,
    /// The password to store in its place.
    #[serde(default)]
    pub new_password: String,
}

/// Handler for change-password requests.
///
/// The caller proves knowledge of the current password before the stored hash
/// is replaced. Tokens issued before the change remain valid until expiry.
///
/// # Errors
///
/// - [Error::Validation] when a field is missing or the new password is
///   shorter than the minimum length.
/// - [Error::NotFound] when the account behind the token no longer exists.
/// - [Error::InvalidCredentials] when the current password does not match.
pub async fn post_change_password<L, A>(
    State(mut state): State<AppState<L, A>>,
    claims: Claims,
    Json(payload): Json<ChangePasswordPayload>,
) -> Result<Json<Value>, Error>
where
    L: LedgerStore + Clone + Send + Sync,
    A: AccountStore + Clone + Send + Sync,
{
    if payload.current_password.is_empty() || payload.new_password.is_empty() {
        return Err(Error::Validation(
            "current and new password must be provided".to_string(),
        ));
    }

    let validated_password = ValidatedPassword::new(&payload.new_password)?;

    let account = state.account_store.get_by_id(claims.sub)?;

    let current_is_correct = account
        .password_hash
        .verify(&payload.current_password)
        .map_err(|error| Error::HashingError(error.to_string()))?;

    if !current_is_correct {
        return Err(Error::InvalidCredentials);
    }

    let new_hash = PasswordHash::new(validated_password, PasswordHash::DEFAULT_COST)?;
    state
        .account_store
        .update_password_hash(account.id, new_hash)?;

    Ok(Json(json!({ "success": true })))
}
