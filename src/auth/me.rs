//! This file defines the route that reports who the caller is.

use axum::Json;

use crate::auth::{Claims, Identity};

/// Handler for requests asking "who am I?".
///
/// The identity comes straight from the verified token; the database is not
/// consulted, so the answer reflects the account as it was when the token was
/// issued.
pub async fn get_me(claims: Claims) -> Json<Identity> {
    Json(Identity::from(claims))
}
