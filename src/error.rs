//! Defines the app level error type and its mapping onto JSON HTTP responses.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A request field was missing or malformed.
    #[error("{0}")]
    Validation(String),

    /// The submitted username/password pair did not match a stored account.
    ///
    /// Unknown usernames and wrong passwords both collapse into this variant
    /// so that the response cannot be used to enumerate usernames.
    #[error("invalid username or password")]
    InvalidCredentials,

    /// The request carried no auth cookie.
    #[error("authentication required")]
    Unauthenticated,

    /// The auth cookie held a token that is malformed, tampered with, or
    /// expired.
    #[error("invalid or expired token")]
    InvalidToken,

    /// The caller is authenticated but does not have the admin role.
    #[error("admin access required")]
    Forbidden,

    /// The requested resource was not found.
    ///
    /// Internally, this error may occur when a query returns no rows.
    #[error("the requested resource could not be found")]
    NotFound,

    /// The username chosen for a new account already exists in the database.
    #[error("the username \"{0}\" is already taken")]
    DuplicateUsername(String),

    /// An unexpected error occurred with the underlying hashing library.
    ///
    /// The error string should only be logged for debugging on the server,
    /// never sent to the client.
    #[error("hashing failed: {0}")]
    HashingError(String),

    /// Signing a new auth token failed.
    #[error("could not create auth token: {0}")]
    TokenCreation(String),

    /// A value could not be serialized as JSON for storage.
    #[error("could not serialize as JSON: {0}")]
    Serialization(String),

    /// An unhandled/unexpected SQL error.
    #[error("an unexpected SQL error occurred: {0}")]
    SqlError(rusqlite::Error),
}

impl From<rusqlite::Error> for Error {
    fn from(value: rusqlite::Error) -> Self {
        match value {
            rusqlite::Error::QueryReturnedNoRows => Error::NotFound,
            error => {
                tracing::error!("an unhandled SQL error occurred: {}", error);
                Error::SqlError(error)
            }
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status_code, message) = match self {
            Error::Validation(message) => (StatusCode::BAD_REQUEST, message),
            error @ Error::DuplicateUsername(_) => (StatusCode::BAD_REQUEST, error.to_string()),
            error @ (Error::InvalidCredentials | Error::Unauthenticated | Error::InvalidToken) => {
                (StatusCode::UNAUTHORIZED, error.to_string())
            }
            error @ Error::Forbidden => (StatusCode::FORBIDDEN, error.to_string()),
            error @ Error::NotFound => (StatusCode::NOT_FOUND, error.to_string()),
            // Internal errors are logged in full but only a generic message is
            // sent to the client.
            error => {
                tracing::error!("an unexpected error occurred: {}", error);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({ "error": message }));

        (status_code, body).into_response()
    }
}
