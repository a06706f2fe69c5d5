//! The API endpoint URIs.

/// The route for reading (GET) and replacing (POST, admin only) the ledger.
pub const LEDGER: &str = "/ledger";
/// The route for logging in with a username and password.
pub const LOG_IN: &str = "/auth/login";
/// The route for the client to log out the current account.
pub const LOG_OUT: &str = "/auth/logout";
/// The route that reports the caller's identity.
pub const ME: &str = "/auth/me";
/// The route for a logged-in account to change its own password.
pub const CHANGE_PASSWORD: &str = "/auth/change-password";
