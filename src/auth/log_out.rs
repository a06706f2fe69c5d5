//! This file defines the route for handling log-out requests.

use axum::http::StatusCode;
use axum_extra::extract::CookieJar;

use crate::auth::cookie::invalidate_auth_cookie;

/// Handler for log-out requests.
///
/// Clears the auth cookie and succeeds unconditionally, including for callers
/// that were never logged in. The token itself stays valid until expiry; only
/// the client's copy is discarded.
pub async fn post_log_out(jar: CookieJar) -> (CookieJar, StatusCode) {
    (invalidate_auth_cookie(jar), StatusCode::OK)
}

#[cfg(test)]
mod log_out_tests {
    use axum_test::TestServer;
    use rusqlite::Connection;

    use crate::{auth::AUTH_COOKIE, build_router, endpoints, stores::create_app_state};

    #[tokio::test]
    async fn log_out_succeeds_without_being_logged_in() {
        let state = create_app_state(Connection::open_in_memory().unwrap(), "42").unwrap();
        let server = TestServer::new(build_router(state)).unwrap();

        let response = server.post(endpoints::LOG_OUT).await;

        response.assert_status_ok();

        let cookie = response.cookie(AUTH_COOKIE);
        assert_eq!(cookie.value(), "deleted");
    }
}
