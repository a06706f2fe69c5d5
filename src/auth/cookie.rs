//! Defines functions for carrying the auth token in an HTTP cookie.

use axum_extra::extract::{
    CookieJar,
    cookie::{Cookie, SameSite},
};
use time::{Duration, OffsetDateTime};

use crate::auth::token::TOKEN_DURATION;

/// The name of the cookie holding the signed auth token.
pub(crate) const AUTH_COOKIE: &str = "auth_token";

/// Add the auth cookie to the cookie jar, indicating that an account is
/// logged in.
///
/// The cookie lives as long as the token it carries.
pub(crate) fn set_auth_cookie(jar: CookieJar, token: String) -> CookieJar {
    jar.add(
        Cookie::build((AUTH_COOKIE, token))
            .path("/")
            .max_age(TOKEN_DURATION)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}

/// Set the auth cookie to an invalid value and set its max age to zero, which
/// should delete the cookie on the client side.
pub(crate) fn invalidate_auth_cookie(jar: CookieJar) -> CookieJar {
    jar.add(
        Cookie::build((AUTH_COOKIE, "deleted"))
            .path("/")
            .expires(OffsetDateTime::UNIX_EPOCH)
            .max_age(Duration::ZERO)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(true),
    )
}
