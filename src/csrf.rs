use crate::cookies::{CookieStore, read_cookie};
use secrecy::SecretString;

/// Cookie the auth service sets with the CSRF token.
pub const CSRF_COOKIE: &str = "authgate_csrf";
/// Header that mirrors the CSRF cookie on state-changing requests.
pub const CSRF_HEADER: &str = "X-CSRF-Token";

/// Reads the CSRF token from the current cookies. No caching: every call
/// reflects the store at call time.
#[must_use]
pub fn csrf_token(cookies: &dyn CookieStore) -> Option<SecretString> {
    read_cookie(&cookies.cookie_string(), CSRF_COOKIE).map(SecretString::from)
}
