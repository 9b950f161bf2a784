//! Read access to the cookies the auth service set for this client.
//!
//! The library never writes cookies. The HTTP runtime (the `reqwest` cookie jar)
//! stores whatever `Set-Cookie` headers the auth service sends, and this module
//! only exposes the resulting `name=value; name=value` string through the
//! [`CookieStore`] port.

use reqwest::cookie::{CookieStore as _, Jar};
use std::sync::Arc;
use url::Url;

/// Separator between entries of a cookie string.
const COOKIE_SEPARATOR: &str = "; ";

/// Read port for the ambient cookie string.
pub trait CookieStore: Send + Sync {
    /// Returns every cookie visible to the client as `name=value; name=value`.
    /// An empty string means no cookies.
    fn cookie_string(&self) -> String;
}

/// Cookie store backed by the jar shared with the HTTP client, so cookies
/// refreshed by the auth service are visible on the next read.
#[derive(Clone)]
pub struct JarCookies {
    jar: Arc<Jar>,
    origin: Url,
}

impl JarCookies {
    #[must_use]
    pub fn new(jar: Arc<Jar>, origin: Url) -> Self {
        Self { jar, origin }
    }
}

impl CookieStore for JarCookies {
    fn cookie_string(&self) -> String {
        self.jar
            .cookies(&self.origin)
            .and_then(|value| value.to_str().map(str::to_string).ok())
            .unwrap_or_default()
    }
}

impl std::fmt::Debug for JarCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JarCookies")
            .field("origin", &self.origin.as_str())
            .finish_non_exhaustive()
    }
}

/// Fixed cookie string, used when the host hands cookies over up front.
#[derive(Clone, Default)]
pub struct StaticCookies(String);

impl StaticCookies {
    #[must_use]
    pub fn new(cookies: impl Into<String>) -> Self {
        Self(cookies.into())
    }
}

impl CookieStore for StaticCookies {
    fn cookie_string(&self) -> String {
        self.0.clone()
    }
}

impl std::fmt::Debug for StaticCookies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Values may be session secrets.
        f.debug_tuple("StaticCookies").field(&"[redacted]").finish()
    }
}

/// Finds the first cookie named exactly `name` and returns its URL-decoded value.
///
/// Entries without `=` are skipped. A value that does not decode to UTF-8 is
/// returned as-is, so the only negative signal is `None`.
#[must_use]
pub fn read_cookie(cookies: &str, name: &str) -> Option<String> {
    cookies
        .split(COOKIE_SEPARATOR)
        .filter_map(|entry| entry.split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| decode_value(value))
}

fn decode_value(value: &str) -> String {
    urlencoding::decode(value).map_or_else(|_| value.to_string(), |decoded| decoded.into_owned())
}
