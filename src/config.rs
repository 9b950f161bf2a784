//! Client configuration and per-call options.
//!
//! Endpoint paths are fixed by the auth service contract; only the base URL is
//! configurable. Option structs carry documented defaults so callers never
//! rely on omitted arguments.

use crate::errors::AuthError;
use std::fmt;
use url::Url;

pub const LOGOUT_PATH: &str = "/auth/logout";
pub const REFRESH_PATH: &str = "/auth/refresh";
pub const USER_PATH: &str = "/auth/user";

/// Audience used when the caller does not name one.
pub const DEFAULT_AUDIENCE: &str = "app";

#[derive(Clone, Debug)]
pub struct AuthGateConfig {
    pub base_url: Url,
}

impl AuthGateConfig {
    /// # Errors
    /// Returns an error if `base_url` is not an absolute http(s) URL.
    pub fn new(base_url: &str) -> Result<Self, AuthError> {
        let base_url = Url::parse(base_url.trim())?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(AuthError::UnsupportedScheme(base_url.scheme().to_string()));
        }
        Ok(Self { base_url })
    }

    /// Resolves a request target against the base URL. Absolute http(s)
    /// targets are used as given.
    ///
    /// # Errors
    /// Returns an error if the joined URL does not parse.
    pub fn endpoint(&self, target: &str) -> Result<Url, AuthError> {
        if let Ok(url) = Url::parse(target) {
            if matches!(url.scheme(), "http" | "https") {
                return Ok(url);
            }
        }
        Ok(Url::parse(&build_url(self.base_url.as_str(), target))?)
    }

    /// URL of the refresh endpoint for `audience`, percent-encoded as a URI component.
    ///
    /// # Errors
    /// Returns an error if the joined URL does not parse.
    pub fn refresh_endpoint(&self, audience: &Audience) -> Result<Url, AuthError> {
        self.endpoint(&format!(
            "{REFRESH_PATH}?audience={}",
            urlencoding::encode(audience.as_str())
        ))
    }
}

/// Joins a base URL and a path without doubling or dropping slashes.
fn build_url(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Token scope requested from the refresh endpoint. Validated only by the
/// auth service.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Audience(String);

impl Audience {
    #[must_use]
    pub fn new(audience: impl Into<String>) -> Self {
        Self(audience.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for Audience {
    fn default() -> Self {
        Self(DEFAULT_AUDIENCE.to_string())
    }
}

impl From<&str> for Audience {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Audience {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl fmt::Display for Audience {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Options for logout. By default no navigation happens.
#[derive(Clone, Debug, Default)]
pub struct LogoutOptions {
    /// Navigated to after a successful logout.
    pub redirect_to: Option<String>,
}

impl LogoutOptions {
    #[must_use]
    pub fn redirect_to(target: impl Into<String>) -> Self {
        Self {
            redirect_to: Some(target.into()),
        }
    }
}

/// Options for authenticated requests. The audience defaults to `app`.
#[derive(Clone, Debug, Default)]
pub struct FetchOptions {
    /// Audience refreshed when a request comes back `401`.
    pub audience: Audience,
}

impl FetchOptions {
    #[must_use]
    pub fn with_audience(audience: impl Into<Audience>) -> Self {
        Self {
            audience: audience.into(),
        }
    }
}
