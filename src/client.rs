//! The `AuthGate` client: configuration, HTTP clients and the injected ports.
//!
//! Every request goes out on one `reqwest` client that shares its cookie jar
//! with the default [`JarCookies`] store, so the jar plays the part of the
//! browser's cookie storage: the auth service's `Set-Cookie` headers land there
//! and the next CSRF read sees them.

use crate::{
    APP_USER_AGENT,
    config::AuthGateConfig,
    cookies::{CookieStore, JarCookies},
    csrf,
    errors::AuthError,
    navigator::{Navigator, NoopNavigator},
};
use reqwest::{Client, cookie::Jar};
use secrecy::SecretString;
use std::sync::Arc;

#[derive(Clone)]
pub struct AuthGate {
    inner: Arc<AuthGateInner>,
}

struct AuthGateInner {
    config: AuthGateConfig,
    http: Client,
    cookies: Arc<dyn CookieStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthGate {
    #[must_use]
    pub fn builder(config: AuthGateConfig) -> AuthGateBuilder {
        AuthGateBuilder {
            config,
            jar: None,
            cookies: None,
            navigator: None,
        }
    }

    /// Client with a fresh cookie jar and no navigator.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: AuthGateConfig) -> Result<Self, AuthError> {
        Self::builder(config).build()
    }

    #[must_use]
    pub fn config(&self) -> &AuthGateConfig {
        &self.inner.config
    }

    /// Current CSRF token, read from the cookie store at call time.
    #[must_use]
    pub fn csrf_token(&self) -> Option<SecretString> {
        csrf::csrf_token(self.inner.cookies.as_ref())
    }

    /// The cookie-carrying client; auth calls always send credentials.
    pub(crate) fn http(&self) -> &Client {
        &self.inner.http
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.inner.navigator.as_ref()
    }
}

impl std::fmt::Debug for AuthGate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthGate")
            .field("base_url", &self.inner.config.base_url.as_str())
            .field("user_agent", &APP_USER_AGENT)
            .finish_non_exhaustive()
    }
}

pub struct AuthGateBuilder {
    config: AuthGateConfig,
    jar: Option<Arc<Jar>>,
    cookies: Option<Arc<dyn CookieStore>>,
    navigator: Option<Arc<dyn Navigator>>,
}

impl AuthGateBuilder {
    /// Cookie jar used for credentialed requests and, unless [`Self::cookies`]
    /// overrides it, for CSRF reads.
    #[must_use]
    pub fn jar(mut self, jar: Arc<Jar>) -> Self {
        self.jar = Some(jar);
        self
    }

    #[must_use]
    pub fn cookies(mut self, cookies: Arc<dyn CookieStore>) -> Self {
        self.cookies = Some(cookies);
        self
    }

    #[must_use]
    pub fn navigator(mut self, navigator: Arc<dyn Navigator>) -> Self {
        self.navigator = Some(navigator);
        self
    }

    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn build(self) -> Result<AuthGate, AuthError> {
        let jar = self.jar.unwrap_or_default();

        let http = Client::builder()
            .user_agent(APP_USER_AGENT)
            .cookie_provider(Arc::clone(&jar))
            .build()?;

        let cookies = self.cookies.unwrap_or_else(|| {
            Arc::new(JarCookies::new(jar, self.config.base_url.clone())) as Arc<dyn CookieStore>
        });
        let navigator = self
            .navigator
            .unwrap_or_else(|| Arc::new(NoopNavigator) as Arc<dyn Navigator>);

        Ok(AuthGate {
            inner: Arc::new(AuthGateInner {
                config: self.config,
                http,
                cookies,
                navigator,
            }),
        })
    }
}
