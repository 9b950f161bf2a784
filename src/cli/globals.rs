use crate::{AuthGate, AuthGateConfig, navigator::Navigator};
use anyhow::{Context, Result};
use reqwest::cookie::Jar;
use secrecy::{ExposeSecret, SecretString};
use std::{sync::Arc, time::Duration};

/// Connection settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct GlobalArgs {
    pub base_url: String,
    pub cookie: SecretString,
    pub timeout: Option<Duration>,
}

impl GlobalArgs {
    #[must_use]
    pub fn new(base_url: String) -> Self {
        Self {
            base_url,
            cookie: SecretString::default(),
            timeout: None,
        }
    }

    pub fn set_cookie(&mut self, cookie: SecretString) {
        self.cookie = cookie;
    }

    /// Builds a client whose cookie jar is seeded with the configured cookies.
    ///
    /// # Errors
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn gate(&self, navigator: Arc<dyn Navigator>) -> Result<AuthGate> {
        let config = AuthGateConfig::new(&self.base_url)
            .with_context(|| format!("invalid base URL: {}", self.base_url))?;

        let jar = Arc::new(Jar::default());
        for entry in self
            .cookie
            .expose_secret()
            .split(';')
            .map(str::trim)
            .filter(|entry| entry.contains('='))
        {
            jar.add_cookie_str(entry, &config.base_url);
        }

        Ok(AuthGate::builder(config)
            .jar(jar)
            .navigator(navigator)
            .build()?)
    }
}
