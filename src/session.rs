//! Session endpoints: logout and refresh.
//!
//! Both read the CSRF cookie fresh, send it as `X-CSRF-Token` with credentials
//! included, and turn every failure into a typed outcome. A missing CSRF cookie
//! short-circuits before any network call. Neither retries.

use crate::{
    client::AuthGate,
    config::{Audience, LOGOUT_PATH, LogoutOptions},
    csrf::CSRF_HEADER,
    errors::{AuthError, LogoutError, LogoutOutcome},
};
use reqwest::{Response, StatusCode, header::HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use tracing::{Instrument, debug, info_span};
use url::Url;

impl AuthGate {
    /// Ends the session on the auth service, then navigates to
    /// `options.redirect_to` if one was given. Navigation never changes the
    /// outcome and never happens on failure.
    pub async fn logout(&self, options: &LogoutOptions) -> LogoutOutcome {
        let Some(token) = self.csrf_token() else {
            debug!("logout skipped: csrf cookie missing");
            return Err(LogoutError::MissingCsrf);
        };

        let url = self
            .config()
            .endpoint(LOGOUT_PATH)
            .map_err(|err| {
                debug!("logout failed: {err}");
                LogoutError::RequestFailed
            })?;

        let response = self
            .post_with_csrf("authgate.logout", url, &token)
            .await
            .map_err(|err| {
                debug!("logout request failed: {err}");
                LogoutError::RequestFailed
            })?;

        let status = response.status();
        if !status.is_success() {
            debug!("logout rejected with status {status}");
            return Err(logout_failure(status));
        }

        if let Some(target) = &options.redirect_to {
            self.navigator().navigate(target);
        }

        Ok(())
    }

    /// Asks the auth service for a new access token for `audience`. Returns
    /// `true` only when the call completed with a success status.
    pub async fn refresh_session(&self, audience: &Audience) -> bool {
        let Some(token) = self.csrf_token() else {
            debug!("refresh skipped: csrf cookie missing");
            return false;
        };

        let url = match self.config().refresh_endpoint(audience) {
            Ok(url) => url,
            Err(err) => {
                debug!("refresh failed: {err}");
                return false;
            }
        };

        match self.post_with_csrf("authgate.refresh", url, &token).await {
            Ok(response) if response.status().is_success() => true,
            Ok(response) => {
                debug!(%audience, "refresh rejected with status {}", response.status());
                false
            }
            Err(err) => {
                debug!(%audience, "refresh request failed: {err}");
                false
            }
        }
    }

    async fn post_with_csrf(
        &self,
        span_name: &'static str,
        url: Url,
        token: &SecretString,
    ) -> Result<Response, AuthError> {
        let mut csrf = HeaderValue::from_str(token.expose_secret())
            .map_err(|_| AuthError::Header(format!("{CSRF_HEADER}: invalid token characters")))?;
        csrf.set_sensitive(true);

        let span = info_span!(
            "authgate.session",
            operation = span_name,
            http.method = "POST",
            url = %url
        );

        Ok(self
            .http()
            .post(url)
            .header(CSRF_HEADER, csrf)
            .send()
            .instrument(span)
            .await?)
    }
}

/// 401 and 403 mean the auth service refused the session; anything else is a
/// plain request failure.
fn logout_failure(status: StatusCode) -> LogoutError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => LogoutError::Unauthorized,
        _ => LogoutError::RequestFailed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logout_failure_maps_statuses() {
        assert_eq!(
            logout_failure(StatusCode::UNAUTHORIZED),
            LogoutError::Unauthorized
        );
        assert_eq!(logout_failure(StatusCode::FORBIDDEN), LogoutError::Unauthorized);
        assert_eq!(logout_failure(StatusCode::NOT_FOUND), LogoutError::RequestFailed);
        assert_eq!(
            logout_failure(StatusCode::INTERNAL_SERVER_ERROR),
            LogoutError::RequestFailed
        );
        assert_eq!(
            logout_failure(StatusCode::MOVED_PERMANENTLY),
            LogoutError::RequestFailed
        );
    }
}
