//! Authenticated requests with a single refresh-and-retry on `401`.
//!
//! Flow Overview:
//! - `Issued`: the request is sent with credentials forced on.
//! - Any status other than `401` is returned untouched (`Done`).
//! - `Refreshing`: a `401` triggers one `refresh_session` for the audience.
//!   A failed refresh returns the original `401`.
//! - `Retried`: after a successful refresh the same request is replayed once
//!   and its response returned, whatever the status.
//!
//! Transport errors from the initial or replayed request propagate to the
//! caller; CSRF and refresh failures never do.

use crate::{client::AuthGate, config::FetchOptions, errors::AuthError};
use bytes::Bytes;
use reqwest::{
    Method, Response, StatusCode,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use serde::Serialize;
use tracing::{Instrument, debug, info_span};

/// Credentials mode a caller asked for. [`AuthGate::auth_fetch`] always
/// overrides it with `Include`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestCredentials {
    #[default]
    Include,
    Omit,
}

/// A request description that can be sent more than once.
#[derive(Debug, Clone)]
pub struct AuthRequest {
    method: Method,
    target: String,
    headers: HeaderMap,
    body: Option<Bytes>,
    credentials: RequestCredentials,
}

impl AuthRequest {
    /// `target` is a path relative to the configured base URL or an absolute URL.
    #[must_use]
    pub fn new(method: Method, target: impl Into<String>) -> Self {
        Self {
            method,
            target: target.into(),
            headers: HeaderMap::new(),
            body: None,
            credentials: RequestCredentials::default(),
        }
    }

    #[must_use]
    pub fn get(target: impl Into<String>) -> Self {
        Self::new(Method::GET, target)
    }

    #[must_use]
    pub fn post(target: impl Into<String>) -> Self {
        Self::new(Method::POST, target)
    }

    /// # Errors
    /// Returns an error if the name or value is not a valid HTTP header.
    pub fn header(mut self, name: &str, value: &str) -> Result<Self, AuthError> {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|err| AuthError::Header(format!("{name}: {err}")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|err| AuthError::Header(format!("{name}: {err}")))?;
        self.headers.append(name, value);
        Ok(self)
    }

    #[must_use]
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Sets a JSON body and the matching `Content-Type`.
    ///
    /// # Errors
    /// Returns an error if `body` cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, AuthError> {
        let payload = serde_json::to_vec(body)?;
        self.headers.insert(
            reqwest::header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        self.body = Some(Bytes::from(payload));
        Ok(self)
    }

    #[must_use]
    pub fn credentials(mut self, credentials: RequestCredentials) -> Self {
        self.credentials = credentials;
        self
    }

    #[must_use]
    pub fn method(&self) -> &Method {
        &self.method
    }

    #[must_use]
    pub fn target(&self) -> &str {
        &self.target
    }

    #[must_use]
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    #[must_use]
    pub fn request_credentials(&self) -> RequestCredentials {
        self.credentials
    }

    /// Copy of this request with credentials included; nothing else changes.
    fn with_credentials(&self) -> Self {
        self.clone().credentials(RequestCredentials::Include)
    }
}

impl AuthGate {
    /// Sends `request`, refreshing the session and replaying it once if the
    /// first response is `401`.
    ///
    /// # Errors
    /// Returns an error if the request cannot be built or the transport fails
    /// on the initial or replayed send. A failed refresh is not an error: the
    /// original `401` response is returned.
    pub async fn auth_fetch(
        &self,
        request: &AuthRequest,
        options: &FetchOptions,
    ) -> Result<Response, AuthError> {
        let request = request.with_credentials();

        let response = self.send(&request).await?;
        if response.status() != StatusCode::UNAUTHORIZED {
            debug!(
                status = %response.status(),
                "auth_fetch: issued -> done"
            );
            return Ok(response);
        }

        debug!(audience = %options.audience, "auth_fetch: issued -> refreshing");
        if !self.refresh_session(&options.audience).await {
            debug!("auth_fetch: refresh failed, returning original response");
            return Ok(response);
        }

        debug!("auth_fetch: refreshing -> retried");
        let retried = self.send(&request).await?;
        debug!(status = %retried.status(), "auth_fetch: retried -> done");
        Ok(retried)
    }

    async fn send(&self, request: &AuthRequest) -> Result<Response, AuthError> {
        let url = self.config().endpoint(&request.target)?;

        let span = info_span!(
            "authgate.fetch",
            http.method = %request.method,
            url = %url
        );

        let mut builder = self
            .http()
            .request(request.method.clone(), url)
            .headers(request.headers.clone());
        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
        }

        Ok(builder.send().instrument(span).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn requests_include_credentials_by_default() {
        let request = AuthRequest::get("/v1/items");
        assert_eq!(request.request_credentials(), RequestCredentials::Include);
        assert_eq!(request.method(), &Method::GET);
        assert_eq!(request.target(), "/v1/items");
    }

    #[test]
    fn with_credentials_only_touches_credentials() -> Result<(), AuthError> {
        let request = AuthRequest::post("/v1/items")
            .header("X-Trace", "t-1")?
            .body("payload")
            .credentials(RequestCredentials::Omit);

        let forced = request.with_credentials();
        assert_eq!(forced.request_credentials(), RequestCredentials::Include);
        assert_eq!(forced.method(), &Method::POST);
        assert_eq!(forced.target(), "/v1/items");
        assert_eq!(
            forced.headers().get("x-trace").and_then(|v| v.to_str().ok()),
            Some("t-1")
        );
        assert_eq!(forced.body.as_deref(), Some(&b"payload"[..]));
        Ok(())
    }

    #[test]
    fn header_rejects_invalid_values() {
        let result = AuthRequest::get("/").header("X-Bad", "line\nbreak");
        assert!(matches!(result, Err(AuthError::Header(_))));
        let result = AuthRequest::get("/").header("bad header", "v");
        assert!(matches!(result, Err(AuthError::Header(_))));
    }

    #[test]
    fn json_sets_content_type() -> Result<(), AuthError> {
        let request = AuthRequest::post("/v1/items").json(&serde_json::json!({"name": "x"}))?;
        assert_eq!(
            request
                .headers()
                .get(reqwest::header::CONTENT_TYPE)
                .and_then(|v| v.to_str().ok()),
            Some("application/json")
        );
        assert_eq!(request.body.as_deref(), Some(&br#"{"name":"x"}"#[..]));
        Ok(())
    }
}
