//! # authgate
//!
//! Client helpers for applications that sit behind an external cookie/CSRF
//! based authentication service. The auth service owns sessions, tokens and
//! cookies; this crate only reads the CSRF cookie it sets and calls a handful
//! of its endpoints.
//!
//! ## Flow Overview
//!
//! - **CSRF:** the token is read fresh from the `authgate_csrf` cookie on every
//!   operation and mirrored in the `X-CSRF-Token` header.
//! - **Logout:** `POST /auth/logout`, with an optional navigation on success.
//! - **Refresh:** `POST /auth/refresh?audience=<aud>` mints a new access token
//!   for an audience (defaults to `app`).
//! - **Authenticated fetch:** any request that comes back `401` triggers one
//!   refresh and, if that succeeds, exactly one replay of the request.
//! - **Identity:** `GET /auth/user` through the authenticated fetch, collapsed
//!   to `Option<CurrentUser>`.
//!
//! Cookies and navigation are reached through the [`CookieStore`] and
//! [`Navigator`] ports so hosts (and tests) decide where they come from. Token
//! values are kept in `SecretString` and never logged.

pub mod cli;
pub mod client;
pub mod config;
pub mod cookies;
pub mod csrf;
pub mod errors;
pub mod fetch;
pub mod identity;
pub mod navigator;
pub mod session;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub use client::{AuthGate, AuthGateBuilder};
pub use config::{Audience, AuthGateConfig, FetchOptions, LogoutOptions};
pub use cookies::{CookieStore, JarCookies, StaticCookies, read_cookie};
pub use errors::{AuthError, LogoutError, LogoutOutcome};
pub use fetch::{AuthRequest, RequestCredentials};
pub use identity::CurrentUser;
pub use navigator::{Navigator, NoopNavigator, RecordingNavigator};

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);
