//! Maps validated CLI matches to an [`Action`].

use crate::{
    Audience, AuthRequest, FetchOptions,
    cli::{
        actions::{Action, fetch, session},
        commands::{
            ARG_BASE_URL, ARG_COOKIE, ARG_TIMEOUT,
            session::{
                ARG_AUDIENCE, ARG_DATA, ARG_HEADER, ARG_METHOD, ARG_REDIRECT_TO, ARG_TARGET,
                CMD_CSRF, CMD_FETCH, CMD_LOGOUT, CMD_REFRESH, CMD_WHOAMI,
            },
        },
        globals::GlobalArgs,
    },
};
use anyhow::{Context, Result, anyhow};
use reqwest::Method;
use secrecy::SecretString;
use std::time::Duration;

/// # Errors
/// Returns an error if required arguments are missing or malformed.
pub fn handler(matches: &clap::ArgMatches) -> Result<Action> {
    let globals = globals(matches)?;

    match matches.subcommand() {
        Some((CMD_CSRF, _)) => Ok(Action::Csrf(globals)),
        Some((CMD_LOGOUT, sub_m)) => Ok(Action::Logout(session::LogoutArgs {
            globals,
            redirect_to: sub_m.get_one::<String>(ARG_REDIRECT_TO).cloned(),
        })),
        Some((CMD_REFRESH, sub_m)) => Ok(Action::Refresh(session::AudienceArgs {
            globals,
            audience: audience(sub_m),
        })),
        Some((CMD_WHOAMI, sub_m)) => Ok(Action::WhoAmI(session::AudienceArgs {
            globals,
            audience: audience(sub_m),
        })),
        Some((CMD_FETCH, sub_m)) => Ok(Action::Fetch(fetch::Args {
            globals,
            request: request(sub_m)?,
            options: FetchOptions {
                audience: audience(sub_m),
            },
        })),
        Some((other, _)) => Err(anyhow!("unknown subcommand: {other}")),
        None => Err(anyhow!("missing subcommand")),
    }
}

fn globals(matches: &clap::ArgMatches) -> Result<GlobalArgs> {
    let base_url = matches
        .get_one::<String>(ARG_BASE_URL)
        .cloned()
        .context("missing required argument: --base-url")?;

    let mut globals = GlobalArgs::new(base_url);
    if let Some(cookie) = matches.get_one::<String>(ARG_COOKIE) {
        globals.set_cookie(SecretString::from(cookie.clone()));
    }
    globals.timeout = matches
        .get_one::<u64>(ARG_TIMEOUT)
        .copied()
        .map(Duration::from_secs);

    Ok(globals)
}

fn audience(matches: &clap::ArgMatches) -> Audience {
    matches
        .get_one::<String>(ARG_AUDIENCE)
        .map(|audience| Audience::new(audience.as_str()))
        .unwrap_or_default()
}

fn request(matches: &clap::ArgMatches) -> Result<AuthRequest> {
    let target = matches
        .get_one::<String>(ARG_TARGET)
        .context("missing required argument: <target>")?;
    let method = matches
        .get_one::<String>(ARG_METHOD)
        .map_or("GET", String::as_str);
    let method = Method::from_bytes(method.to_uppercase().as_bytes())
        .with_context(|| format!("invalid HTTP method: {method}"))?;

    let mut request = AuthRequest::new(method, target.as_str());

    for header in matches.get_many::<String>(ARG_HEADER).into_iter().flatten() {
        let (name, value) = header
            .split_once(':')
            .with_context(|| format!("invalid header, expected `Name: value`: {header}"))?;
        request = request.header(name.trim(), value.trim())?;
    }

    if let Some(data) = matches.get_one::<String>(ARG_DATA) {
        request = request.body(data.clone());
    }

    Ok(request)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::commands;
    use crate::fetch::RequestCredentials;
    use secrecy::ExposeSecret;

    const BASE_URL: &str = "https://auth.example.com";

    fn dispatch(args: &[&str]) -> Result<Action> {
        let mut argv = vec!["authgate", "--base-url", BASE_URL];
        argv.extend_from_slice(args);
        let mut result = Err(anyhow!("not run"));
        temp_env::with_vars(
            [
                ("AUTHGATE_COOKIE", None::<&str>),
                ("AUTHGATE_TIMEOUT_SECONDS", None::<&str>),
                ("AUTHGATE_AUDIENCE", None::<&str>),
            ],
            || {
                let matches = commands::new().get_matches_from(argv.clone());
                result = handler(&matches);
            },
        );
        result
    }

    #[test]
    fn logout_carries_redirect() -> Result<()> {
        let action = dispatch(&["logout", "--redirect-to", "/after"])?;
        let Action::Logout(args) = action else {
            return Err(anyhow!("expected logout action"));
        };
        assert_eq!(args.redirect_to.as_deref(), Some("/after"));
        assert_eq!(args.globals.base_url, BASE_URL);
        Ok(())
    }

    #[test]
    fn refresh_uses_default_audience() -> Result<()> {
        let Action::Refresh(args) = dispatch(&["refresh"])? else {
            return Err(anyhow!("expected refresh action"));
        };
        assert_eq!(args.audience.as_str(), "app");
        Ok(())
    }

    #[test]
    fn whoami_takes_audience() -> Result<()> {
        let Action::WhoAmI(args) = dispatch(&["whoami", "--audience", "admin"])? else {
            return Err(anyhow!("expected whoami action"));
        };
        assert_eq!(args.audience.as_str(), "admin");
        Ok(())
    }

    #[test]
    fn globals_carry_cookie_and_timeout() -> Result<()> {
        let action = dispatch(&["--cookie", "authgate_csrf=abc", "--timeout", "5", "csrf"])?;
        let globals = action.globals();
        assert_eq!(globals.cookie.expose_secret(), "authgate_csrf=abc");
        assert_eq!(globals.timeout, Some(Duration::from_secs(5)));
        Ok(())
    }

    #[test]
    fn fetch_builds_request() -> Result<()> {
        let action = dispatch(&[
            "fetch",
            "/v1/items",
            "-X",
            "patch",
            "-H",
            "X-Trace: t-1",
            "-d",
            "{}",
            "-a",
            "admin",
        ])?;
        let Action::Fetch(args) = action else {
            return Err(anyhow!("expected fetch action"));
        };
        assert_eq!(args.request.method(), &Method::PATCH);
        assert_eq!(args.request.target(), "/v1/items");
        assert_eq!(
            args.request
                .headers()
                .get("x-trace")
                .and_then(|v| v.to_str().ok()),
            Some("t-1")
        );
        assert_eq!(args.request.request_credentials(), RequestCredentials::Include);
        assert_eq!(args.options.audience.as_str(), "admin");
        Ok(())
    }

    #[test]
    fn fetch_rejects_malformed_header() {
        let result = dispatch(&["fetch", "/v1/items", "-H", "no-colon"]);
        assert!(result.is_err());
    }
}
