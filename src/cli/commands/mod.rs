pub mod logging;
pub mod session;

use clap::{
    Arg, ColorChoice, Command,
    builder::styling::{AnsiColor, Effects, Styles},
};

pub const ARG_BASE_URL: &str = "base-url";
pub const ARG_COOKIE: &str = "cookie";
pub const ARG_TIMEOUT: &str = "timeout";

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let long_version: &'static str = Box::leak(
        format!("{} - {}", env!("CARGO_PKG_VERSION"), crate::GIT_COMMIT_HASH).into_boxed_str(),
    );

    let command = Command::new("authgate")
        .about("Session helper for cookie/CSRF authentication services")
        .version(env!("CARGO_PKG_VERSION"))
        .long_version(long_version)
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new(ARG_BASE_URL)
                .short('u')
                .long(ARG_BASE_URL)
                .help("Auth service base URL, example: https://auth.example.com")
                .env("AUTHGATE_BASE_URL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_COOKIE)
                .short('c')
                .long(ARG_COOKIE)
                .help("Cookies issued by the auth service, as `name=value; name=value`")
                .env("AUTHGATE_COOKIE")
                .hide_env_values(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .short('t')
                .long(ARG_TIMEOUT)
                .help("Abort the whole operation after this many seconds")
                .env("AUTHGATE_TIMEOUT_SECONDS")
                .value_parser(clap::value_parser!(u64).range(1..)),
        );

    let command = session::with_subcommands(command);
    logging::with_args(command)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "authgate");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Session helper for cookie/CSRF authentication services".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_env() {
        temp_env::with_vars(
            [
                ("AUTHGATE_BASE_URL", Some("https://auth.example.com")),
                ("AUTHGATE_COOKIE", Some("authgate_csrf=abc")),
                ("AUTHGATE_TIMEOUT_SECONDS", Some("15")),
                ("AUTHGATE_LOG_LEVEL", Some("debug")),
            ],
            || {
                let matches = new().get_matches_from(vec!["authgate", "csrf"]);
                assert_eq!(
                    matches.get_one::<String>(ARG_BASE_URL).map(String::as_str),
                    Some("https://auth.example.com")
                );
                assert_eq!(
                    matches.get_one::<String>(ARG_COOKIE).map(String::as_str),
                    Some("authgate_csrf=abc")
                );
                assert_eq!(matches.get_one::<u64>(ARG_TIMEOUT).copied(), Some(15));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(3)
                );
            },
        );
    }

    #[test]
    fn test_base_url_required() {
        temp_env::with_vars([("AUTHGATE_BASE_URL", None::<&str>)], || {
            let result = new().try_get_matches_from(vec!["authgate", "csrf"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_timeout_must_be_positive() {
        temp_env::with_vars([("AUTHGATE_TIMEOUT_SECONDS", None::<&str>)], || {
            let result = new().try_get_matches_from(vec![
                "authgate",
                "--base-url",
                "https://auth.example.com",
                "--timeout",
                "0",
                "csrf",
            ]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_check_log_level_verbosity() {
        for index in 0..5_u8 {
            temp_env::with_vars([("AUTHGATE_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "authgate".to_string(),
                    "--base-url".to_string(),
                    "https://auth.example.com".to_string(),
                    "csrf".to_string(),
                ];

                if index > 0 {
                    args.push(format!("-{}", "v".repeat(usize::from(index))));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(index)
                );
            });
        }
    }
}
