use crate::config::DEFAULT_AUDIENCE;
use clap::{Arg, ArgAction, Command};

pub const CMD_CSRF: &str = "csrf";
pub const CMD_LOGOUT: &str = "logout";
pub const CMD_REFRESH: &str = "refresh";
pub const CMD_WHOAMI: &str = "whoami";
pub const CMD_FETCH: &str = "fetch";

pub const ARG_AUDIENCE: &str = "audience";
pub const ARG_REDIRECT_TO: &str = "redirect-to";
pub const ARG_TARGET: &str = "target";
pub const ARG_METHOD: &str = "method";
pub const ARG_HEADER: &str = "header";
pub const ARG_DATA: &str = "data";

fn audience_arg() -> Arg {
    Arg::new(ARG_AUDIENCE)
        .short('a')
        .long(ARG_AUDIENCE)
        .help("Token audience to refresh")
        .env("AUTHGATE_AUDIENCE")
        .default_value(DEFAULT_AUDIENCE)
}

#[must_use]
pub fn with_subcommands(command: Command) -> Command {
    command
        .subcommand(Command::new(CMD_CSRF).about("Report whether the CSRF cookie is present"))
        .subcommand(
            Command::new(CMD_LOGOUT)
                .about("End the current session")
                .arg(
                    Arg::new(ARG_REDIRECT_TO)
                        .long(ARG_REDIRECT_TO)
                        .help("Location to navigate to after a successful logout"),
                ),
        )
        .subcommand(
            Command::new(CMD_REFRESH)
                .about("Refresh the access token for an audience")
                .arg(audience_arg()),
        )
        .subcommand(
            Command::new(CMD_WHOAMI)
                .about("Show the current user")
                .arg(audience_arg()),
        )
        .subcommand(
            Command::new(CMD_FETCH)
                .about("Send a request, refreshing the session once on 401")
                .arg(
                    Arg::new(ARG_TARGET)
                        .help("Path relative to the base URL, or an absolute URL")
                        .required(true),
                )
                .arg(
                    Arg::new(ARG_METHOD)
                        .short('X')
                        .long(ARG_METHOD)
                        .help("HTTP method")
                        .default_value("GET"),
                )
                .arg(
                    Arg::new(ARG_HEADER)
                        .short('H')
                        .long(ARG_HEADER)
                        .help("Extra request header, as `Name: value`")
                        .action(ArgAction::Append),
                )
                .arg(
                    Arg::new(ARG_DATA)
                        .short('d')
                        .long(ARG_DATA)
                        .help("Request body"),
                )
                .arg(audience_arg()),
        )
}
