use clap::{Arg, Command};

pub const ARG_API_URL: &str = "api-url";
pub const ARG_TIMEOUT: &str = "timeout";
pub const ARG_USER_AGENT: &str = "user-agent";

/// Backend connection flags, shared by every subcommand.
#[must_use]
pub fn with_args(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_API_URL)
                .long("api-url")
                .help("Base URL of the account API, example: https://api.portal.dev")
                .env("PORTAL_API_URL")
                .global(true),
        )
        .arg(
            Arg::new(ARG_TIMEOUT)
                .long("timeout")
                .help("Request timeout in seconds (default: 10)")
                .env("PORTAL_TIMEOUT")
                .global(true)
                .value_parser(clap::value_parser!(u64).range(1..)),
        )
        .arg(
            Arg::new(ARG_USER_AGENT)
                .long("user-agent")
                .help("User agent reported to the API")
                .env("PORTAL_USER_AGENT")
                .global(true),
        )
}
