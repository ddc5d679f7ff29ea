pub mod api;
pub mod logging;

use crate::validation::Rule;
use clap::{
    builder::styling::{AnsiColor, Effects, Styles},
    Arg, ArgAction, ColorChoice, Command,
};

pub const ARG_EMAIL: &str = "email";
pub const ARG_PASSWORD: &str = "password";
pub const ARG_OTP: &str = "otp";

/// Credentials for the commands that sign in. The password is read from the
/// environment when not given, and never echoed in `--help`.
fn with_credentials(command: Command) -> Command {
    command
        .arg(
            Arg::new(ARG_EMAIL)
                .short('e')
                .long("email")
                .help("Account email")
                .env("PORTAL_EMAIL")
                .required(true),
        )
        .arg(
            Arg::new(ARG_PASSWORD)
                .long("password")
                .help("Account password")
                .env("PORTAL_PASSWORD")
                .hide_env_values(true)
                .required(true),
        )
}

fn with_otp(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_OTP)
            .long("otp")
            .help("One-time code, when the account has MFA enabled")
            .env("PORTAL_OTP")
            .hide_env_values(true),
    )
}

fn check_command() -> Command {
    Command::new("check")
        .about("Run an input validator offline and print the verdict")
        .arg(
            Arg::new("rule")
                .help("Validator to run")
                .required(true)
                .value_parser(Rule::ALL.map(Rule::as_str)),
        )
        .arg(Arg::new("value").help("Input to validate").required(true))
}

fn signup_command() -> Command {
    with_credentials(
        Command::new("signup").about("Create an account").arg(
            Arg::new("name")
                .short('n')
                .long("name")
                .help("Display name")
                .required(true),
        ),
    )
}

fn login_command() -> Command {
    with_otp(with_credentials(
        Command::new("login").about("Sign in and print the synchronized account state"),
    ))
}

fn admin_command() -> Command {
    with_otp(with_credentials(
        Command::new("admin")
            .about("Read the admin panel")
            .subcommand_required(true)
            .subcommand(Command::new("users").about("List user accounts"))
            .subcommand(
                Command::new("logs")
                    .about("List activity logs")
                    .arg(
                        Arg::new("from")
                            .long("from")
                            .help("First day to include, YYYY-MM-DD"),
                    )
                    .arg(
                        Arg::new("to")
                            .long("to")
                            .help("Last day to include, YYYY-MM-DD"),
                    ),
            )
            .subcommand(
                Command::new("messages")
                    .about("List contact-form messages")
                    .arg(
                        Arg::new("unread")
                            .long("unread")
                            .help("Only show unread messages")
                            .action(ArgAction::SetTrue),
                    ),
            ),
    ))
}

#[must_use]
pub fn new() -> Command {
    let styles = Styles::styled()
        .header(AnsiColor::Yellow.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Blue.on_default() | Effects::BOLD)
        .placeholder(AnsiColor::Green.on_default());

    let command = Command::new("portal")
        .about("Account portal client")
        .version(env!("CARGO_PKG_VERSION"))
        .color(ColorChoice::Auto)
        .styles(styles)
        .subcommand_required(true)
        .subcommand(check_command())
        .subcommand(signup_command())
        .subcommand(login_command())
        .subcommand(admin_command());

    logging::with_args(api::with_args(command))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new() {
        let command = new();

        assert_eq!(command.get_name(), "portal");
        assert_eq!(
            command.get_about().map(ToString::to_string),
            Some("Account portal client".to_string())
        );
        assert_eq!(
            command.get_version().map(ToString::to_string),
            Some(env!("CARGO_PKG_VERSION").to_string())
        );
    }

    #[test]
    fn test_check_args() {
        let matches = new().get_matches_from(vec!["portal", "check", "otp", "12 3456"]);

        let (name, sub) = matches.subcommand().expect("subcommand");
        assert_eq!(name, "check");
        assert_eq!(
            sub.get_one::<String>("rule").map(String::as_str),
            Some("otp")
        );
        assert_eq!(
            sub.get_one::<String>("value").map(String::as_str),
            Some("12 3456")
        );
    }

    #[test]
    fn test_check_rejects_unknown_rule() {
        let result = new().try_get_matches_from(vec!["portal", "check", "zip", "12345"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_login_env() {
        temp_env::with_vars(
            [
                ("PORTAL_API_URL", Some("https://api.portal.dev")),
                ("PORTAL_TIMEOUT", Some("30")),
                ("PORTAL_EMAIL", Some("ada@portal.dev")),
                ("PORTAL_PASSWORD", Some("correct horse battery")),
                ("PORTAL_LOG_LEVEL", Some("info")),
            ],
            || {
                let matches = new().get_matches_from(vec!["portal", "login"]);
                assert_eq!(
                    matches.get_one::<String>(api::ARG_API_URL).map(String::as_str),
                    Some("https://api.portal.dev")
                );
                assert_eq!(matches.get_one::<u64>(api::ARG_TIMEOUT).copied(), Some(30));
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    Some(2)
                );

                let sub = matches.subcommand_matches("login").expect("login");
                assert_eq!(
                    sub.get_one::<String>(ARG_EMAIL).map(String::as_str),
                    Some("ada@portal.dev")
                );
                assert_eq!(
                    sub.get_one::<String>(ARG_PASSWORD).map(String::as_str),
                    Some("correct horse battery")
                );
                assert_eq!(sub.get_one::<String>(ARG_OTP), None);
            },
        );
    }

    #[test]
    fn test_login_requires_password() {
        temp_env::with_vars([("PORTAL_PASSWORD", None::<String>)], || {
            let result =
                new().try_get_matches_from(vec!["portal", "login", "--email", "ada@portal.dev"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_timeout_must_be_positive() {
        temp_env::with_vars([("PORTAL_TIMEOUT", None::<String>)], || {
            let result =
                new().try_get_matches_from(vec!["portal", "--timeout", "0", "check", "name", "Ada"]);
            assert!(result.is_err());
        });
    }

    #[test]
    fn test_admin_logs_range() {
        temp_env::with_vars([("PORTAL_PASSWORD", Some("correct horse battery"))], || {
            let matches = new().get_matches_from(vec![
                "portal",
                "admin",
                "--email",
                "root@portal.dev",
                "logs",
                "--from",
                "2024-01-01",
                "--to",
                "2024-01-31",
            ]);
            let admin = matches.subcommand_matches("admin").expect("admin");
            let logs = admin.subcommand_matches("logs").expect("logs");
            assert_eq!(
                logs.get_one::<String>("from").map(String::as_str),
                Some("2024-01-01")
            );
            assert_eq!(
                logs.get_one::<String>("to").map(String::as_str),
                Some("2024-01-31")
            );
        });
    }

    #[test]
    fn test_check_log_level_verbosity() {
        let levels = ["error", "warn", "info", "debug", "trace"];
        for (index, _) in levels.iter().enumerate() {
            temp_env::with_vars([("PORTAL_LOG_LEVEL", None::<String>)], || {
                let mut args = vec![
                    "portal".to_string(),
                    "check".to_string(),
                    "name".to_string(),
                    "Ada".to_string(),
                ];
                if index > 0 {
                    args.push(format!("-{}", "v".repeat(index)));
                }

                let matches = new().get_matches_from(args);
                assert_eq!(
                    matches.get_one::<u8>(logging::ARG_VERBOSITY).copied(),
                    u8::try_from(index).ok()
                );
            });
        }
    }
}
