use clap::{builder::ValueParser, Arg, Command};

pub const ARG_VERBOSITY: &str = "verbosity";

#[must_use]
pub fn validator_log_level() -> ValueParser {
    // Accepts either a count (`PORTAL_LOG_LEVEL=3`) or a level name.
    ValueParser::from(move |level: &str| -> std::result::Result<u8, String> {
        if let Ok(parsed) = level.parse::<u8>() {
            if parsed <= 5 {
                return Ok(parsed);
            }
        }

        match level.to_lowercase().as_str() {
            "error" => Ok(0),
            "warn" => Ok(1),
            "info" => Ok(2),
            "debug" => Ok(3),
            "trace" => Ok(4),
            _ => Err("invalid log level".to_string()),
        }
    })
}

#[must_use]
pub fn with_args(command: Command) -> Command {
    command.arg(
        Arg::new(ARG_VERBOSITY)
            .short('v')
            .long("verbose")
            .help("Verbosity level: ERROR, WARN, INFO, DEBUG, TRACE (default: ERROR)")
            .env("PORTAL_LOG_LEVEL")
            .global(true)
            .action(clap::ArgAction::Count)
            .value_parser(validator_log_level()),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_names_and_counts_agree() {
        for (value, expected) in [("debug", 3), ("3", 3), ("WARN", 1), ("0", 0)] {
            temp_env::with_vars([("PORTAL_LOG_LEVEL", Some(value))], || {
                let matches = with_args(Command::new("portal")).get_matches_from(vec!["portal"]);
                assert_eq!(matches.get_one::<u8>(ARG_VERBOSITY).copied(), Some(expected));
            });
        }
    }

    #[test]
    fn unknown_level_is_rejected() {
        temp_env::with_vars([("PORTAL_LOG_LEVEL", Some("loud"))], || {
            let result = with_args(Command::new("portal")).try_get_matches_from(vec!["portal"]);
            assert!(result.is_err());
        });
    }
}
