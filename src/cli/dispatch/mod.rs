use crate::{
    cli::{
        actions::{
            admin::{self, View},
            check,
            session::{Credentials, LoginArgs, SignupArgs},
            Action,
        },
        commands::{api, ARG_EMAIL, ARG_OTP, ARG_PASSWORD},
    },
    config::{AppConfig, Overrides},
    validation::Rule,
};
use anyhow::{anyhow, Context, Result};
use clap::ArgMatches;
use secrecy::SecretString;

fn string(matches: &ArgMatches, id: &str) -> Option<String> {
    matches.get_one::<String>(id).cloned()
}

fn required(matches: &ArgMatches, id: &str) -> Result<String> {
    string(matches, id).ok_or_else(|| anyhow!("missing required argument: --{id}"))
}

fn config(matches: &ArgMatches) -> Result<AppConfig> {
    AppConfig::load(Overrides {
        api_base_url: string(matches, api::ARG_API_URL),
        timeout_seconds: matches.get_one::<u64>(api::ARG_TIMEOUT).copied(),
        user_agent: string(matches, api::ARG_USER_AGENT),
    })
    .context("invalid configuration")
}

fn credentials(matches: &ArgMatches) -> Result<Credentials> {
    Ok(Credentials {
        email: required(matches, ARG_EMAIL)?,
        password: SecretString::from(required(matches, ARG_PASSWORD)?),
        otp: string(matches, ARG_OTP),
    })
}

fn admin_view(matches: &ArgMatches) -> Result<View> {
    match matches.subcommand() {
        Some(("users", _)) => Ok(View::Users),
        Some(("logs", sub)) => Ok(View::Logs {
            from: string(sub, "from"),
            to: string(sub, "to"),
        }),
        Some(("messages", sub)) => Ok(View::Messages {
            unread_only: sub.get_flag("unread"),
        }),
        _ => Err(anyhow!("missing admin view: users, logs or messages")),
    }
}

/// Maps parsed arguments to the action to run.
///
/// # Errors
/// Returns an error if a required argument is missing or the configuration is
/// invalid.
pub fn handler(matches: &ArgMatches) -> Result<Action> {
    match matches.subcommand() {
        Some(("check", sub)) => {
            let rule = required(sub, "rule")?
                .parse::<Rule>()
                .map_err(|err| anyhow!(err))?;
            Ok(Action::Check(check::Args {
                rule,
                value: required(sub, "value")?,
            }))
        }
        Some(("signup", sub)) => Ok(Action::Signup(SignupArgs {
            config: config(matches)?,
            name: required(sub, "name")?,
            email: required(sub, ARG_EMAIL)?,
            password: SecretString::from(required(sub, ARG_PASSWORD)?),
        })),
        Some(("login", sub)) => Ok(Action::Login(LoginArgs {
            config: config(matches)?,
            credentials: credentials(sub)?,
        })),
        Some(("admin", sub)) => Ok(Action::Admin(admin::Args {
            config: config(matches)?,
            credentials: credentials(sub)?,
            view: admin_view(sub)?,
        })),
        _ => Err(anyhow!("unknown command")),
    }
}
