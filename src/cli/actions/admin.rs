use super::session::{handlers, print_json, sign_in, Credentials};
use crate::config::AppConfig;
use anyhow::{anyhow, Result};

#[derive(Debug, PartialEq, Eq)]
pub enum View {
    Users,
    Logs {
        from: Option<String>,
        to: Option<String>,
    },
    Messages {
        unread_only: bool,
    },
}

#[derive(Debug)]
pub struct Args {
    pub config: AppConfig,
    pub credentials: Credentials,
    pub view: View,
}

/// Signs in, then prints the requested admin table.
///
/// # Errors
/// Returns an error if sign-in fails, the account is not an admin, or the
/// request is refused.
pub async fn execute(args: Args) -> Result<()> {
    let handlers = handlers(&args.config)?;
    sign_in(&handlers, &args.credentials).await?;

    match args.view {
        View::Users => {
            let users = handlers
                .list_users()
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            print_json(&users)
        }
        View::Logs { from, to } => {
            let logs = handlers
                .activity_logs(from.as_deref(), to.as_deref())
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            print_json(&logs)
        }
        View::Messages { unread_only } => {
            let mut messages = handlers
                .list_messages()
                .await
                .map_err(|err| anyhow!(err.user_message()))?;
            if unread_only {
                messages.retain(|message| !message.read);
            }
            print_json(&messages)
        }
    }
}
