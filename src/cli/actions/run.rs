use crate::cli::actions::{admin, check, session, Action};
use anyhow::Result;

/// Execute the provided action.
// Single dispatch point for every CLI action.
/// # Errors
/// Returns an error if the action fails.
pub async fn execute(action: Action) -> Result<()> {
    match action {
        Action::Check(args) => check::execute(&args),
        Action::Signup(args) => session::signup(args).await,
        Action::Login(args) => session::login(args).await,
        Action::Admin(args) => admin::execute(args).await,
    }
}
