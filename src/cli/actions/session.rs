use crate::{
    api::{ApiClient, Handlers, LoginOutcome},
    config::AppConfig,
    state::{AccountRecovery, MemoryStore, Preferences, UserSession},
};
use anyhow::{anyhow, Context, Result};
use secrecy::SecretString;
use serde::Serialize;
use tracing::{info, warn};

#[derive(Debug)]
pub struct Credentials {
    pub email: String,
    pub password: SecretString,
    pub otp: Option<String>,
}

#[derive(Debug)]
pub struct SignupArgs {
    pub config: AppConfig,
    pub name: String,
    pub email: String,
    pub password: SecretString,
}

#[derive(Debug)]
pub struct LoginArgs {
    pub config: AppConfig,
    pub credentials: Credentials,
}

/// Everything the synchronizer holds after a run.
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub session: UserSession,
    pub preferences: Preferences,
    pub recovery: AccountRecovery,
}

impl Snapshot {
    #[must_use]
    pub fn of(handlers: &Handlers<MemoryStore>) -> Self {
        let sync = handlers.sync();
        Self {
            session: sync.session(),
            preferences: sync.preferences(),
            recovery: sync.recovery(),
        }
    }
}

/// # Errors
/// Returns an error if the HTTP client cannot be built.
pub fn handlers(config: &AppConfig) -> Result<Handlers<MemoryStore>> {
    let api = ApiClient::new(config).context("failed to create API client")?;
    Ok(Handlers::new(api, MemoryStore::new()))
}

/// Password login, followed by the one-time code when the backend asks for it.
///
/// # Errors
/// Returns an error if either step is refused, or if a code is required but
/// none was given.
pub async fn sign_in(handlers: &Handlers<MemoryStore>, credentials: &Credentials) -> Result<()> {
    let outcome = handlers
        .login(&credentials.email, &credentials.password)
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    if outcome == LoginOutcome::MfaRequired {
        let otp = credentials
            .otp
            .as_deref()
            .ok_or_else(|| anyhow!("This account requires a one-time code, pass --otp"))?;
        handlers
            .login_with_otp(&credentials.email, otp)
            .await
            .map_err(|err| anyhow!(err.user_message()))?;
    }

    info!("signed in");
    Ok(())
}

/// Loads the slices the login payload may not carry. Failures only warn:
/// the session itself is already committed.
async fn load_account_details(handlers: &Handlers<MemoryStore>) {
    if let Err(err) = handlers.fetch_preferences().await {
        warn!(%err, "could not load preferences");
    }
    if let Err(err) = handlers.fetch_recovery().await {
        warn!(%err, "could not load recovery email status");
    }
}

/// # Errors
/// Returns an error if the value cannot be serialized.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let output = serde_json::to_string_pretty(value).context("failed to serialize output")?;
    println!("{output}");
    Ok(())
}

/// # Errors
/// Returns an error if the account cannot be created.
pub async fn signup(args: SignupArgs) -> Result<()> {
    let handlers = handlers(&args.config)?;

    handlers
        .signup(&args.name, &args.email, &args.password)
        .await
        .map_err(|err| anyhow!(err.user_message()))?;

    print_json(&Snapshot::of(&handlers))
}

/// # Errors
/// Returns an error if sign-in fails.
pub async fn login(args: LoginArgs) -> Result<()> {
    let handlers = handlers(&args.config)?;

    sign_in(&handlers, &args.credentials).await?;
    load_account_details(&handlers).await;

    print_json(&Snapshot::of(&handlers))
}
