//! # Portal (Account Management Client)
//!
//! `portal` is the client side of an account-management product: signup, login
//! with optional multi-factor authentication, email/password changes, account
//! recovery, account deletion, and an administrative panel (user table,
//! activity logs, message inbox). The backend is a separate HTTP service; this
//! crate only consumes its wire contract.
//!
//! ## Layers
//!
//! - [`validation`]: pure input checks returning a [`validation::Verdict`]. Every
//!   value typed by a user goes through one of these before it leaves the client.
//! - [`state`]: the local store (session, preferences, recovery slices) and the
//!   [`state::Synchronizer`], the only writer allowed to touch it. Server payloads
//!   are re-validated before they are committed; anything that does not fit the
//!   expected shape demotes the slice to its logged-out default.
//! - [`api`]: request handlers that validate outgoing data, call the backend,
//!   interpret the status code, and commit the result through the synchronizer.
//! - [`cli`]: the `portal` command-line front end.
//!
//! ## Fail-closed Sessions
//!
//! The store never holds a half-applied session. A commit either replaces a
//! whole slice or resets it; a rejected single-field patch logs the user out
//! entirely rather than leaving one stale field behind.

pub mod api;
pub mod cli;
pub mod config;
pub mod state;
pub mod validation;

#[allow(clippy::doc_markdown, clippy::needless_raw_string_hashes)]
pub mod built_info {
    include!(concat!(env!("OUT_DIR"), "/built.rs"));
}

pub const GIT_COMMIT_HASH: &str = match built_info::GIT_COMMIT_HASH {
    Some(hash) => hash,
    None => "unknown",
};

pub const APP_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"),);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_git_commit_hash_format() {
        if GIT_COMMIT_HASH == "unknown" {
            // Acceptable in non-git build environments
            return;
        }
        assert!(
            GIT_COMMIT_HASH.chars().all(|c| c.is_ascii_hexdigit()),
            "GIT_COMMIT_HASH should be a hex string, got: {GIT_COMMIT_HASH}"
        );
        assert!(
            GIT_COMMIT_HASH.len() >= 7,
            "GIT_COMMIT_HASH should be at least 7 characters long, got: {GIT_COMMIT_HASH}"
        );
    }

    #[test]
    fn test_app_user_agent_format() {
        assert!(APP_USER_AGENT.starts_with(env!("CARGO_PKG_NAME")));
        assert!(APP_USER_AGENT.contains(env!("CARGO_PKG_VERSION")));
    }

    #[test]
    fn test_app_user_agent_survives_sanitizing() {
        assert_eq!(
            validation::sanitize_user_agent(APP_USER_AGENT),
            APP_USER_AGENT
        );
    }
}
