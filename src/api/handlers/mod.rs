//! Request handlers: validate outgoing input, call the backend, interpret the
//! status code, and commit confirmed state through the synchronizer.
//!
//! Status policy shared by every handler:
//! - transport failures (timeout, unreachable) never commit; prior state stays;
//! - `401` on an authenticated call demotes the session (fail-closed);
//! - any other non-success status is surfaced as `AppError::Http` untouched;
//! - success bodies go through the synchronizer, and a rejected payload turns
//!   into `AppError::Rejected` after the slice has been reset.
//!
//! The mounted-component guard of a UI (drop the commit if the requesting view
//! is gone) belongs to callers; handlers always commit when they complete.

mod account;
mod admin;
mod auth;

use super::{error_from, read_json, types::SessionPayload, ApiClient, AppError};
use crate::{
    state::{coerce_boolean, StateStore, Synchronizer},
    validation::Verdict,
};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::warn;

/// Result of a password login.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    LoggedIn,
    /// Password accepted; a one-time code must follow via `login_with_otp`.
    MfaRequired,
}

pub struct Handlers<S> {
    api: ApiClient,
    sync: Synchronizer<S>,
}

impl<S: StateStore> Handlers<S> {
    pub fn new(api: ApiClient, store: S) -> Self {
        Self {
            api,
            sync: Synchronizer::new(store),
        }
    }

    pub const fn sync(&self) -> &Synchronizer<S> {
        &self.sync
    }

    pub const fn api(&self) -> &ApiClient {
        &self.api
    }

    /// Commits a session payload, including preferences when the server sent
    /// them. Embedded preferences are checked before anything is written: an
    /// invalid block resets preferences and logs out, so a rejected payload
    /// never leaves an active session behind.
    fn commit_session(&self, payload: &SessionPayload) -> Result<(), AppError> {
        if let Some(preferences) = &payload.preferences {
            let valid = coerce_boolean(&preferences.mailing_list).is_some()
                && coerce_boolean(&preferences.night_mode).is_some();
            if !valid {
                self.sync
                    .commit_preferences(&preferences.mailing_list, &preferences.night_mode);
                self.sync.commit_logout();
                return Err(AppError::Rejected);
            }
        }

        let committed = self.sync.commit_login(
            payload.name.as_str().unwrap_or_default(),
            payload.email.as_str().unwrap_or_default(),
            payload.access.as_str().unwrap_or_default(),
            &payload.acct_verified,
            &payload.mfa_enabled,
        );
        if !committed {
            return Err(AppError::Rejected);
        }

        if let Some(preferences) = &payload.preferences {
            if !self
                .sync
                .commit_preferences(&preferences.mailing_list, &preferences.night_mode)
            {
                self.sync.commit_logout();
                return Err(AppError::Rejected);
            }
        }

        Ok(())
    }

    /// Passes success responses through. A `401` logs the session out before
    /// the error is returned.
    async fn authorized(&self, response: Response) -> Result<Response, AppError> {
        if response.status().is_success() {
            return Ok(response);
        }
        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("session no longer accepted by the server");
            self.sync.commit_logout();
        }
        Err(error_from(response).await)
    }
}

/// Maps a failing verdict to `AppError::Validation`.
fn check(verdict: Verdict) -> Result<(), AppError> {
    verdict.into_result().map_err(AppError::Validation)
}

/// Decodes a payload whose shape the synchronizer re-validates anyway. An
/// undecodable body becomes the empty payload, which every commit rejects.
async fn read_payload<T: DeserializeOwned + Default>(response: Response) -> T {
    match read_json::<T>(response).await {
        Ok(payload) => payload,
        Err(err) => {
            warn!(%err, "undecodable payload");
            T::default()
        }
    }
}

fn flag(value: bool) -> Value {
    Value::Bool(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_maps_verdicts() {
        assert_eq!(check(Verdict::ok()), Ok(()));
        assert_eq!(
            check(Verdict::fail("Code may not contain spaces.")),
            Err(AppError::Validation(
                "Code may not contain spaces.".to_string()
            ))
        );
    }
}
