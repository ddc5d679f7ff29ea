//! Calls made on behalf of the signed-in user: profile changes, email
//! verification, MFA, recovery email, preferences, contact form and account
//! deletion.

use super::{check, flag, read_payload, Handlers};
use crate::{
    api::{
        error_from,
        types::{
            ConfirmedEmailRequest, ContactRequest, MfaPayload, NamePayload, NameRequest,
            OtpRequest, PasswordChangeRequest, PasswordRequest, PreferencesPatch,
            PreferencesPayload, RecoveryPayload, SessionPayload, TokenRequest,
        },
        AppError,
    },
    state::StateStore,
    validation::{
        validate_contact_message, validate_email, validate_name, validate_otp,
        validate_password_for_login, validate_password_for_signup, validate_signed_token,
    },
};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use tracing::{info, instrument};

impl<S: StateStore> Handlers<S> {
    /// Confirms the account email with the signed token from the link.
    ///
    /// # Errors
    /// `Validation` for a malformed token, `Http` if the server refuses it.
    #[instrument(skip_all)]
    pub async fn verify_email(&self, token: &str) -> Result<(), AppError> {
        check(validate_signed_token(token))?;

        let request = TokenRequest {
            token: token.trim(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/me/verify-email", &request)
            .await?;
        self.authorized(response).await?;

        if self.sync.commit_acct_verification(&flag(true)) {
            info!("email verified");
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    /// # Errors
    /// `Http` if the server refuses (e.g. rate limited).
    #[instrument(skip_all)]
    pub async fn resend_verification(&self) -> Result<(), AppError> {
        let response = self
            .api
            .send(Method::POST, "/v1/me/verify-email/resend")
            .await?;
        self.authorized(response).await?;
        Ok(())
    }

    /// # Errors
    /// `Validation` for a bad name, `Rejected` if the echoed name is unusable.
    #[instrument(skip_all)]
    pub async fn change_name(&self, name: &str) -> Result<(), AppError> {
        check(validate_name(name))?;

        let request = NameRequest { name: name.trim() };
        let response = self
            .api
            .send_json(Method::PATCH, "/v1/me/name", &request)
            .await?;
        let response = self.authorized(response).await?;

        let payload: NamePayload = read_payload(response).await;
        if self
            .sync
            .commit_name_change(payload.name.as_str().unwrap_or_default())
        {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    /// Changes the login email. The server returns the updated session,
    /// usually with verification reset.
    ///
    /// # Errors
    /// `Validation` for bad input, `Http` for a wrong password or taken email.
    #[instrument(skip_all)]
    pub async fn change_email(&self, email: &str, password: &SecretString) -> Result<(), AppError> {
        check(validate_email(email))?;
        check(validate_password_for_login(password.expose_secret()))?;

        let request = ConfirmedEmailRequest {
            email: email.trim(),
            password: password.expose_secret(),
        };
        let response = self
            .api
            .send_json(Method::PATCH, "/v1/me/email", &request)
            .await?;
        let response = self.authorized(response).await?;

        let payload: SessionPayload = read_payload(response).await;
        self.commit_session(&payload)
    }

    /// # Errors
    /// `Validation` if either password fails its check or both are equal.
    #[instrument(skip_all)]
    pub async fn change_password(
        &self,
        current: &SecretString,
        new_password: &SecretString,
    ) -> Result<(), AppError> {
        check(validate_password_for_login(current.expose_secret()))?;
        check(validate_password_for_signup(new_password.expose_secret()))?;
        if current.expose_secret() == new_password.expose_secret() {
            return Err(AppError::Validation(
                "New password must differ from the current one.".to_string(),
            ));
        }

        let request = PasswordChangeRequest {
            current_password: current.expose_secret(),
            new_password: new_password.expose_secret(),
        };
        let response = self
            .api
            .send_json(Method::PUT, "/v1/me/password", &request)
            .await?;
        self.authorized(response).await?;
        Ok(())
    }

    /// Turns on MFA by proving possession of the authenticator.
    ///
    /// # Errors
    /// `Validation` for a malformed code, `Http` if the code is wrong.
    #[instrument(skip_all)]
    pub async fn enable_mfa(&self, otp: &str) -> Result<(), AppError> {
        check(validate_otp(otp))?;

        let response = self
            .api
            .send_json(Method::POST, "/v1/me/mfa/enable", &OtpRequest { otp })
            .await?;
        self.commit_mfa_response(response).await
    }

    /// # Errors
    /// `Validation` for a malformed password, `Http` if it is wrong.
    #[instrument(skip_all)]
    pub async fn disable_mfa(&self, password: &SecretString) -> Result<(), AppError> {
        check(validate_password_for_login(password.expose_secret()))?;

        let request = PasswordRequest {
            password: password.expose_secret(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/me/mfa/disable", &request)
            .await?;
        self.commit_mfa_response(response).await
    }

    async fn commit_mfa_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        let response = self.authorized(response).await?;
        let payload: MfaPayload = read_payload(response).await;

        if self.sync.commit_mfa_flag(&payload.mfa_enabled) {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    /// Loads the recovery-email status. `404` means none is configured, which
    /// is a valid, up-to-date answer.
    ///
    /// # Errors
    /// `Rejected` if the status payload does not validate.
    #[instrument(skip_all)]
    pub async fn fetch_recovery(&self) -> Result<(), AppError> {
        let response = self.api.send(Method::GET, "/v1/me/recovery").await?;

        if response.status() == StatusCode::NOT_FOUND {
            self.commit_no_recovery();
            return Ok(());
        }

        let response = self.authorized(response).await?;
        self.commit_recovery_response(response).await
    }

    /// # Errors
    /// `Validation` for bad input, `Http` for a wrong password.
    #[instrument(skip_all)]
    pub async fn add_recovery_email(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<(), AppError> {
        check(validate_email(email))?;
        check(validate_password_for_login(password.expose_secret()))?;
        if email.trim().eq_ignore_ascii_case(self.sync.session().email.trim()) {
            return Err(AppError::Validation(
                "Recovery email must differ from the account email.".to_string(),
            ));
        }

        let request = ConfirmedEmailRequest {
            email: email.trim(),
            password: password.expose_secret(),
        };
        let response = self
            .api
            .send_json(Method::PUT, "/v1/me/recovery", &request)
            .await?;
        let response = self.authorized(response).await?;
        self.commit_recovery_response(response).await
    }

    /// # Errors
    /// `Http` if the server refuses.
    #[instrument(skip_all)]
    pub async fn remove_recovery_email(&self) -> Result<(), AppError> {
        let response = self.api.send(Method::DELETE, "/v1/me/recovery").await?;
        self.authorized(response).await?;
        self.commit_no_recovery();
        Ok(())
    }

    async fn commit_recovery_response(&self, response: reqwest::Response) -> Result<(), AppError> {
        let payload: RecoveryPayload = read_payload(response).await;

        if self.sync.commit_account_recovery(
            &payload.recovery_email_added,
            &payload.recovery_email_preview,
            false,
        ) {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    fn commit_no_recovery(&self) {
        self.sync
            .commit_account_recovery(&flag(false), &Value::String(String::new()), true);
    }

    /// # Errors
    /// `Rejected` if the preferences payload does not validate.
    #[instrument(skip_all)]
    pub async fn fetch_preferences(&self) -> Result<(), AppError> {
        let response = self.api.send(Method::GET, "/v1/me/preferences").await?;
        let response = self.authorized(response).await?;

        let payload: PreferencesPayload = read_payload(response).await;
        if self
            .sync
            .commit_preferences(&payload.mailing_list, &payload.night_mode)
        {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    /// # Errors
    /// `Rejected` if the echoed flag does not validate.
    #[instrument(skip(self))]
    pub async fn set_mailing_list(&self, subscribed: bool) -> Result<(), AppError> {
        let patch = PreferencesPatch {
            mailing_list: Some(subscribed),
            night_mode: None,
        };
        let payload = self.patch_preferences(&patch).await?;

        if self.sync.commit_mailing_list_flag(&payload.mailing_list) {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    /// # Errors
    /// `Rejected` if the echoed flag does not validate.
    #[instrument(skip(self))]
    pub async fn set_night_mode(&self, enabled: bool) -> Result<(), AppError> {
        let patch = PreferencesPatch {
            mailing_list: None,
            night_mode: Some(enabled),
        };
        let payload = self.patch_preferences(&patch).await?;

        if self.sync.commit_night_mode_flag(&payload.night_mode) {
            Ok(())
        } else {
            Err(AppError::Rejected)
        }
    }

    async fn patch_preferences(
        &self,
        patch: &PreferencesPatch,
    ) -> Result<PreferencesPayload, AppError> {
        let response = self
            .api
            .send_json(Method::PATCH, "/v1/me/preferences", patch)
            .await?;
        let response = self.authorized(response).await?;
        Ok(read_payload(response).await)
    }

    /// Deletes the account, then clears local state.
    ///
    /// # Errors
    /// `Validation` for a malformed password, `Http` if it is wrong.
    #[instrument(skip_all)]
    pub async fn delete_account(&self, password: &SecretString) -> Result<(), AppError> {
        check(validate_password_for_login(password.expose_secret()))?;

        let request = PasswordRequest {
            password: password.expose_secret(),
        };
        let response = self.api.send_json(Method::DELETE, "/v1/me", &request).await?;
        self.authorized(response).await?;

        self.sync.reset_all();
        info!("account deleted");
        Ok(())
    }

    /// Sends a contact-form message to the admin inbox. Works signed out.
    ///
    /// # Errors
    /// `Validation` for a bad email or message length.
    #[instrument(skip_all)]
    pub async fn send_contact_message(&self, email: &str, message: &str) -> Result<(), AppError> {
        check(validate_email(email))?;
        check(validate_contact_message(message))?;

        let request = ContactRequest {
            email: email.trim(),
            message: message.trim(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/contact", &request)
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }
}
