//! Signup, login (with optional one-time code), session restore, logout and
//! password reset. Passwords and codes are validated locally first and never
//! logged.

use super::{check, read_payload, Handlers, LoginOutcome};
use crate::{
    api::{
        error_from,
        types::{
            EmailRequest, LoginRequest, OtpLoginRequest, PasswordResetRequest, SessionPayload,
            SignupRequest,
        },
        AppError,
    },
    state::StateStore,
    validation::{
        validate_email, validate_name, validate_otp, validate_password_for_login,
        validate_password_for_signup, validate_signed_token,
    },
};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, info, instrument};

impl<S: StateStore> Handlers<S> {
    /// Creates an account. The backend answers `201` with the new session.
    ///
    /// # Errors
    /// `Validation` for bad input, `Http` (e.g. `409` for a taken email),
    /// `Rejected` if the returned session does not validate.
    #[instrument(skip_all)]
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &SecretString,
    ) -> Result<(), AppError> {
        check(validate_name(name))?;
        check(validate_email(email))?;
        check(validate_password_for_signup(password.expose_secret()))?;

        let request = SignupRequest {
            name: name.trim(),
            email: email.trim(),
            password: password.expose_secret(),
            user_agent: self.api.user_agent(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/auth/signup", &request)
            .await?;

        match response.status() {
            StatusCode::CREATED | StatusCode::OK => {
                let payload: SessionPayload = read_payload(response).await;
                self.commit_session(&payload)?;
                info!("account created");
                Ok(())
            }
            _ => Err(error_from(response).await),
        }
    }

    /// Password login. `202` means a one-time code is still required.
    ///
    /// # Errors
    /// `Validation` for bad input, `Http` for rejected credentials, `Rejected`
    /// if the returned session does not validate.
    #[instrument(skip_all)]
    pub async fn login(
        &self,
        email: &str,
        password: &SecretString,
    ) -> Result<LoginOutcome, AppError> {
        check(validate_email(email))?;
        check(validate_password_for_login(password.expose_secret()))?;

        let request = LoginRequest {
            email: email.trim(),
            password: password.expose_secret(),
            user_agent: self.api.user_agent(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/auth/login", &request)
            .await?;

        match response.status() {
            StatusCode::OK => {
                let payload: SessionPayload = read_payload(response).await;
                self.commit_session(&payload)?;
                info!("logged in");
                Ok(LoginOutcome::LoggedIn)
            }
            StatusCode::ACCEPTED => {
                debug!("one-time code required");
                Ok(LoginOutcome::MfaRequired)
            }
            _ => Err(error_from(response).await),
        }
    }

    /// Second login step after [`LoginOutcome::MfaRequired`].
    ///
    /// # Errors
    /// `Validation` for a malformed code, `Http` if the server refuses it,
    /// `Rejected` if the returned session does not validate.
    #[instrument(skip_all)]
    pub async fn login_with_otp(&self, email: &str, otp: &str) -> Result<(), AppError> {
        check(validate_email(email))?;
        check(validate_otp(otp))?;

        let request = OtpLoginRequest {
            email: email.trim(),
            otp,
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/auth/login/mfa", &request)
            .await?;

        if response.status() != StatusCode::OK {
            return Err(error_from(response).await);
        }

        let payload: SessionPayload = read_payload(response).await;
        self.commit_session(&payload)?;
        info!("logged in with one-time code");
        Ok(())
    }

    /// Re-hydrates state from the session cookie. Returns whether a session
    /// is active; `204` and `401` both mean "logged out".
    ///
    /// # Errors
    /// Transport errors leave state untouched; `Rejected` if the session does
    /// not validate; `Http` for unexpected statuses.
    #[instrument(skip_all)]
    pub async fn restore_session(&self) -> Result<bool, AppError> {
        let response = self.api.send(Method::GET, "/v1/auth/session").await?;

        match response.status() {
            StatusCode::OK => {
                let payload: SessionPayload = read_payload(response).await;
                self.commit_session(&payload)?;
                Ok(true)
            }
            StatusCode::NO_CONTENT | StatusCode::UNAUTHORIZED => Ok(self.sync.commit_logout()),
            _ => Err(error_from(response).await),
        }
    }

    /// Ends the session. Local state is reset whatever the server says.
    ///
    /// # Errors
    /// Reports a failed server-side logout after the local reset.
    #[instrument(skip_all)]
    pub async fn logout(&self) -> Result<(), AppError> {
        let result = self.api.send(Method::POST, "/v1/auth/logout").await;
        self.sync.commit_logout();

        let response = result?;
        if response.status().is_success() || response.status() == StatusCode::UNAUTHORIZED {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    /// Asks for a reset link. The backend answers the same way whether or not
    /// the account exists.
    ///
    /// # Errors
    /// `Validation` for a malformed email, `Http` for other failures.
    #[instrument(skip_all)]
    pub async fn request_password_reset(&self, email: &str) -> Result<(), AppError> {
        check(validate_email(email))?;

        let request = EmailRequest {
            email: email.trim(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/auth/password-reset", &request)
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }

    /// Sets a new password using the signed token from the reset email.
    ///
    /// # Errors
    /// `Validation` for a bad token or weak password, `Http` if the token has
    /// expired or was already used.
    #[instrument(skip_all)]
    pub async fn complete_password_reset(
        &self,
        token: &str,
        new_password: &SecretString,
    ) -> Result<(), AppError> {
        check(validate_signed_token(token))?;
        check(validate_password_for_signup(new_password.expose_secret()))?;

        let request = PasswordResetRequest {
            token: token.trim(),
            password: new_password.expose_secret(),
        };
        let response = self
            .api
            .send_json(Method::POST, "/v1/auth/password-reset/confirm", &request)
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(error_from(response).await)
        }
    }
}
