//! Input validation engine. Every validator is a pure, total function: invalid
//! input is reported through a [`Verdict`], never through a panic or an error
//! type, so callers can render the message inline under the offending field.
//!
//! Typed entry points take `&str`. Input of unknown shape (JSON from a form or a
//! command line) goes through [`validate`], which rejects non-string values with
//! a normal failing verdict.

mod codes;
mod identity;
mod password;
pub mod policy;
mod text;

pub use codes::{validate_otp, validate_signed_token};
pub use identity::{validate_email, validate_name};
pub use password::{validate_password_for_login, validate_password_for_signup};
pub use policy::{Field, InputLengthPolicy, LengthPolicy};
pub use text::{is_valid_date_format, sanitize_user_agent, validate_contact_message};

use serde::Serialize;
use serde_json::Value;
use std::{fmt, str::FromStr};

const GENERIC_FAILURE: &str = "Invalid input.";

/// Result of a validation check. `message` is empty exactly when `valid` is true.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Verdict {
    pub valid: bool,
    pub message: String,
}

impl Verdict {
    #[must_use]
    pub const fn ok() -> Self {
        Self {
            valid: true,
            message: String::new(),
        }
    }

    /// Failing verdict. A blank message is replaced so failures always explain
    /// themselves.
    #[must_use]
    pub fn fail(message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_FAILURE.to_string()
        } else {
            message
        };

        Self {
            valid: false,
            message,
        }
    }

    /// Converts into a `Result`, carrying the message on failure.
    ///
    /// # Errors
    /// Returns the verdict message when the input was rejected.
    pub fn into_result(self) -> Result<(), String> {
        if self.valid {
            Ok(())
        } else {
            Err(self.message)
        }
    }
}

/// Which validator to apply to dynamically typed input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rule {
    Name,
    Email,
    SignupPassword,
    LoginPassword,
    Otp,
    SignedToken,
    ContactMessage,
}

impl Rule {
    pub const ALL: [Self; 7] = [
        Self::Name,
        Self::Email,
        Self::SignupPassword,
        Self::LoginPassword,
        Self::Otp,
        Self::SignedToken,
        Self::ContactMessage,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::SignupPassword => "signup-password",
            Self::LoginPassword => "login-password",
            Self::Otp => "otp",
            Self::SignedToken => "token",
            Self::ContactMessage => "message",
        }
    }

    const fn field(self) -> Field {
        match self {
            Self::Name => Field::Name,
            Self::Email => Field::Email,
            Self::SignupPassword | Self::LoginPassword => Field::Password,
            Self::Otp => Field::Otp,
            Self::SignedToken => Field::SignedToken,
            Self::ContactMessage => Field::ContactMessage,
        }
    }

    fn apply(self, input: &str) -> Verdict {
        match self {
            Self::Name => validate_name(input),
            Self::Email => validate_email(input),
            Self::SignupPassword => validate_password_for_signup(input),
            Self::LoginPassword => validate_password_for_login(input),
            Self::Otp => validate_otp(input),
            Self::SignedToken => validate_signed_token(input),
            Self::ContactMessage => validate_contact_message(input),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for Rule {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|rule| rule.as_str() == value)
            .ok_or_else(|| format!("unknown rule: {value}"))
    }
}

/// Validates a value of unknown type. Anything but a JSON string fails.
#[must_use]
pub fn validate(rule: Rule, input: &Value) -> Verdict {
    match input.as_str() {
        Some(text) => rule.apply(text),
        None => Verdict::fail(format!("{} must be text.", rule.field().label())),
    }
}

/// [`sanitize_user_agent`] for values of unknown type; non-strings become `""`.
#[must_use]
pub fn sanitize_user_agent_value(input: &Value) -> String {
    input.as_str().map(sanitize_user_agent).unwrap_or_default()
}

/// [`is_valid_date_format`] for values of unknown type.
#[must_use]
pub fn is_valid_date_value(input: &Value) -> bool {
    input.as_str().is_some_and(is_valid_date_format)
}
