use thiserror::Error;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum AppError {
    /// Local input check failed; the message is meant for inline display.
    #[error("{0}")]
    Validation(String),
    #[error("Config error: {0}")]
    Config(String),
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout: {0}")]
    Timeout(String),
    /// Blocked locally because the session lacks the required access level.
    #[error("{0}")]
    Forbidden(String),
    #[error("Request failed ({status}): {message}")]
    Http { status: u16, message: String },
    #[error("Response error: {0}")]
    Parse(String),
    #[error("Request error: {0}")]
    Serialization(String),
    /// The server answered, but its payload did not pass re-validation and the
    /// affected state was reset.
    #[error("Unexpected response from the server. Please sign in again.")]
    Rejected,
}

impl AppError {
    /// HTTP status, when the error came from a response.
    #[must_use]
    pub const fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Message suitable for showing to the user without internal detail.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(message) | Self::Config(message) | Self::Forbidden(message) => {
                message.clone()
            }
            Self::Http { message, .. } => message.clone(),
            _ => self.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats() {
        assert_eq!(
            AppError::Http {
                status: 409,
                message: "taken".to_string()
            }
            .to_string(),
            "Request failed (409): taken"
        );
        assert_eq!(
            AppError::Validation("Name contains a reserved word.".to_string()).to_string(),
            "Name contains a reserved word."
        );
    }

    #[test]
    fn user_message_hides_prefixes() {
        assert_eq!(
            AppError::Http {
                status: 401,
                message: "Incorrect email or password.".to_string()
            }
            .user_message(),
            "Incorrect email or password."
        );
        assert_eq!(
            AppError::Timeout("Request timed out.".to_string()).user_message(),
            "Timeout: Request timed out."
        );
        assert_eq!(AppError::Rejected.status(), None);
    }
}
