//! Client configuration. Values come from command-line flags or their
//! `PORTAL_*` environment fallbacks; blank values fall back to defaults.
//! Configuration is public data; do not store secrets here.

use crate::api::AppError;
use std::time::Duration;
use url::Url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8080";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            user_agent: crate::APP_USER_AGENT.to_string(),
        }
    }
}

/// Optional overrides layered on top of [`AppConfig::default`].
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub api_base_url: Option<String>,
    pub timeout_seconds: Option<u64>,
    pub user_agent: Option<String>,
}

impl AppConfig {
    /// Builds a config from overrides, validating the base URL.
    ///
    /// # Errors
    /// Returns `AppError::Config` if the base URL does not parse or uses a
    /// scheme other than http(s), or if the timeout is zero.
    pub fn load(overrides: Overrides) -> Result<Self, AppError> {
        let mut config = Self::default();
        apply_overrides(&mut config, overrides);

        let url = Url::parse(&config.api_base_url)
            .map_err(|err| AppError::Config(format!("Invalid API base URL: {err}")))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(AppError::Config(format!(
                "Unsupported API URL scheme: {}",
                url.scheme()
            )));
        }

        if config.timeout.is_zero() {
            return Err(AppError::Config(
                "Request timeout must be at least one second.".to_string(),
            ));
        }

        Ok(config)
    }
}

fn apply_overrides(config: &mut AppConfig, overrides: Overrides) {
    if let Some(value) = overrides.api_base_url.as_deref().and_then(normalize_value) {
        config.api_base_url = value;
    }
    if let Some(seconds) = overrides.timeout_seconds {
        config.timeout = Duration::from_secs(seconds);
    }
    if let Some(value) = overrides.user_agent.as_deref().and_then(normalize_value) {
        config.user_agent = value;
    }
}

fn normalize_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_value_trims_and_rejects_empty() {
        assert_eq!(normalize_value(""), None);
        assert_eq!(normalize_value("   "), None);
        assert_eq!(
            normalize_value("  https://api.portal.dev "),
            Some("https://api.portal.dev".to_string())
        );
    }

    #[test]
    fn blank_overrides_keep_defaults() -> Result<(), AppError> {
        let config = AppConfig::load(Overrides {
            api_base_url: Some("  ".to_string()),
            timeout_seconds: None,
            user_agent: Some(String::new()),
        })?;

        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECONDS));
        assert_eq!(config.user_agent, crate::APP_USER_AGENT);
        Ok(())
    }

    #[test]
    fn overrides_replace_defaults() -> Result<(), AppError> {
        let config = AppConfig::load(Overrides {
            api_base_url: Some("https://api.portal.dev/".to_string()),
            timeout_seconds: Some(3),
            user_agent: Some("portal-tests/1.0".to_string()),
        })?;

        assert_eq!(config.api_base_url, "https://api.portal.dev/");
        assert_eq!(config.timeout, Duration::from_secs(3));
        assert_eq!(config.user_agent, "portal-tests/1.0");
        Ok(())
    }

    #[test]
    fn rejects_bad_urls_and_zero_timeout() {
        assert!(AppConfig::load(Overrides {
            api_base_url: Some("not a url".to_string()),
            ..Overrides::default()
        })
        .is_err());
        assert!(AppConfig::load(Overrides {
            api_base_url: Some("ftp://files.portal.dev".to_string()),
            ..Overrides::default()
        })
        .is_err());
        assert!(AppConfig::load(Overrides {
            timeout_seconds: Some(0),
            ..Overrides::default()
        })
        .is_err());
    }
}
