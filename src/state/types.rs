//! Slices of the local application state. Each slice is replaced as a whole;
//! `Default` is the logged-out / never-fetched shape.

use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Access levels known to the backend (`USER_ACCESS_TYPES`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessLevel {
    #[default]
    User,
    Admin,
    SuperAdmin,
}

impl AccessLevel {
    pub const ALL: [Self; 3] = [Self::User, Self::Admin, Self::SuperAdmin];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::SuperAdmin => "super_admin",
        }
    }

    /// Admin panel visibility. The backend enforces the real check.
    #[must_use]
    pub const fn is_admin(self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl fmt::Display for AccessLevel {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AccessLevel {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|level| level.as_str() == value)
            .ok_or_else(|| format!("unknown access level: {value}"))
    }
}

/// Session summary mirrored from the server. Contains no secrets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSession {
    pub logged_in: bool,
    pub access: AccessLevel,
    pub email: String,
    pub name: String,
    pub acct_verified: bool,
    pub mfa_enabled: bool,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    pub mailing_list: bool,
    pub night_mode: bool,
}

/// Recovery-email status. `info_up_to_date` separates "never fetched" from
/// "fetched, and nothing is configured".
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRecovery {
    pub recovery_email_added: bool,
    pub recovery_email_preview: String,
    pub info_up_to_date: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn access_level_parses_known_values_only() {
        assert_eq!("user".parse::<AccessLevel>(), Ok(AccessLevel::User));
        assert_eq!("admin".parse::<AccessLevel>(), Ok(AccessLevel::Admin));
        assert_eq!(
            "super_admin".parse::<AccessLevel>(),
            Ok(AccessLevel::SuperAdmin)
        );
        assert!("bogus".parse::<AccessLevel>().is_err());
        assert!("Admin".parse::<AccessLevel>().is_err());
        assert!("".parse::<AccessLevel>().is_err());
    }

    #[test]
    fn access_level_serde_matches_wire_names() -> Result<(), serde_json::Error> {
        assert_eq!(
            serde_json::to_string(&AccessLevel::SuperAdmin)?,
            "\"super_admin\""
        );
        Ok(())
    }

    #[test]
    fn defaults_are_logged_out() {
        let session = UserSession::default();
        assert!(!session.logged_in);
        assert_eq!(session.access, AccessLevel::User);
        assert!(session.email.is_empty());
        assert!(!AccountRecovery::default().info_up_to_date);
    }

    #[test]
    fn only_admins_see_the_panel() {
        assert!(!AccessLevel::User.is_admin());
        assert!(AccessLevel::Admin.is_admin());
        assert!(AccessLevel::SuperAdmin.is_admin());
    }
}
