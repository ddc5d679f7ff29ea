//! Static input policy: length bounds per field plus the word lists consulted by
//! the name, password and token validators. Everything here is immutable for
//! the lifetime of the process.

/// Inclusive length bounds, counted in characters after trimming.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LengthPolicy {
    pub min_value: usize,
    pub max_value: usize,
}

impl LengthPolicy {
    #[must_use]
    pub const fn new(min_value: usize, max_value: usize) -> Self {
        Self {
            min_value,
            max_value,
        }
    }

    #[must_use]
    pub const fn allows(&self, length: usize) -> bool {
        length >= self.min_value && length <= self.max_value
    }

    /// User-facing message for an out-of-range value of the given field.
    #[must_use]
    pub fn out_of_range_message(&self, label: &str) -> String {
        format!(
            "{label} must be between {} and {} characters.",
            self.min_value, self.max_value
        )
    }
}

/// Fields with a length policy.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Email,
    Password,
    Otp,
    SignedToken,
    UserAgent,
    ContactMessage,
}

impl Field {
    /// Label used at the start of user-facing messages.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "Name",
            Self::Email => "Email",
            Self::Password => "Password",
            Self::Otp => "Code",
            Self::SignedToken => "Token",
            Self::UserAgent => "User agent",
            Self::ContactMessage => "Message",
        }
    }
}

/// Field → bounds table.
pub struct InputLengthPolicy;

impl InputLengthPolicy {
    pub const NAME: LengthPolicy = LengthPolicy::new(2, 48);
    pub const EMAIL: LengthPolicy = LengthPolicy::new(3, 254);
    pub const PASSWORD: LengthPolicy = LengthPolicy::new(8, 128);
    pub const OTP: LengthPolicy = LengthPolicy::new(6, 12);
    pub const SIGNED_TOKEN: LengthPolicy = LengthPolicy::new(10, 1024);
    pub const USER_AGENT: LengthPolicy = LengthPolicy::new(0, 512);
    pub const CONTACT_MESSAGE: LengthPolicy = LengthPolicy::new(10, 2000);

    #[must_use]
    pub const fn for_field(field: Field) -> LengthPolicy {
        match field {
            Field::Name => Self::NAME,
            Field::Email => Self::EMAIL,
            Field::Password => Self::PASSWORD,
            Field::Otp => Self::OTP,
            Field::SignedToken => Self::SIGNED_TOKEN,
            Field::UserAgent => Self::USER_AGENT,
            Field::ContactMessage => Self::CONTACT_MESSAGE,
        }
    }
}

/// Passwords shorter than this are also checked against [`COMMON_PASSWORDS`].
pub const COMMON_PASSWORD_CHECK_BELOW: usize = 15;

/// Longest allowed run of one repeated non-whitespace character.
pub const MAX_REPEATED_CHARS: usize = 3;

/// Lower-case fragments of widely leaked passwords, matched as substrings.
pub const COMMON_PASSWORDS: &[&str] = &[
    "password", "passw0rd", "123456", "654321", "qwerty", "abc123", "letmein", "iloveyou",
    "monkey", "dragon", "football", "baseball", "sunshine", "princess", "welcome", "shadow",
    "master", "trustno1", "superman", "batman", "starwars", "whatever", "1q2w3e", "qazwsx",
    "zaq12wsx", "hello123", "freedom", "mustang", "changeme", "secret", "696969", "login",
];

/// Lower-case fragments that may not appear anywhere in a display name.
pub const RESERVED_NAMES: &[&str] = &[
    "admin",
    "administrator",
    "moderator",
    "root",
    "superuser",
    "support",
    "system",
    "staff",
    "official",
    "webmaster",
    "postmaster",
    "hostmaster",
    "security",
    "portal",
    "undefined",
    "null",
];

/// Lower-case fragments rejected in signed tokens (markup, URLs, SQL keywords).
pub const SUSPICIOUS_TOKEN_FRAGMENTS: &[&str] = &[
    "document", "href", "html", "http", "select", "script", "where", "www.",
];
