//! One-time codes and signed link tokens.
//!
//! Token checks are a client-side heuristic against pasted markup or URLs. The
//! backend still verifies every token signature; nothing here grants access.

use super::{
    policy::{Field, InputLengthPolicy, SUSPICIOUS_TOKEN_FRAGMENTS},
    Verdict,
};
use regex::Regex;

/// Checks a one-time code (TOTP or backup code).
#[must_use]
pub fn validate_otp(input: &str) -> Verdict {
    if input.chars().any(char::is_whitespace) {
        return Verdict::fail("Code may not contain spaces.");
    }

    let policy = InputLengthPolicy::for_field(Field::Otp);
    if !policy.allows(input.chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::Otp.label()));
    }

    if !Regex::new(r"^[a-zA-Z0-9]+$").is_ok_and(|regex| regex.is_match(input)) {
        return Verdict::fail("Code may only contain letters and digits.");
    }

    Verdict::ok()
}

/// Checks a signed token taken from an email link.
#[must_use]
pub fn validate_signed_token(input: &str) -> Verdict {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Verdict::fail("Token is missing.");
    }

    let policy = InputLengthPolicy::for_field(Field::SignedToken);
    if !policy.allows(trimmed.chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::SignedToken.label()));
    }

    if !Regex::new(r"^[a-zA-Z0-9._-]+$").is_ok_and(|regex| regex.is_match(trimmed)) {
        return Verdict::fail("Token contains invalid characters.");
    }

    let lowered = trimmed.to_lowercase();
    if SUSPICIOUS_TOKEN_FRAGMENTS
        .iter()
        .any(|fragment| lowered.contains(fragment))
    {
        return Verdict::fail("Token is not valid.");
    }

    Verdict::ok()
}
