//! Display name and email checks.

use super::{
    policy::{Field, InputLengthPolicy, RESERVED_NAMES},
    Verdict,
};
use regex::Regex;

/// Checks a display name: trimmed length within policy, and no reserved word
/// anywhere inside it (substring match, case-insensitive).
#[must_use]
pub fn validate_name(input: &str) -> Verdict {
    let trimmed = input.trim();
    let policy = InputLengthPolicy::for_field(Field::Name);

    if !policy.allows(trimmed.chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::Name.label()));
    }

    let lowered = trimmed.to_lowercase();
    if RESERVED_NAMES.iter().any(|reserved| lowered.contains(reserved)) {
        return Verdict::fail("Name contains a reserved word.");
    }

    Verdict::ok()
}

/// Checks an email address. Only the `local@domain` shape is enforced; the
/// backend owns deliverability.
#[must_use]
pub fn validate_email(input: &str) -> Verdict {
    let trimmed = input.trim();
    let policy = InputLengthPolicy::for_field(Field::Email);

    if !policy.allows(trimmed.chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::Email.label()));
    }

    if !Regex::new(r"^[^@]+@[^@]+$").is_ok_and(|regex| regex.is_match(trimmed)) {
        return Verdict::fail("Email address looks invalid.");
    }

    Verdict::ok()
}
