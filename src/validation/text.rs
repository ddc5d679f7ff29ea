//! Free-form text: user-agent strings, date filters and contact messages.

use super::{
    policy::{Field, InputLengthPolicy},
    Verdict,
};
use regex::Regex;

/// Strips characters outside `[a-zA-Z0-9 .,/();:+_-]` and truncates to the
/// user-agent policy. Never fails; empty input yields an empty string.
#[must_use]
pub fn sanitize_user_agent(input: &str) -> String {
    if input.is_empty() {
        return String::new();
    }

    let max = InputLengthPolicy::for_field(Field::UserAgent).max_value;
    Regex::new(r"[^a-zA-Z0-9 .,/();:+_\-]").map_or_else(
        |_| String::new(),
        |regex| regex.replace_all(input, "").chars().take(max).collect(),
    )
}

/// True for `YYYY-MM-DD` digit grouping. Calendar validity is not checked.
#[must_use]
pub fn is_valid_date_format(input: &str) -> bool {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").is_ok_and(|regex| regex.is_match(input))
}

/// Checks the body of a contact-form message.
#[must_use]
pub fn validate_contact_message(input: &str) -> Verdict {
    let policy = InputLengthPolicy::for_field(Field::ContactMessage);

    if !policy.allows(input.trim().chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::ContactMessage.label()));
    }

    Verdict::ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_agent_keeps_common_browser_strings() {
        let ua = "Mozilla/5.0 (X11; Linux x86_64; rv:128.0) Gecko/20100101 Firefox/128.0";
        assert_eq!(sanitize_user_agent(ua), ua);
    }

    #[test]
    fn user_agent_strips_markup_and_quotes() {
        assert_eq!(
            sanitize_user_agent("curl/8.0 <script>\"alert\"</script>"),
            "curl/8.0 scriptalert/script"
        );
        assert_eq!(sanitize_user_agent("a\nb\tc"), "abc");
    }

    #[test]
    fn user_agent_is_truncated() {
        let long = "x".repeat(600);
        assert_eq!(sanitize_user_agent(&long).len(), 512);
    }

    #[test]
    fn user_agent_sanitizing_is_idempotent() {
        for input in ["", "Mozilla/5.0 (é) <b>", "{}[]|\\", &"ü-".repeat(400)] {
            let once = sanitize_user_agent(input);
            assert_eq!(sanitize_user_agent(&once), once);
        }
    }

    #[test]
    fn date_format_checks_grouping_only() {
        assert!(is_valid_date_format("2024-02-29"));
        assert!(is_valid_date_format("2022-99-99"));
        assert!(!is_valid_date_format("2024-2-29"));
        assert!(!is_valid_date_format("2024/02/29"));
        assert!(!is_valid_date_format(" 2024-02-29"));
        assert!(!is_valid_date_format("2024-02-29T00:00"));
        assert!(!is_valid_date_format(""));
    }

    #[test]
    fn contact_message_bounds() {
        assert!(!validate_contact_message("   hi   ").valid);
        assert!(validate_contact_message("Please close my account.").valid);
        assert!(!validate_contact_message(&"x".repeat(2001)).valid);
    }
}
