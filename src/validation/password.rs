//! Password policy for new credentials and format-only checks for existing ones.

use super::{
    policy::{
        Field, InputLengthPolicy, COMMON_PASSWORDS, COMMON_PASSWORD_CHECK_BELOW,
        MAX_REPEATED_CHARS,
    },
    Verdict,
};

/// Checks a password being set (signup, change, reset).
///
/// Short passwords are also screened against the common-password list; long
/// ones are exempt.
#[must_use]
pub fn validate_password_for_signup(input: &str) -> Verdict {
    let trimmed = input.trim();
    let policy = InputLengthPolicy::for_field(Field::Password);
    let length = trimmed.chars().count();

    if !policy.allows(length) {
        return Verdict::fail(policy.out_of_range_message(Field::Password.label()));
    }

    if has_repeated_run(trimmed) {
        return Verdict::fail(format!(
            "Password may not repeat the same character more than {MAX_REPEATED_CHARS} times in a row."
        ));
    }

    if length < COMMON_PASSWORD_CHECK_BELOW {
        let lowered = trimmed.to_lowercase();
        if COMMON_PASSWORDS.iter().any(|common| lowered.contains(common)) {
            return Verdict::fail(format!(
                "Password is too common. Choose another or use at least {COMMON_PASSWORD_CHECK_BELOW} characters."
            ));
        }
    }

    Verdict::ok()
}

/// Checks a password presented at login. Existing accounts predate the current
/// policy, so only the length bounds apply.
#[must_use]
pub fn validate_password_for_login(input: &str) -> Verdict {
    let policy = InputLengthPolicy::for_field(Field::Password);

    if !policy.allows(input.trim().chars().count()) {
        return Verdict::fail(policy.out_of_range_message(Field::Password.label()));
    }

    Verdict::ok()
}

/// True when a non-whitespace character appears more than `MAX_REPEATED_CHARS`
/// times consecutively.
fn has_repeated_run(input: &str) -> bool {
    let mut previous: Option<char> = None;
    let mut run = 0usize;

    for current in input.chars() {
        if previous == Some(current) {
            run += 1;
        } else {
            previous = Some(current);
            run = 1;
        }

        if run > MAX_REPEATED_CHARS && !current.is_whitespace() {
            return true;
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_rejects_four_repeated_characters() {
        let verdict = validate_password_for_signup("aaaa1234");
        assert!(!verdict.valid);
        assert!(verdict.message.contains("repeat"));
    }

    #[test]
    fn signup_allows_three_repeated_characters() {
        assert!(validate_password_for_signup("aaa1b2c3d4").valid);
    }

    #[test]
    fn signup_ignores_repeated_whitespace() {
        assert!(validate_password_for_signup("ab    cd efgh").valid);
    }

    #[test]
    fn signup_accepts_strong_password() {
        assert!(validate_password_for_signup("Tr0ub4dor&3XQ").valid);
    }

    #[test]
    fn signup_rejects_common_fragment_in_short_password() {
        let verdict = validate_password_for_signup("MyPassword1!");
        assert!(!verdict.valid);
        assert!(verdict.message.contains("too common"));
    }

    #[test]
    fn signup_exempts_long_passwords_from_common_list() {
        // 15+ characters: length dominates, the fragment is tolerated.
        assert!(validate_password_for_signup("MyPassword1!xyzq").valid);
    }

    #[test]
    fn signup_enforces_length_bounds() {
        assert!(!validate_password_for_signup("Ab1!").valid);
        assert!(!validate_password_for_signup(&"ab1".repeat(50)).valid);
        assert!(!validate_password_for_signup("   Ab1!x   ").valid);
    }

    #[test]
    fn login_checks_format_only() {
        assert!(validate_password_for_login("aaaa1234").valid);
        assert!(validate_password_for_login("password").valid);
        assert!(!validate_password_for_login("short").valid);
        assert!(!validate_password_for_login(&"x".repeat(129)).valid);
    }

    #[test]
    fn repeated_run_detection() {
        assert!(has_repeated_run("xx!!!!yy"));
        assert!(!has_repeated_run("xx!!!yy!"));
        assert!(!has_repeated_run("a    b"));
        assert!(!has_repeated_run(""));
    }
}
