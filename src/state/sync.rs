//! The only writer of the shared store. Every commit re-validates its input,
//! then performs exactly one wholesale replacement of one slice: the populated
//! value on success, the default on failure. Results are `bool` so callers can
//! decide how to tell the user; the reason is logged, never returned.

use super::{
    coerce::coerce_boolean,
    store::StateStore,
    types::{AccessLevel, AccountRecovery, Preferences, UserSession},
};
use serde_json::Value;
use tracing::{debug, warn};

pub struct Synchronizer<S> {
    store: S,
}

impl<S: StateStore> Synchronizer<S> {
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    pub const fn store(&self) -> &S {
        &self.store
    }

    #[must_use]
    pub fn session(&self) -> UserSession {
        self.store.session()
    }

    #[must_use]
    pub fn preferences(&self) -> Preferences {
        self.store.preferences()
    }

    #[must_use]
    pub fn recovery(&self) -> AccountRecovery {
        self.store.recovery()
    }

    /// Replaces the whole session after login, signup or session restore.
    pub fn commit_login(
        &self,
        name: &str,
        email: &str,
        access: &str,
        acct_verified_raw: &Value,
        mfa_raw: &Value,
    ) -> bool {
        let session = session_from_payload(name, email, access, acct_verified_raw, mfa_raw);

        match session {
            Some(session) => {
                debug!(access = %session.access, "session committed");
                self.store.replace_session(session);
                true
            }
            None => {
                warn!("rejected session payload, resetting to logged out");
                self.commit_logout()
            }
        }
    }

    /// Resets the session. Always returns `false` ("not logged in").
    pub fn commit_logout(&self) -> bool {
        self.store.replace_session(UserSession::default());
        false
    }

    pub fn commit_name_change(&self, name: &str) -> bool {
        if name.trim().is_empty() {
            return self.fail_closed("name");
        }
        self.patch_session("name", |session| session.name = name.to_string())
    }

    pub fn commit_acct_verification(&self, flag: &Value) -> bool {
        match coerce_boolean(flag) {
            Some(verified) => {
                self.patch_session("acct_verified", |session| session.acct_verified = verified)
            }
            None => self.fail_closed("acct_verified"),
        }
    }

    pub fn commit_mfa_flag(&self, flag: &Value) -> bool {
        match coerce_boolean(flag) {
            Some(enabled) => {
                self.patch_session("mfa_enabled", |session| session.mfa_enabled = enabled)
            }
            None => self.fail_closed("mfa_enabled"),
        }
    }

    /// Replaces both preference flags, or resets them when either is invalid.
    pub fn commit_preferences(&self, mailing_list_raw: &Value, night_mode_raw: &Value) -> bool {
        match (
            coerce_boolean(mailing_list_raw),
            coerce_boolean(night_mode_raw),
        ) {
            (Some(mailing_list), Some(night_mode)) => {
                self.store.replace_preferences(Preferences {
                    mailing_list,
                    night_mode,
                });
                true
            }
            _ => self.reset_preferences(),
        }
    }

    pub fn commit_mailing_list_flag(&self, flag: &Value) -> bool {
        match coerce_boolean(flag) {
            Some(mailing_list) => {
                let mut preferences = self.store.preferences();
                preferences.mailing_list = mailing_list;
                self.store.replace_preferences(preferences);
                true
            }
            None => self.reset_preferences(),
        }
    }

    pub fn commit_night_mode_flag(&self, flag: &Value) -> bool {
        match coerce_boolean(flag) {
            Some(night_mode) => {
                let mut preferences = self.store.preferences();
                preferences.night_mode = night_mode;
                self.store.replace_preferences(preferences);
                true
            }
            None => self.reset_preferences(),
        }
    }

    /// Stores the recovery-email status.
    ///
    /// On rejection the slice is reset, with `info_up_to_date` taken from
    /// `up_to_date_on_failure`: an absent recovery status can be a legitimate
    /// steady state rather than an error, and only the caller knows which.
    pub fn commit_account_recovery(
        &self,
        added_raw: &Value,
        preview_raw: &Value,
        up_to_date_on_failure: bool,
    ) -> bool {
        match (coerce_boolean(added_raw), preview_raw.as_str()) {
            (Some(recovery_email_added), Some(preview)) => {
                self.store.replace_recovery(AccountRecovery {
                    recovery_email_added,
                    recovery_email_preview: preview.to_string(),
                    info_up_to_date: true,
                });
                true
            }
            _ => {
                warn!("rejected recovery payload, resetting recovery status");
                self.store.replace_recovery(AccountRecovery {
                    info_up_to_date: up_to_date_on_failure,
                    ..AccountRecovery::default()
                });
                false
            }
        }
    }

    /// Returns every slice to its default, for when the account itself is gone.
    pub fn reset_all(&self) {
        self.store.replace_session(UserSession::default());
        self.store.replace_preferences(Preferences::default());
        self.store.replace_recovery(AccountRecovery::default());
    }

    /// Patches a populated session. There is nothing to patch while logged
    /// out, so the default is kept and the patch counts as rejected.
    fn patch_session(&self, field: &'static str, patch: impl FnOnce(&mut UserSession)) -> bool {
        let mut session = self.store.session();
        if !session.logged_in {
            return self.fail_closed(field);
        }
        patch(&mut session);
        self.store.replace_session(session);
        true
    }

    /// Fail-closed invariant: an invalid single-field patch invalidates the
    /// whole session instead of leaving that field stale.
    fn fail_closed(&self, field: &'static str) -> bool {
        warn!(field, "rejected session patch, logging out");
        self.commit_logout()
    }

    fn reset_preferences(&self) -> bool {
        warn!("rejected preferences payload, resetting to defaults");
        self.store.replace_preferences(Preferences::default());
        false
    }
}

fn session_from_payload(
    name: &str,
    email: &str,
    access: &str,
    acct_verified_raw: &Value,
    mfa_raw: &Value,
) -> Option<UserSession> {
    if name.is_empty() || email.is_empty() {
        return None;
    }

    Some(UserSession {
        logged_in: true,
        access: access.parse::<AccessLevel>().ok()?,
        email: email.to_string(),
        name: name.to_string(),
        acct_verified: coerce_boolean(acct_verified_raw)?,
        mfa_enabled: coerce_boolean(mfa_raw)?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::MemoryStore;
    use serde_json::json;
    use std::cell::RefCell;

    /// Records every write so tests can assert one replacement per commit.
    #[derive(Default)]
    struct RecordingStore {
        session: RefCell<UserSession>,
        preferences: RefCell<Preferences>,
        recovery: RefCell<AccountRecovery>,
        writes: RefCell<Vec<&'static str>>,
    }

    impl StateStore for RecordingStore {
        fn session(&self) -> UserSession {
            self.session.borrow().clone()
        }

        fn replace_session(&self, session: UserSession) {
            self.writes.borrow_mut().push("session");
            *self.session.borrow_mut() = session;
        }

        fn preferences(&self) -> Preferences {
            self.preferences.borrow().clone()
        }

        fn replace_preferences(&self, preferences: Preferences) {
            self.writes.borrow_mut().push("preferences");
            *self.preferences.borrow_mut() = preferences;
        }

        fn recovery(&self) -> AccountRecovery {
            self.recovery.borrow().clone()
        }

        fn replace_recovery(&self, recovery: AccountRecovery) {
            self.writes.borrow_mut().push("recovery");
            *self.recovery.borrow_mut() = recovery;
        }
    }

    fn logged_in() -> Synchronizer<RecordingStore> {
        let sync = Synchronizer::new(RecordingStore::default());
        assert!(sync.commit_login("Jo", "jo@x.com", "admin", &json!(true), &json!(true)));
        sync.store().writes.borrow_mut().clear();
        sync
    }

    #[test]
    fn commit_login_coerces_string_flags() {
        let sync = Synchronizer::new(MemoryStore::new());
        assert!(sync.commit_login("Jo", "jo@x.com", "user", &json!("true"), &json!("false")));

        let session = sync.session();
        assert!(session.logged_in);
        assert_eq!(session.access, AccessLevel::User);
        assert_eq!(session.name, "Jo");
        assert_eq!(session.email, "jo@x.com");
        assert!(session.acct_verified);
        assert!(!session.mfa_enabled);
    }

    #[test]
    fn commit_login_rejections_reset_to_default() {
        let cases = [
            ("", "jo@x.com", "user", json!(true)),
            ("Jo", "", "user", json!(true)),
            ("Jo", "jo@x.com", "bogus", json!(true)),
            ("Jo", "jo@x.com", "user", json!(42)),
        ];

        for (name, email, access, verified) in cases {
            let sync = logged_in();
            assert!(!sync.commit_login(name, email, access, &verified, &json!(false)));
            assert_eq!(sync.session(), UserSession::default());
            assert_eq!(*sync.store().writes.borrow(), vec!["session"]);
        }
    }

    #[test]
    fn commit_login_writes_exactly_once() {
        let sync = Synchronizer::new(RecordingStore::default());
        assert!(sync.commit_login("Jo", "jo@x.com", "super_admin", &json!(false), &json!("true")));
        assert_eq!(*sync.store().writes.borrow(), vec!["session"]);
    }

    #[test]
    fn commit_logout_returns_false() {
        let sync = logged_in();
        assert!(!sync.commit_logout());
        assert_eq!(sync.session(), UserSession::default());
    }

    #[test]
    fn name_patch_keeps_other_fields() {
        let sync = logged_in();
        assert!(sync.commit_name_change("Joanna"));
        let session = sync.session();
        assert_eq!(session.name, "Joanna");
        assert_eq!(session.access, AccessLevel::Admin);
        assert!(session.mfa_enabled);
    }

    #[test]
    fn invalid_patches_log_out_entirely() {
        let sync = logged_in();
        assert!(!sync.commit_name_change("  "));
        assert_eq!(sync.session(), UserSession::default());

        let sync = logged_in();
        assert!(!sync.commit_acct_verification(&json!("yes")));
        assert_eq!(sync.session(), UserSession::default());

        let sync = logged_in();
        assert!(!sync.commit_mfa_flag(&json!(null)));
        assert_eq!(sync.session(), UserSession::default());
        assert_eq!(*sync.store().writes.borrow(), vec!["session"]);
    }

    #[test]
    fn patches_never_populate_a_logged_out_session() {
        let sync = Synchronizer::new(RecordingStore::default());

        assert!(!sync.commit_mfa_flag(&json!(true)));
        assert!(!sync.commit_name_change("Mallory"));
        assert!(!sync.commit_acct_verification(&json!("true")));

        assert_eq!(sync.session(), UserSession::default());
        assert_eq!(
            *sync.store().writes.borrow(),
            vec!["session", "session", "session"]
        );
    }

    #[test]
    fn flag_patches_accept_strings() {
        let sync = logged_in();
        assert!(sync.commit_mfa_flag(&json!("false")));
        assert!(!sync.session().mfa_enabled);
        assert!(sync.commit_acct_verification(&json!(false)));
        assert!(!sync.session().acct_verified);
        assert!(sync.session().logged_in);
    }

    #[test]
    fn preferences_replace_or_reset() {
        let sync = Synchronizer::new(MemoryStore::new());
        assert!(sync.commit_preferences(&json!("true"), &json!(true)));
        assert_eq!(
            sync.preferences(),
            Preferences {
                mailing_list: true,
                night_mode: true
            }
        );

        assert!(!sync.commit_preferences(&json!(true), &json!("on")));
        assert_eq!(sync.preferences(), Preferences::default());
    }

    #[test]
    fn night_mode_string_and_bool_agree() {
        let from_string = Synchronizer::new(MemoryStore::new());
        let from_bool = Synchronizer::new(MemoryStore::new());
        assert!(from_string.commit_night_mode_flag(&json!("true")));
        assert!(from_bool.commit_night_mode_flag(&json!(true)));
        assert_eq!(from_string.preferences(), from_bool.preferences());
    }

    #[test]
    fn single_preference_flags_are_independent() {
        let sync = Synchronizer::new(MemoryStore::new());
        assert!(sync.commit_mailing_list_flag(&json!(true)));
        assert!(sync.commit_night_mode_flag(&json!(true)));
        assert!(sync.commit_mailing_list_flag(&json!("false")));
        assert_eq!(
            sync.preferences(),
            Preferences {
                mailing_list: false,
                night_mode: true
            }
        );

        assert!(!sync.commit_night_mode_flag(&json!(1)));
        assert_eq!(sync.preferences(), Preferences::default());
        // the session slice is untouched by preference failures
        assert_eq!(sync.session(), UserSession::default());
    }

    #[test]
    fn reset_all_clears_every_slice() {
        let sync = logged_in();
        assert!(sync.commit_preferences(&json!(true), &json!(true)));
        assert!(sync.commit_account_recovery(&json!(true), &json!("j***@x.com"), false));

        sync.reset_all();
        assert_eq!(sync.session(), UserSession::default());
        assert_eq!(sync.preferences(), Preferences::default());
        assert_eq!(sync.recovery(), AccountRecovery::default());
    }

    #[test]
    fn recovery_success_marks_up_to_date() {
        let sync = Synchronizer::new(MemoryStore::new());
        assert!(sync.commit_account_recovery(&json!("true"), &json!("j***@x.com"), false));
        assert_eq!(
            sync.recovery(),
            AccountRecovery {
                recovery_email_added: true,
                recovery_email_preview: "j***@x.com".to_string(),
                info_up_to_date: true,
            }
        );
    }

    #[test]
    fn recovery_failure_uses_caller_flag() {
        let sync = Synchronizer::new(MemoryStore::new());
        assert!(!sync.commit_account_recovery(&json!(true), &json!(7), true));
        assert_eq!(
            sync.recovery(),
            AccountRecovery {
                recovery_email_added: false,
                recovery_email_preview: String::new(),
                info_up_to_date: true,
            }
        );

        assert!(!sync.commit_account_recovery(&json!("maybe"), &json!(""), false));
        assert_eq!(sync.recovery(), AccountRecovery::default());
    }
}
