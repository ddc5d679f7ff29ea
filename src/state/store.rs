//! Shared state store. The [`StateStore`] trait is the seam the synchronizer
//! writes through; [`MemoryStore`] is the in-process implementation, built on
//! `watch` channels so readers can subscribe to committed slices.

use super::types::{AccountRecovery, Preferences, UserSession};
use std::sync::Arc;
use tokio::sync::watch;

/// Read and wholesale-replace access to each slice. Implementations must make
/// every `replace_*` call a single atomic swap of the whole slice.
pub trait StateStore {
    fn session(&self) -> UserSession;
    fn replace_session(&self, session: UserSession);

    fn preferences(&self) -> Preferences;
    fn replace_preferences(&self, preferences: Preferences);

    fn recovery(&self) -> AccountRecovery;
    fn replace_recovery(&self, recovery: AccountRecovery);
}

impl<T: StateStore + ?Sized> StateStore for Arc<T> {
    fn session(&self) -> UserSession {
        (**self).session()
    }

    fn replace_session(&self, session: UserSession) {
        (**self).replace_session(session);
    }

    fn preferences(&self) -> Preferences {
        (**self).preferences()
    }

    fn replace_preferences(&self, preferences: Preferences) {
        (**self).replace_preferences(preferences);
    }

    fn recovery(&self) -> AccountRecovery {
        (**self).recovery()
    }

    fn replace_recovery(&self, recovery: AccountRecovery) {
        (**self).replace_recovery(recovery);
    }
}

struct Slices {
    session: watch::Sender<UserSession>,
    preferences: watch::Sender<Preferences>,
    recovery: watch::Sender<AccountRecovery>,
}

/// In-memory store. Cloning shares the same slices.
#[derive(Clone)]
pub struct MemoryStore {
    slices: Arc<Slices>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self {
            slices: Arc::new(Slices {
                session: watch::Sender::new(UserSession::default()),
                preferences: watch::Sender::new(Preferences::default()),
                recovery: watch::Sender::new(AccountRecovery::default()),
            }),
        }
    }

    #[must_use]
    pub fn subscribe_session(&self) -> watch::Receiver<UserSession> {
        self.slices.session.subscribe()
    }

    #[must_use]
    pub fn subscribe_preferences(&self) -> watch::Receiver<Preferences> {
        self.slices.preferences.subscribe()
    }

    #[must_use]
    pub fn subscribe_recovery(&self) -> watch::Receiver<AccountRecovery> {
        self.slices.recovery.subscribe()
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl StateStore for MemoryStore {
    fn session(&self) -> UserSession {
        self.slices.session.borrow().clone()
    }

    fn replace_session(&self, session: UserSession) {
        self.slices.session.send_replace(session);
    }

    fn preferences(&self) -> Preferences {
        self.slices.preferences.borrow().clone()
    }

    fn replace_preferences(&self, preferences: Preferences) {
        self.slices.preferences.send_replace(preferences);
    }

    fn recovery(&self) -> AccountRecovery {
        self.slices.recovery.borrow().clone()
    }

    fn replace_recovery(&self, recovery: AccountRecovery) {
        self.slices.recovery.send_replace(recovery);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::types::AccessLevel;

    #[test]
    fn starts_with_defaults() {
        let store = MemoryStore::new();
        assert_eq!(store.session(), UserSession::default());
        assert_eq!(store.preferences(), Preferences::default());
        assert_eq!(store.recovery(), AccountRecovery::default());
    }

    #[test]
    fn clones_share_slices() {
        let store = MemoryStore::new();
        let reader = store.clone();
        store.replace_preferences(Preferences {
            mailing_list: true,
            night_mode: false,
        });
        assert!(reader.preferences().mailing_list);
    }

    #[tokio::test]
    async fn subscribers_observe_replacements() -> Result<(), watch::error::RecvError> {
        let store = MemoryStore::new();
        let mut receiver = store.subscribe_session();

        store.replace_session(UserSession {
            logged_in: true,
            access: AccessLevel::Admin,
            email: "jo@x.com".to_string(),
            name: "Jo".to_string(),
            acct_verified: true,
            mfa_enabled: false,
        });

        receiver.changed().await?;
        assert_eq!(receiver.borrow().access, AccessLevel::Admin);
        Ok(())
    }
}
