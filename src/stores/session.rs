use std::rc::Rc;

use crate::models::{Session, SessionPatch};
use crate::persist::StorageBackend;
use crate::store::Store;

const KEY: &str = "crewboard.session";

/// Current sign-in state: at most one user per browser-profile-equivalent.
/// Every other store references the session via plain user-id strings.
pub struct SessionStore {
    inner: Store<Option<Session>>,
}

impl SessionStore {
    pub fn new(backend: Rc<dyn StorageBackend>) -> Self {
        Self {
            inner: Store::new(backend, KEY, None),
        }
    }

    pub fn sign_in(&self, session: Session) {
        self.inner.update(|state| *state = Some(session));
    }

    /// Clears the session back to signed-out. Other stores keep their data;
    /// their records simply reference a user that is gone.
    pub fn sign_out(&self) {
        self.inner.update(|state| *state = None);
    }

    /// Shallow-merge of settings-screen fields into the current session.
    /// No-op when signed out.
    pub fn update(&self, patch: SessionPatch) {
        self.inner.update(|state| {
            if let Some(session) = state.as_mut() {
                if let Some(v) = patch.username {
                    session.username = v;
                }
                if let Some(v) = patch.subscription {
                    session.subscription = v;
                }
                if let Some(v) = patch.notifications_enabled {
                    session.notifications_enabled = v;
                }
                if let Some(v) = patch.profile_visible {
                    session.profile_visible = v;
                }
            }
        });
    }

    pub fn current(&self) -> Option<Session> {
        self.inner.snapshot()
    }

    pub fn store(&self) -> &Store<Option<Session>> {
        &self.inner
    }
}
