use std::sync::Mutex;

use crate::session::Session;
use crate::store::SessionStore;

/// In-memory session store. The default for tests and for embedding the
/// client in a host application that manages its own persistence.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: Mutex<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Construct a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        Self {
            inner: Mutex::new(Some(session)),
        }
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Option<Session> {
        self.inner
            .lock()
            .expect("failed to acquire session lock")
            .clone()
    }

    fn store(&self, session: &Session) {
        *self.inner.lock().expect("failed to acquire session lock") = Some(session.clone());
    }

    fn set_access_token(&self, token: &str) {
        if let Some(session) = self
            .inner
            .lock()
            .expect("failed to acquire session lock")
            .as_mut()
        {
            session.access_token = token.to_owned();
        }
    }

    fn clear(&self) {
        *self.inner.lock().expect("failed to acquire session lock") = None;
    }
}
