//! Session lifecycle events
//!
//! The HTTP client never navigates. When a session becomes unusable it emits
//! an event here; an application shell subscribes and decides what to do
//! (typically: route to the matching login view, unless already on one).

use std::sync::Mutex;

use crate::session::LoginView;

/// Raised when the session store has been cleared and the user must sign in
/// again. Carries the login view derived from the role that was stored at
/// the time of failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionEvent {
    /// The session could not be renewed.
    Expired { login: LoginView },
    /// The backend signaled that the account no longer exists.
    AccountDeleted { login: LoginView },
}

impl SessionEvent {
    pub const fn login(self) -> LoginView {
        match self {
            Self::Expired { login } | Self::AccountDeleted { login } => login,
        }
    }
}

type Handler = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// Subscriber registry for [`SessionEvent`]s.
///
/// Emitting with no subscribers is a no-op, so headless callers (scripts,
/// tests) can use the client without wiring a shell.
#[derive(Default)]
pub struct SessionEvents {
    handlers: Mutex<Vec<Handler>>,
}

impl SessionEvents {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self, handler: impl Fn(&SessionEvent) + Send + Sync + 'static) {
        self.handlers
            .lock()
            .expect("failed to acquire session event lock")
            .push(Box::new(handler));
    }

    pub fn emit(&self, event: &SessionEvent) {
        let handlers = self
            .handlers
            .lock()
            .expect("failed to acquire session event lock");
        for handler in handlers.iter() {
            handler(event);
        }
    }
}

impl std::fmt::Debug for SessionEvents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.handlers.lock().map(|h| h.len()).unwrap_or(0);
        f.debug_struct("SessionEvents")
            .field("handlers", &count)
            .finish()
    }
}
