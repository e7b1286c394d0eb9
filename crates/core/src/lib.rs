//! Fitdesk core session types and storage
//!
//! This crate holds everything the HTTP client needs to know about a user
//! session without touching the network: the session model, the storage seam
//! it is read from and written to, and the events raised when a session
//! becomes unusable.

pub mod error;
pub mod events;
pub mod session;
pub mod store;

pub use error::StoreError;
pub use events::{SessionEvent, SessionEvents};
pub use session::{LoginView, Session, UserRole};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
