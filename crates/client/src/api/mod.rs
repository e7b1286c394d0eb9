//! Domain endpoint wrappers
//!
//! The backend owns these schemas; payloads stay opaque [`serde_json::Value`]
//! on this side. Each module adds the methods for one resource area onto
//! [`crate::ApiClient`], all funneled through the authenticated request path.

pub mod attendance;
pub mod community;
pub mod members;
pub mod notifications;
pub mod products;
pub mod support;
pub mod trainers;
pub mod trainings;
