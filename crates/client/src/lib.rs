//! Fitdesk HTTP client
//!
//! Authenticated client for the Fitdesk gym-management REST API. Every
//! request carries the stored access token; a 401 is recovered once per
//! request by exchanging the refresh token for a new access token and
//! re-issuing the request. Session-fatal failures clear the session store
//! and raise a [`fitdesk_core::SessionEvent`] for the application shell to
//! act on; the client itself never navigates.

#[macro_use]
extern crate tracing;

pub mod api;
pub mod auth;
pub mod client;
pub mod config;
pub mod error;

pub use client::{ApiClient, ApiClientBuilder};
pub use config::ClientConfig;
pub use error::ApiError;
