//! Content API client.
//!
//! Thin write/read adapter over the headless CMS data API:
//! form submissions become immutable documents through the mutation
//! endpoint, and event registrations are read through the query endpoint.
//! No update or delete path exists from this service.

mod client;
pub mod types;

pub use client::ContentClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the content API.
#[derive(Debug, Error)]
pub enum ContentError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Failed to parse response.
    #[error("Parse error: {0}")]
    Parse(String),
}
