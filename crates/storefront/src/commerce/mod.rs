//! Commerce API client.
//!
//! # Architecture
//!
//! - Hand-written GraphQL documents with typed serde responses
//! - The commerce platform is source of truth - no local sync, direct API calls
//! - In-memory caching via `moka` for product listings (5 minute TTL)
//!
//! Cart state is never cached: every checkout mints a fresh cart and the
//! cart's contents live entirely in the commerce platform.
//!
//! # Example
//!
//! ```rust,ignore
//! use meridian_storefront::commerce::StorefrontClient;
//!
//! let client = StorefrontClient::new(&config.shopify);
//!
//! // Mint a cart and add a variant
//! let created = client.create_cart().await?;
//! let cart_id = created.id.expect("commerce returned a cart id");
//! let cart = client.add_to_cart(&cart_id, vec![CartLineInput {
//!     merchandise_id: variant_id,
//!     quantity: 1,
//! }]).await?;
//! ```

mod client;
mod conversions;
mod queries;
pub mod types;

pub use client::StorefrontClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when interacting with the commerce API.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the commerce API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from a mutation (e.g., invalid merchandise id).
    #[error("User error: {0}")]
    UserError(String),
}

/// A GraphQL error returned by the commerce API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}
