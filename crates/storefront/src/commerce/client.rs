//! Commerce Storefront API client implementation.
//!
//! Sends hand-written GraphQL documents with `reqwest` and parses typed
//! responses. Product listings are cached with `moka` (5-minute TTL); cart
//! operations always hit the API.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::{debug, instrument};

use meridian_core::CartId;

use crate::config::ShopifyStorefrontConfig;

use super::conversions::{CartCreateData, CartLinesAddData, GetCartData, ProductsData};
use super::queries;
use super::types::{Cart, CartLineInput, CreatedCart, Product};
use super::{CommerceError, GraphQLError};

/// Product listing cache TTL.
const PRODUCT_CACHE_TTL: Duration = Duration::from_secs(300);

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the commerce Storefront API.
///
/// Provides typed access to product listings and cart operations.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    access_token: String,
    product_cache: Cache<String, Vec<Product>>,
}

#[derive(Debug, Serialize)]
struct GraphQLRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQLResponse<T> {
    data: Option<T>,
    errors: Option<Vec<WireGraphQLError>>,
}

#[derive(Debug, Deserialize)]
struct WireGraphQLError {
    message: String,
    path: Option<Vec<serde_json::Value>>,
}

impl StorefrontClient {
    /// Create a new Storefront API client.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        let endpoint = format!(
            "https://{}/api/{}/graphql.json",
            config.store, config.api_version
        );
        Self::with_endpoint(endpoint, config.storefront_private_token.expose_secret())
    }

    /// Create a client against an explicit GraphQL endpoint.
    ///
    /// Useful for proxies and mock environments.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, access_token: impl Into<String>) -> Self {
        let product_cache = Cache::builder()
            .max_capacity(100)
            .time_to_live(PRODUCT_CACHE_TTL)
            .build();

        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                access_token: access_token.into(),
                product_cache,
            }),
        }
    }

    /// Execute a GraphQL document.
    async fn execute<T: DeserializeOwned>(
        &self,
        query: &'static str,
        variables: serde_json::Value,
    ) -> Result<T, CommerceError> {
        let request_body = GraphQLRequest { query, variables };

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            // Private access tokens use a different header than public tokens
            .header(
                "Shopify-Storefront-Private-Token",
                &self.inner.access_token,
            )
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(CommerceError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce API returned non-success status"
            );
            return Err(CommerceError::GraphQL(vec![GraphQLError {
                message: format!(
                    "HTTP {status}: {}",
                    response_text.chars().take(200).collect::<String>()
                ),
                path: vec![],
            }]));
        }

        let response: GraphQLResponse<T> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %response_text.chars().take(500).collect::<String>(),
                    "Failed to parse commerce GraphQL response"
                );
                return Err(CommerceError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");

            return Err(CommerceError::GraphQL(
                errors
                    .into_iter()
                    .map(|e| GraphQLError {
                        message: e.message,
                        path: e.path.unwrap_or_default(),
                    })
                    .collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %response_text.chars().take(500).collect::<String>(),
                "Commerce GraphQL response has no data and no errors"
            );
            CommerceError::GraphQL(vec![GraphQLError {
                message: "No data in response".to_string(),
                path: vec![],
            }])
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first `first` products with their variants.
    ///
    /// Listings are cached for 5 minutes per page size.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn get_products(&self, first: i64) -> Result<Vec<Product>, CommerceError> {
        let cache_key = format!("products:{first}");

        if let Some(products) = self.inner.product_cache.get(&cache_key).await {
            debug!("Cache hit for products");
            return Ok(products);
        }

        let data: ProductsData = self
            .execute(queries::GET_PRODUCTS, serde_json::json!({ "first": first }))
            .await?;

        let products: Vec<Product> = data
            .products
            .into_nodes()
            .into_iter()
            .map(Product::from)
            .collect();

        self.inner
            .product_cache
            .insert(cache_key, products.clone())
            .await;

        Ok(products)
    }

    // =========================================================================
    // Cart Methods (not cached - mutable state)
    // =========================================================================

    /// Create a new, empty cart.
    ///
    /// The returned acknowledgement may lack an id; callers treat that as
    /// non-fatal.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or user errors are returned.
    #[instrument(skip(self))]
    pub async fn create_cart(&self) -> Result<CreatedCart, CommerceError> {
        let data: CartCreateData = self
            .execute(queries::CREATE_CART, serde_json::json!({}))
            .await?;

        let Some(payload) = data.cart_create else {
            return Err(CommerceError::GraphQL(vec![GraphQLError {
                message: "Failed to create cart".to_string(),
                path: vec![],
            }]));
        };

        if !payload.user_errors.is_empty() {
            return Err(CommerceError::UserError(
                payload
                    .user_errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        Ok(payload.cart.map(CreatedCart::from).unwrap_or(CreatedCart {
            id: None,
            checkout_url: None,
        }))
    }

    /// Get an existing cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart is not found or the API request fails.
    #[instrument(skip(self), fields(cart_id = %cart_id))]
    pub async fn get_cart(&self, cart_id: &CartId) -> Result<Cart, CommerceError> {
        let data: GetCartData = self
            .execute(
                queries::GET_CART,
                serde_json::json!({ "cartId": cart_id.as_str() }),
            )
            .await?;

        data.cart
            .map(Cart::from)
            .ok_or_else(|| CommerceError::NotFound(format!("Cart not found: {cart_id}")))
    }

    /// Add lines to a cart in one call.
    ///
    /// # Errors
    ///
    /// Returns an error if the cart update fails or user errors are returned.
    #[instrument(skip(self, lines), fields(cart_id = %cart_id))]
    pub async fn add_to_cart(
        &self,
        cart_id: &CartId,
        lines: Vec<CartLineInput>,
    ) -> Result<Cart, CommerceError> {
        let lines: Vec<serde_json::Value> = lines
            .into_iter()
            .map(|line| {
                serde_json::json!({
                    "merchandiseId": line.merchandise_id.as_str(),
                    "quantity": line.quantity,
                })
            })
            .collect();

        let data: CartLinesAddData = self
            .execute(
                queries::ADD_TO_CART,
                serde_json::json!({ "cartId": cart_id.as_str(), "lines": lines }),
            )
            .await?;

        let Some(payload) = data.cart_lines_add else {
            return Err(CommerceError::GraphQL(vec![GraphQLError {
                message: "Failed to add to cart".to_string(),
                path: vec![],
            }]));
        };

        if !payload.user_errors.is_empty() {
            return Err(CommerceError::UserError(
                payload
                    .user_errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; "),
            ));
        }

        payload.cart.map(Cart::from).ok_or_else(|| {
            CommerceError::GraphQL(vec![GraphQLError {
                message: "Failed to add to cart".to_string(),
                path: vec![],
            }])
        })
    }
}
