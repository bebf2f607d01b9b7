//! Domain types for the commerce API.
//!
//! These types provide a clean, ergonomic API separate from the raw wire
//! shapes returned by the GraphQL endpoint.

use meridian_core::{CartId, MerchandiseId, ProductId};
use serde::{Deserialize, Serialize};

// =============================================================================
// Money Types
// =============================================================================

/// Monetary amount with currency code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Decimal amount as string (preserves precision).
    pub amount: String,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// A product variant (specific trim/configuration).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant ID, usable as a cart line merchandise id.
    pub id: MerchandiseId,
    /// Variant title (e.g., "Long Range").
    pub title: String,
    /// Whether this variant is available for sale.
    pub available_for_sale: bool,
    /// Current price.
    pub price: Money,
}

/// A product in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// URL handle.
    pub handle: String,
    /// Product title.
    pub title: String,
    /// Variants in display order.
    pub variants: Vec<ProductVariant>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// One purchasable unit in a cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Line ID within the cart.
    pub id: String,
    /// Quantity of the merchandise.
    pub quantity: i64,
    /// The variant this line refers to.
    pub merchandise_id: MerchandiseId,
    /// Variant title for display.
    pub merchandise_title: String,
}

/// A cart in the commerce platform.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    /// Cart ID.
    pub id: CartId,
    /// URL the buyer completes payment at.
    pub checkout_url: String,
    /// Total quantity across all lines.
    pub total_quantity: i64,
    /// Line items in insertion order.
    pub lines: Vec<CartLine>,
}

/// Acknowledgement of a cart creation.
///
/// The creation mutation can acknowledge without an id; callers treat a
/// missing id as non-fatal and keep whatever cart binding they already hold.
#[derive(Debug, Clone)]
pub struct CreatedCart {
    /// Cart ID, when the platform issued one.
    pub id: Option<CartId>,
    /// Checkout URL, when present on the fresh cart.
    pub checkout_url: Option<String>,
}

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineInput {
    /// The variant to add.
    pub merchandise_id: MerchandiseId,
    /// Quantity, a positive integer.
    pub quantity: i64,
}
