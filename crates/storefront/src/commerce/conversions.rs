//! Wire types and conversions for the commerce GraphQL API.
//!
//! The serde structs here mirror the field selections in [`super::queries`];
//! `From` impls turn them into the domain types in [`super::types`].

use serde::Deserialize;

use meridian_core::{CartId, MerchandiseId, ProductId};

use super::types::{Cart, CartLine, CreatedCart, Money, Product, ProductVariant};

// =============================================================================
// Generic connection shapes
// =============================================================================

#[derive(Debug, Deserialize)]
pub(super) struct Connection<T> {
    pub edges: Vec<Edge<T>>,
}

#[derive(Debug, Deserialize)]
pub(super) struct Edge<T> {
    pub node: T,
}

impl<T> Connection<T> {
    pub(super) fn into_nodes(self) -> Vec<T> {
        self.edges.into_iter().map(|e| e.node).collect()
    }
}

// =============================================================================
// Mutation payloads
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireUserError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartCreateData {
    pub cart_create: Option<CartCreatePayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartCreatePayload {
    pub cart: Option<WireCreatedCart>,
    #[serde(default)]
    pub user_errors: Vec<WireUserError>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartLinesAddData {
    pub cart_lines_add: Option<CartMutationPayload>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CartMutationPayload {
    pub cart: Option<WireCart>,
    #[serde(default)]
    pub user_errors: Vec<WireUserError>,
}

#[derive(Debug, Deserialize)]
pub(super) struct GetCartData {
    pub cart: Option<WireCart>,
}

#[derive(Debug, Deserialize)]
pub(super) struct ProductsData {
    pub products: Connection<WireProduct>,
}

// =============================================================================
// Cart wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireCreatedCart {
    pub id: Option<String>,
    pub checkout_url: Option<String>,
}

impl From<WireCreatedCart> for CreatedCart {
    fn from(cart: WireCreatedCart) -> Self {
        Self {
            id: cart.id.map(CartId::from),
            checkout_url: cart.checkout_url,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireCart {
    pub id: String,
    pub checkout_url: String,
    pub total_quantity: i64,
    pub lines: Connection<WireCartLine>,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireCartLine {
    pub id: String,
    pub quantity: i64,
    pub merchandise: WireMerchandise,
}

#[derive(Debug, Deserialize)]
pub(super) struct WireMerchandise {
    pub id: String,
    pub title: String,
}

impl From<WireCart> for Cart {
    fn from(cart: WireCart) -> Self {
        Self {
            id: CartId::from(cart.id),
            checkout_url: cart.checkout_url,
            total_quantity: cart.total_quantity,
            lines: cart
                .lines
                .into_nodes()
                .into_iter()
                .map(CartLine::from)
                .collect(),
        }
    }
}

impl From<WireCartLine> for CartLine {
    fn from(line: WireCartLine) -> Self {
        Self {
            id: line.id,
            quantity: line.quantity,
            merchandise_id: MerchandiseId::from(line.merchandise.id),
            merchandise_title: line.merchandise.title,
        }
    }
}

// =============================================================================
// Product wire types
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireProduct {
    pub id: String,
    pub handle: String,
    pub title: String,
    pub variants: Connection<WireVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireVariant {
    pub id: String,
    pub title: String,
    pub available_for_sale: bool,
    pub price: WireMoney,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WireMoney {
    pub amount: String,
    pub currency_code: String,
}

impl From<WireProduct> for Product {
    fn from(product: WireProduct) -> Self {
        Self {
            id: ProductId::from(product.id),
            handle: product.handle,
            title: product.title,
            variants: product
                .variants
                .into_nodes()
                .into_iter()
                .map(ProductVariant::from)
                .collect(),
        }
    }
}

impl From<WireVariant> for ProductVariant {
    fn from(variant: WireVariant) -> Self {
        Self {
            id: MerchandiseId::from(variant.id),
            title: variant.title,
            available_for_sale: variant.available_for_sale,
            price: Money {
                amount: variant.price.amount,
                currency_code: variant.price.currency_code,
            },
        }
    }
}
