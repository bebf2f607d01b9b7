//! GraphQL documents for the commerce Storefront API.
//!
//! Documents are hand-written and paired with the wire types in
//! [`super::conversions`]. Field selections stay minimal: only what the
//! domain types in [`super::types`] carry.

/// Create an empty cart.
pub const CREATE_CART: &str = r"
mutation CreateCart {
  cartCreate {
    cart {
      id
      checkoutUrl
    }
    userErrors {
      field
      message
    }
  }
}
";

/// Add lines to an existing cart.
pub const ADD_TO_CART: &str = r"
mutation AddToCart($cartId: ID!, $lines: [CartLineInput!]!) {
  cartLinesAdd(cartId: $cartId, lines: $lines) {
    cart {
      id
      checkoutUrl
      totalQuantity
      lines(first: 50) {
        edges {
          node {
            id
            quantity
            merchandise {
              ... on ProductVariant {
                id
                title
              }
            }
          }
        }
      }
    }
    userErrors {
      field
      message
    }
  }
}
";

/// Fetch an existing cart by id.
pub const GET_CART: &str = r"
query GetCart($cartId: ID!) {
  cart(id: $cartId) {
    id
    checkoutUrl
    totalQuantity
    lines(first: 50) {
      edges {
        node {
          id
          quantity
          merchandise {
            ... on ProductVariant {
              id
              title
            }
          }
        }
      }
    }
  }
}
";

/// Fetch a page of products with their variants.
pub const GET_PRODUCTS: &str = r"
query GetProducts($first: Int!) {
  products(first: $first) {
    edges {
      node {
        id
        handle
        title
        variants(first: 10) {
          edges {
            node {
              id
              title
              availableForSale
              price {
                amount
                currencyCode
              }
            }
          }
        }
      }
    }
  }
}
";
