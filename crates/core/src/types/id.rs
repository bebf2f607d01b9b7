//! Newtype IDs for type-safe entity references.
//!
//! Use the `define_id!` macro to create type-safe ID wrappers that prevent
//! accidentally mixing IDs from different entity types. All external systems
//! Meridian talks to (commerce API, content API) issue opaque string
//! identifiers, so the wrappers are string-backed.

/// Macro to define a type-safe ID wrapper around an opaque string.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<String>`, `From<&str>`, and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use meridian_core::define_id;
/// define_id!(CartId);
/// define_id!(MerchandiseId);
///
/// let cart_id = CartId::new("gid://shopify/Cart/abc123");
///
/// // These are different types, so this won't compile:
/// // let _: MerchandiseId = cart_id;
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Get the underlying string value.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID, returning the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_string())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

// Define standard entity IDs
define_id!(CartId);
define_id!(MerchandiseId);
define_id!(ProductId);
define_id!(EventId);
define_id!(DocumentId);

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_id_roundtrip() {
        let id = CartId::new("gid://shopify/Cart/abc123");
        assert_eq!(id.as_str(), "gid://shopify/Cart/abc123");
        assert_eq!(id.to_string(), "gid://shopify/Cart/abc123");
        assert_eq!(id.clone().into_inner(), "gid://shopify/Cart/abc123");
    }

    #[test]
    fn test_id_from_conversions() {
        let a = MerchandiseId::from("gid://shopify/ProductVariant/1");
        let b = MerchandiseId::from(String::from("gid://shopify/ProductVariant/1"));
        assert_eq!(a, b);
    }

    #[test]
    fn test_id_serde_transparent() {
        let id = EventId::new("E1");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"E1\"");

        let back: EventId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_distinct_id_types_are_distinct() {
        // Same underlying string, different types - equality only within a type.
        let cart = CartId::new("x");
        let doc = DocumentId::new("x");
        assert_eq!(cart.as_str(), doc.as_str());
    }
}
