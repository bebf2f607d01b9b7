//! Session-related types.

/// Session keys for visitor state.
pub mod keys {
    /// Key for storing the current cart id.
    ///
    /// Overwritten on every successful cart creation; last write wins.
    pub const CART_ID: &str = "cart_id";
}
