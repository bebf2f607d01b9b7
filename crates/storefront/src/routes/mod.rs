//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check (registered in main)
//!
//! # Checkout
//! POST /checkout/direct           - Inventory direct checkout (deposit bundling)
//! POST /checkout/design           - Product-design checkout (single line)
//! GET  /checkout                  - Redirect to the bound cart's checkout URL
//!
//! # Form intake
//! POST /api/contact               - Contact submission
//! POST /api/inquiry               - Vehicle inquiry submission
//!
//! # Events
//! GET  /api/registrations/count   - Non-cancelled registration count
//! ```

pub mod checkout;
pub mod events;
pub mod forms;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{checkout_rate_limiter, form_rate_limiter};
use crate::state::AppState;

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::redirect))
        .route("/direct", post(checkout::direct))
        .route("/design", post(checkout::design))
        .layer(checkout_rate_limiter())
}

/// Create the API routes router (form intake and event reads).
pub fn api_routes() -> Router<AppState> {
    let intake = Router::new()
        .route("/contact", post(forms::contact))
        .route("/inquiry", post(forms::inquiry))
        .layer(form_rate_limiter());

    Router::new()
        .merge(intake)
        .route("/registrations/count", get(events::registration_count))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/checkout", checkout_routes())
        .nest("/api", api_routes())
}
