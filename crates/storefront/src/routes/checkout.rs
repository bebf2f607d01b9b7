//! Checkout route handlers.
//!
//! The POST handlers wrap [`crate::checkout::direct_checkout`]: they read
//! the prior cart binding from the session, run the orchestration, and
//! persist the new binding on success. The cookie write lives here, at the
//! boundary, not in the orchestration core.

use axum::{
    Json,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use meridian_core::CartId;

use crate::checkout::{self, CHECKOUT_FAILED_MESSAGE, CheckoutRequest, CheckoutSuccess};
use crate::models::session_keys;
use crate::state::AppState;

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<String> {
    session
        .get::<String>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Set the cart ID in the session.
async fn set_cart_id(
    session: &Session,
    cart_id: &str,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(session_keys::CART_ID, cart_id).await
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Checkout request body.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    pub merchandise_id: String,
    pub variant_title: Option<String>,
}

/// Checkout response body.
///
/// Always HTTP 200; the `success` flag carries the outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub checkout_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckoutResponse {
    fn completed(outcome: CheckoutSuccess) -> Self {
        Self {
            success: true,
            checkout_url: Some(outcome.checkout_url),
            variant_title: Some(outcome.variant_title),
            error: None,
        }
    }

    fn failed() -> Self {
        Self {
            success: false,
            checkout_url: None,
            variant_title: None,
            error: Some(CHECKOUT_FAILED_MESSAGE.to_string()),
        }
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Inventory direct checkout.
///
/// POST /checkout/direct
///
/// Bundles the deposit variant when one is configured or found in the
/// catalog.
#[instrument(skip(state, session))]
pub async fn direct(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Json<CheckoutResponse> {
    run(state, session, form, true).await
}

/// Product-design checkout.
///
/// POST /checkout/design
///
/// Always sends a single line, regardless of catalog contents.
#[instrument(skip(state, session))]
pub async fn design(
    State(state): State<AppState>,
    session: Session,
    Json(form): Json<CheckoutForm>,
) -> Json<CheckoutResponse> {
    run(state, session, form, false).await
}

async fn run(
    state: AppState,
    session: Session,
    form: CheckoutForm,
    bundle_deposit: bool,
) -> Json<CheckoutResponse> {
    let prior = get_cart_id(&session).await.map(CartId::from);

    let request = CheckoutRequest {
        merchandise_id: form.merchandise_id.into(),
        variant_title: form.variant_title,
        bundle_deposit,
    };

    match checkout::direct_checkout(
        state.commerce(),
        &state.config().checkout,
        prior.as_ref(),
        request,
    )
    .await
    {
        Ok(outcome) => {
            // Rebind the session to the fresh cart; a creation without an id
            // leaves the previous binding in place.
            if let Some(cart_id) = &outcome.cart_id
                && let Err(e) = set_cart_id(&session, cart_id.as_str()).await
            {
                tracing::error!("Failed to save cart ID to session: {e}");
            }

            Json(CheckoutResponse::completed(outcome))
        }
        Err(e) => {
            // One failure domain: log the detail, answer the generic message.
            tracing::error!(error = %e, "Checkout orchestration failed");
            Json(CheckoutResponse::failed())
        }
    }
}

/// Redirect to the bound cart's checkout URL.
///
/// GET /checkout
#[instrument(skip(state, session))]
pub async fn redirect(State(state): State<AppState>, session: Session) -> Response {
    let Some(cart_id) = get_cart_id(&session).await.map(CartId::from) else {
        // No cart bound, back to the home page
        return Redirect::to("/").into_response();
    };

    match state.commerce().get_cart(&cart_id).await {
        Ok(cart) => Redirect::to(&cart.checkout_url).into_response(),
        Err(e) => {
            tracing::error!("Failed to get cart for checkout: {e}");
            Redirect::to("/").into_response()
        }
    }
}
