//! Direct checkout orchestration.
//!
//! A direct checkout mints a fresh cart, adds the chosen variant (plus, for
//! inventory checkouts, a deposit variant) in a single call, and hands back
//! the checkout URL. The cart bound to the session is never reused; the new
//! binding is returned to the HTTP boundary, which owns the cookie write.

use meridian_core::{CartId, MerchandiseId};
use tracing::instrument;

use crate::commerce::{CartLineInput, CommerceError, Product, StorefrontClient};
use crate::config::CheckoutConfig;

/// User-safe message for any failed checkout attempt.
pub const CHECKOUT_FAILED_MESSAGE: &str = "Failed to create checkout. Please try again.";

/// Variant title reported when the caller supplies none.
const DEFAULT_VARIANT_TITLE: &str = "Default";

/// Title substring identifying the deposit product in the catalog.
const DEPOSIT_TITLE_KEYWORD: &str = "due today";

/// How many products the deposit scan considers.
const CATALOG_SCAN_LIMIT: i64 = 100;

/// A checkout request for one chosen variant.
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    /// The variant being purchased.
    pub merchandise_id: MerchandiseId,
    /// Human-readable variant label, echoed back on success.
    pub variant_title: Option<String>,
    /// Whether to append the deposit variant (inventory checkouts only).
    pub bundle_deposit: bool,
}

/// Result of a successful checkout orchestration.
#[derive(Debug, Clone)]
pub struct CheckoutSuccess {
    /// Id of the freshly minted cart, for the boundary to bind to the
    /// session. `None` when the platform acknowledged without an id; the
    /// existing binding is then left as-is.
    pub cart_id: Option<CartId>,
    /// URL the buyer completes payment at.
    pub checkout_url: String,
    /// Echo of the requested variant title.
    pub variant_title: String,
}

/// Run a direct checkout.
///
/// Steps are strictly ordered: mint cart, resolve lines, add lines in one
/// call. Any failure along the way is one failure domain for the caller;
/// a cart created before the failure is simply abandoned.
///
/// # Errors
///
/// Returns the first commerce error encountered at any step.
#[instrument(
    skip(commerce, config, prior_cart_id),
    fields(merchandise_id = %request.merchandise_id)
)]
pub async fn direct_checkout(
    commerce: &StorefrontClient,
    config: &CheckoutConfig,
    prior_cart_id: Option<&CartId>,
    request: CheckoutRequest,
) -> Result<CheckoutSuccess, CommerceError> {
    // Always mint a fresh cart: a direct checkout must never mix with an
    // in-progress shopping cart.
    let created = commerce.create_cart().await?;

    // A creation acknowledged without an id is non-fatal: the add targets
    // the previously bound cart instead.
    let target = created
        .id
        .clone()
        .or_else(|| prior_cart_id.cloned())
        .ok_or_else(|| {
            CommerceError::NotFound("cart creation returned no id and no cart is bound".to_string())
        })?;

    let mut lines = vec![CartLineInput {
        merchandise_id: request.merchandise_id,
        quantity: 1,
    }];

    if request.bundle_deposit
        && let Some(deposit) = resolve_deposit_variant(commerce, config).await?
    {
        lines.push(CartLineInput {
            merchandise_id: deposit,
            quantity: 1,
        });
    }

    let cart = commerce.add_to_cart(&target, lines).await?;

    Ok(CheckoutSuccess {
        cart_id: created.id,
        checkout_url: cart.checkout_url,
        variant_title: request
            .variant_title
            .unwrap_or_else(|| DEFAULT_VARIANT_TITLE.to_string()),
    })
}

/// Resolve the deposit variant to bundle with an inventory checkout.
///
/// A configured variant id wins; otherwise the catalog is scanned for the
/// deposit product by title.
async fn resolve_deposit_variant(
    commerce: &StorefrontClient,
    config: &CheckoutConfig,
) -> Result<Option<MerchandiseId>, CommerceError> {
    if let Some(id) = &config.deposit_variant_id {
        return Ok(Some(id.clone()));
    }

    let products = commerce.get_products(CATALOG_SCAN_LIMIT).await?;
    Ok(find_deposit_variant(&products))
}

/// Find the deposit variant in a product listing.
///
/// Takes the first variant of the first product whose title contains the
/// deposit keyword, case-insensitively. A matching product without variants
/// yields nothing; later matches are not considered.
fn find_deposit_variant(products: &[Product]) -> Option<MerchandiseId> {
    products
        .iter()
        .find(|p| p.title.to_lowercase().contains(DEPOSIT_TITLE_KEYWORD))
        .and_then(|p| p.variants.first())
        .map(|v| v.id.clone())
}
