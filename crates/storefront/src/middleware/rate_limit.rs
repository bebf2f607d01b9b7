//! Rate limiting middleware using governor and `tower_governor`.
//!
//! Two budgets cover the exposed POST surfaces:
//! - `form_rate_limiter`: strict, for contact/inquiry intake (~5/min)
//! - `checkout_rate_limiter`: relaxed, for checkout actions (~30/min)

use std::net::IpAddr;
use std::sync::Arc;

use axum::http::Request;
use governor::clock::QuantaInstant;
use governor::middleware::NoOpMiddleware;
use tower_governor::{GovernorError, GovernorLayer, governor::GovernorConfigBuilder};

/// Key extractor that prefers proxy-supplied client IP headers over the
/// socket peer address, since the service runs behind a CDN/proxy chain.
#[derive(Clone, Copy)]
pub struct ProxyIpKeyExtractor;

impl tower_governor::key_extractor::KeyExtractor for ProxyIpKeyExtractor {
    type Key = IpAddr;

    fn extract<T>(&self, req: &Request<T>) -> Result<Self::Key, GovernorError> {
        let headers = req.headers();

        // CDN-provided client IP
        if let Some(ip) = headers
            .get("cf-connecting-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        // First IP in the forwarding chain
        if let Some(ip) = headers
            .get("x-forwarded-for")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.split(',').next())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        if let Some(ip) = headers
            .get("x-real-ip")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.trim().parse::<IpAddr>().ok())
        {
            return Ok(ip);
        }

        Err(GovernorError::UnableToExtractKey)
    }
}

/// Rate limiter layer type for Axum.
pub type RateLimiterLayer =
    GovernorLayer<ProxyIpKeyExtractor, NoOpMiddleware<QuantaInstant>, axum::body::Body>;

/// Create rate limiter for form intake: ~5 requests per minute per IP.
///
/// Configuration: 1 request every 12 seconds (replenish), burst of 3.
/// Form submissions are human-paced; anything faster is scripted.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(12)` and `burst_size(3)`), which are always
/// accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn form_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(12) // Replenish 1 token every 12 seconds (~5/minute)
        .burst_size(3)
        .finish()
        .expect("rate limiter config with per_second(12) and burst_size(3) is valid");
    GovernorLayer::new(Arc::new(config))
}

/// Create rate limiter for checkout actions: ~30 requests per minute per IP.
///
/// Configuration: 1 request every 2 seconds (replenish), burst of 10.
///
/// # Panics
///
/// This function will not panic. The configuration uses only valid positive
/// integers (`per_second(2)` and `burst_size(10)`), which are always
/// accepted by `GovernorConfigBuilder`.
#[must_use]
pub fn checkout_rate_limiter() -> RateLimiterLayer {
    let config = GovernorConfigBuilder::default()
        .key_extractor(ProxyIpKeyExtractor)
        .per_second(2) // Replenish 1 token every 2 seconds (~30/minute)
        .burst_size(10)
        .finish()
        .expect("rate limiter config with per_second(2) and burst_size(10) is valid");
    GovernorLayer::new(Arc::new(config))
}
