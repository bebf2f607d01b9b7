//! End-to-end tests for the HTTP surface.
//!
//! The full router runs against in-process mock upstreams for the commerce
//! and content APIs, so every test exercises the real handlers, session
//! layer, and clients.

#![allow(clippy::unwrap_used)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};

use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode},
    routing::{get, post},
};
use secrecy::SecretString;
use tower::ServiceExt;

use meridian_storefront::commerce::StorefrontClient;
use meridian_storefront::config::{
    CheckoutConfig, ContentConfig, ShopifyStorefrontConfig, SiteConfig,
};
use meridian_storefront::content::ContentClient;
use meridian_storefront::middleware::create_session_layer;
use meridian_storefront::routes;
use meridian_storefront::state::AppState;

// =============================================================================
// Harness
// =============================================================================

fn test_config() -> SiteConfig {
    SiteConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        shopify: ShopifyStorefrontConfig {
            store: "test.myshopify.com".to_string(),
            api_version: "2026-01".to_string(),
            storefront_private_token: SecretString::from("token"),
        },
        content: ContentConfig {
            project_id: "testproj".to_string(),
            dataset: "production".to_string(),
            api_version: "2025-02-19".to_string(),
            write_token: SecretString::from("token"),
        },
        checkout: CheckoutConfig::default(),
        sentry_dsn: None,
        sentry_environment: None,
    }
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// A commerce upstream that mints sequential carts and echoes added lines.
fn commerce_upstream(cart_seq: Arc<AtomicUsize>) -> Router {
    Router::new().route(
        "/graphql",
        post(move |Json(body): Json<serde_json::Value>| {
            let cart_seq = Arc::clone(&cart_seq);
            async move {
                let query = body["query"].as_str().unwrap_or_default();
                if query.contains("cartCreate") {
                    let n = cart_seq.fetch_add(1, Ordering::SeqCst) + 1;
                    Json(serde_json::json!({
                        "data": {"cartCreate": {
                            "cart": {
                                "id": format!("gid://cart/{n}"),
                                "checkoutUrl": format!("https://pay.example/{n}")
                            },
                            "userErrors": []
                        }}
                    }))
                } else if query.contains("cartLinesAdd") {
                    let cart_id = body["variables"]["cartId"].as_str().unwrap().to_string();
                    let lines = body["variables"]["lines"]
                        .as_array()
                        .cloned()
                        .unwrap_or_default();
                    let edges: Vec<serde_json::Value> = lines
                        .iter()
                        .enumerate()
                        .map(|(i, l)| {
                            serde_json::json!({"node": {
                                "id": format!("line-{i}"),
                                "quantity": l["quantity"].clone(),
                                "merchandise": {
                                    "id": l["merchandiseId"].clone(),
                                    "title": "Default"
                                }
                            }})
                        })
                        .collect();
                    Json(serde_json::json!({
                        "data": {"cartLinesAdd": {
                            "cart": {
                                "id": cart_id,
                                "checkoutUrl": "https://pay.example/checkout",
                                "totalQuantity": edges.len(),
                                "lines": {"edges": edges}
                            },
                            "userErrors": []
                        }}
                    }))
                } else {
                    Json(serde_json::json!({"data": {"products": {"edges": []}}}))
                }
            }
        }),
    )
}

/// A commerce upstream where every call fails.
fn broken_commerce_upstream() -> Router {
    Router::new().route(
        "/graphql",
        post(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream down") }),
    )
}

/// A content upstream that records created documents and serves a fixed
/// registration list.
fn content_upstream(
    created: Arc<Mutex<Vec<serde_json::Value>>>,
    registrations: serde_json::Value,
) -> Router {
    Router::new()
        .route(
            "/data/mutate/{dataset}",
            post(move |Json(body): Json<serde_json::Value>| {
                let created = Arc::clone(&created);
                async move {
                    created.lock().unwrap().push(body);
                    Json(serde_json::json!({
                        "transactionId": "tx1",
                        "results": [{"id": "doc-1", "operation": "create"}]
                    }))
                }
            }),
        )
        .route(
            "/data/query/{dataset}",
            get(move || {
                let registrations = registrations.clone();
                async move { Json(serde_json::json!({"result": registrations})) }
            }),
        )
}

struct TestApp {
    app: Router,
    created_docs: Arc<Mutex<Vec<serde_json::Value>>>,
}

async fn build_app(commerce: Router, registrations: serde_json::Value) -> TestApp {
    let created_docs = Arc::new(Mutex::new(Vec::new()));

    let commerce_base = spawn(commerce).await;
    let content_base = spawn(content_upstream(Arc::clone(&created_docs), registrations)).await;

    let config = test_config();
    let commerce_client =
        StorefrontClient::with_endpoint(format!("{commerce_base}/graphql"), "token");
    let content_client =
        ContentClient::with_endpoint(format!("{content_base}/data"), "production", "token")
            .unwrap();

    let state = AppState::with_clients(config.clone(), commerce_client, content_client);

    let app = Router::new()
        .merge(routes::routes())
        .layer(create_session_layer(&config))
        .with_state(state);

    TestApp { app, created_docs }
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header("x-forwarded-for", "203.0.113.9")
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

// =============================================================================
// Checkout
// =============================================================================

#[tokio::test]
async fn direct_checkout_returns_checkout_url() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness
        .app
        .oneshot(post_json(
            "/checkout/direct",
            serde_json::json!({
                "merchandiseId": "gid://variant/123",
                "variantTitle": "Long Range"
            }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let has_cookie = response.headers().contains_key("set-cookie");
    let body = body_json(response).await;

    assert_eq!(body["success"], true);
    assert_eq!(body["checkoutUrl"], "https://pay.example/checkout");
    assert_eq!(body["variantTitle"], "Long Range");
    // The fresh cart binding was written into the session
    assert!(has_cookie);
}

#[tokio::test]
async fn direct_checkout_defaults_variant_title() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness
        .app
        .oneshot(post_json(
            "/checkout/direct",
            serde_json::json!({"merchandiseId": "gid://variant/123"}),
        ))
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["variantTitle"], "Default");
}

#[tokio::test]
async fn failed_checkout_answers_generic_error() {
    let harness = build_app(broken_commerce_upstream(), serde_json::json!([])).await;

    let response = harness
        .app
        .oneshot(post_json(
            "/checkout/design",
            serde_json::json!({"merchandiseId": "gid://variant/123"}),
        ))
        .await
        .unwrap();

    // Server-action semantics: HTTP 200, failure carried in the body
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(
        body["error"],
        "Failed to create checkout. Please try again."
    );
    assert!(body.get("checkoutUrl").is_none());
}

#[tokio::test]
async fn checkout_redirect_without_binding_goes_home() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness.app.oneshot(get_request("/checkout")).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/");
}

// =============================================================================
// Form intake
// =============================================================================

#[tokio::test]
async fn contact_with_empty_body_defaults_every_field() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness
        .app
        .oneshot(post_json("/api/contact", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["submissionId"], "doc-1");

    let created = harness.created_docs.lock().unwrap();
    let doc = &created[0]["mutations"][0]["create"];
    assert_eq!(doc["_type"], "contactSubmission");
    assert_eq!(doc["status"], "new");
    assert_eq!(doc["firstName"], "");
    assert_eq!(doc["message"], "");
    assert!(doc["submittedAt"].is_string());
}

#[tokio::test]
async fn inquiry_with_partial_body_defaults_the_rest() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness
        .app
        .oneshot(post_json(
            "/api/inquiry",
            serde_json::json!({"model": "S9", "contactPreferences": ["email"]}),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["success"], true);

    let created = harness.created_docs.lock().unwrap();
    let doc = &created[0]["mutations"][0]["create"];
    assert_eq!(doc["_type"], "vehicleInquiry");
    assert_eq!(doc["model"], "S9");
    assert_eq!(doc["country"], "");
    assert_eq!(doc["contactPreferences"], serde_json::json!(["email"]));
    assert_eq!(doc["status"], "new");
}

#[tokio::test]
async fn contact_surfaces_content_failures_as_500() {
    let content = Router::new().route(
        "/data/mutate/{dataset}",
        post(|| async { (StatusCode::FORBIDDEN, "insufficient permissions") }),
    );

    let commerce_base = spawn(commerce_upstream(Arc::new(AtomicUsize::new(0)))).await;
    let content_base = spawn(content).await;

    let config = test_config();
    let state = AppState::with_clients(
        config.clone(),
        StorefrontClient::with_endpoint(format!("{commerce_base}/graphql"), "token"),
        ContentClient::with_endpoint(format!("{content_base}/data"), "production", "token")
            .unwrap(),
    );
    let app = Router::new()
        .merge(routes::routes())
        .layer(create_session_layer(&config))
        .with_state(state);

    let response = app
        .oneshot(post_json("/api/contact", serde_json::json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "Failed to submit contact form.");
    assert!(body["details"].as_str().unwrap().contains("403"));
}

// =============================================================================
// Registration count
// =============================================================================

#[tokio::test]
async fn registration_count_excludes_cancelled() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([
            {"_id": "r1", "status": "confirmed"},
            {"_id": "r2", "status": "pending"},
            {"_id": "r3"},
            {"_id": "r4", "status": "cancelled"},
            {"_id": "r5", "status": "cancelled"}
        ]),
    )
    .await;

    let response = harness
        .app
        .oneshot(get_request("/api/registrations/count?eventId=E1"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["count"], 3);
}

#[tokio::test]
async fn registration_count_requires_event_id() {
    let harness = build_app(
        commerce_upstream(Arc::new(AtomicUsize::new(0))),
        serde_json::json!([]),
    )
    .await;

    let response = harness
        .app
        .oneshot(get_request("/api/registrations/count"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["success"], false);
    assert!(
        body["error"]
            .as_str()
            .unwrap()
            .contains("eventId query parameter is required")
    );
}
