//! Content API client implementation.

use reqwest::header::{HeaderMap, HeaderValue};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use meridian_core::{DocumentId, EventId};

use crate::config::ContentConfig;

use super::ContentError;
use super::types::Registration;

/// GROQ projection for registrations referencing an event.
const REGISTRATIONS_QUERY: &str =
    r#"*[_type == "eventRegistration" && references($eventId)]{_id, status}"#;

/// Client for the headless CMS data API.
///
/// Documents are created through the mutation endpoint and read through the
/// query endpoint; this service never updates or deletes documents.
#[derive(Clone)]
pub struct ContentClient {
    client: reqwest::Client,
    base_url: String,
    dataset: String,
}

impl ContentClient {
    /// Create a new content API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ContentConfig) -> Result<Self, ContentError> {
        let base_url = format!(
            "https://{}.api.sanity.io/v{}/data",
            config.project_id, config.api_version
        );
        Self::with_endpoint(base_url, &config.dataset, config.write_token.expose_secret())
    }

    /// Create a client against an explicit data API base URL.
    ///
    /// Useful for proxies and mock environments.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_endpoint(
        base_url: impl Into<String>,
        dataset: impl Into<String>,
        write_token: &str,
    ) -> Result<Self, ContentError> {
        let mut headers = HeaderMap::new();

        let auth_value = format!("Bearer {write_token}");
        headers.insert(
            "Authorization",
            HeaderValue::from_str(&auth_value)
                .map_err(|e| ContentError::Parse(format!("Invalid API token format: {e}")))?,
        );
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            dataset: dataset.into(),
        })
    }

    /// Create one immutable document, returning the generated id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or acknowledges nothing.
    #[instrument(skip(self, document))]
    pub async fn create_document<T: Serialize + Sync>(
        &self,
        document: &T,
    ) -> Result<DocumentId, ContentError> {
        let url = format!(
            "{}/mutate/{}?returnIds=true",
            self.base_url, self.dataset
        );

        let body = serde_json::json!({
            "mutations": [{ "create": document }]
        });

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: MutateResponse = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;

        api_response
            .results
            .into_iter()
            .next()
            .map(|r| DocumentId::from(r.id))
            .ok_or_else(|| ContentError::Parse("mutation acknowledged no documents".to_string()))
    }

    /// Fetch the registrations referencing an event.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(event_id = %event_id))]
    pub async fn event_registrations(
        &self,
        event_id: &EventId,
    ) -> Result<Vec<Registration>, ContentError> {
        // GROQ parameters travel as JSON-encoded query-string values.
        let param = format!("\"{}\"", event_id.as_str());
        let url = format!(
            "{}/query/{}?query={}&{}={}",
            self.base_url,
            self.dataset,
            urlencoding::encode(REGISTRATIONS_QUERY),
            urlencoding::encode("$eventId"),
            urlencoding::encode(&param),
        );

        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ContentError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let api_response: QueryResponse<Vec<Registration>> = response
            .json()
            .await
            .map_err(|e| ContentError::Parse(e.to_string()))?;

        Ok(api_response.result.unwrap_or_default())
    }
}

/// Response from the mutation endpoint.
#[derive(Debug, Deserialize)]
struct MutateResponse {
    #[serde(default)]
    results: Vec<MutateResult>,
}

#[derive(Debug, Deserialize)]
struct MutateResult {
    id: String,
}

/// Wrapper for query endpoint responses.
#[derive(Debug, Deserialize)]
struct QueryResponse<T> {
    result: Option<T>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        Json, Router,
        routing::{get, post},
    };

    use super::*;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/data")
    }

    #[tokio::test]
    async fn test_create_document_returns_generated_id() {
        let app = Router::new().route(
            "/data/mutate/{dataset}",
            post(|| async {
                Json(serde_json::json!({
                    "transactionId": "tx1",
                    "results": [{"id": "doc-abc", "operation": "create"}]
                }))
            }),
        );
        let base = serve(app).await;

        let client = ContentClient::with_endpoint(base, "production", "token").unwrap();
        let id = client
            .create_document(&serde_json::json!({"_type": "contactSubmission"}))
            .await
            .unwrap();
        assert_eq!(id.as_str(), "doc-abc");
    }

    #[tokio::test]
    async fn test_create_document_propagates_api_errors() {
        let app = Router::new().route(
            "/data/mutate/{dataset}",
            post(|| async {
                (
                    axum::http::StatusCode::FORBIDDEN,
                    "insufficient permissions",
                )
            }),
        );
        let base = serve(app).await;

        let client = ContentClient::with_endpoint(base, "production", "token").unwrap();
        let err = client
            .create_document(&serde_json::json!({"_type": "contactSubmission"}))
            .await
            .unwrap_err();
        assert!(matches!(err, ContentError::Api { status: 403, .. }));
    }

    #[tokio::test]
    async fn test_event_registrations_parses_result() {
        let app = Router::new().route(
            "/data/query/{dataset}",
            get(|| async {
                Json(serde_json::json!({
                    "result": [
                        {"_id": "r1", "status": "confirmed"},
                        {"_id": "r2", "status": "cancelled"},
                        {"_id": "r3"}
                    ]
                }))
            }),
        );
        let base = serve(app).await;

        let client = ContentClient::with_endpoint(base, "production", "token").unwrap();
        let regs = client
            .event_registrations(&EventId::new("E1"))
            .await
            .unwrap();
        assert_eq!(regs.len(), 3);
        assert_eq!(regs.iter().filter(|r| r.is_active()).count(), 2);
    }
}
