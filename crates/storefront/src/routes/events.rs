//! Event route handlers.

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use meridian_core::EventId;

use crate::content::Registration;
use crate::error::{AppError, Result};
use crate::state::AppState;

/// Query parameters for the registration count endpoint.
#[derive(Debug, Deserialize)]
pub struct CountParams {
    #[serde(rename = "eventId")]
    pub event_id: Option<String>,
}

/// Registration count response.
#[derive(Debug, Serialize)]
pub struct CountResponse {
    pub count: usize,
}

/// Count non-cancelled registrations for an event.
///
/// GET /api/registrations/count?eventId=...
#[instrument(skip(state))]
pub async fn registration_count(
    State(state): State<AppState>,
    Query(params): Query<CountParams>,
) -> Result<Json<CountResponse>> {
    let event_id = params
        .event_id
        .filter(|id| !id.is_empty())
        .ok_or_else(|| AppError::BadRequest("eventId query parameter is required".to_string()))?;

    let registrations = state
        .content()
        .event_registrations(&EventId::new(event_id))
        .await?;

    Ok(Json(CountResponse {
        count: active_count(&registrations),
    }))
}

/// Count the registrations that have not been cancelled.
fn active_count(registrations: &[Registration]) -> usize {
    registrations.iter().filter(|r| r.is_active()).count()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn registration(id: &str, status: Option<&str>) -> Registration {
        let mut doc = serde_json::json!({"_id": id});
        if let Some(status) = status {
            doc["status"] = serde_json::Value::String(status.to_string());
        }
        serde_json::from_value(doc).unwrap()
    }

    #[test]
    fn test_active_count_excludes_cancelled() {
        let registrations = vec![
            registration("r1", Some("confirmed")),
            registration("r2", Some("pending")),
            registration("r3", None),
            registration("r4", Some("cancelled")),
            registration("r5", Some("cancelled")),
        ];
        assert_eq!(active_count(&registrations), 3);
    }

    #[test]
    fn test_active_count_empty() {
        assert_eq!(active_count(&[]), 0);
    }
}
