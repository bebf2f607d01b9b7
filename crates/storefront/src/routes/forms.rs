//! Form intake route handlers.
//!
//! Submissions come from an untrusted client: every missing field defaults
//! (empty string or empty list) and nothing is rejected as incomplete. The
//! server stamps the received time and the initial status before creating
//! one immutable CMS document per submission.

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use meridian_core::DocumentId;

use crate::content::{ContactFields, ContactSubmission, InquiryFields, InquirySubmission};
use crate::state::AppState;

/// Contact form body. All fields optional; missing fields become empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContactForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

/// Inquiry form body. All fields optional; missing fields become empty.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct InquiryForm {
    pub body_style: String,
    pub model: String,
    pub title: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub country: String,
    pub additional_comments: String,
    pub contact_preferences: Vec<String>,
}

/// Response for form submission.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission_id: Option<DocumentId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl SubmissionResponse {
    fn created(submission_id: DocumentId, data: Option<serde_json::Value>, message: &str) -> Self {
        Self {
            success: true,
            message: Some(message.to_string()),
            submission_id: Some(submission_id),
            data,
            error: None,
            details: None,
        }
    }

    fn failed(error: &str, details: String) -> Self {
        Self {
            success: false,
            message: None,
            submission_id: None,
            data: None,
            error: Some(error.to_string()),
            details: Some(details),
        }
    }
}

/// Submit a contact form.
///
/// POST /api/contact
#[instrument(skip(state, form))]
pub async fn contact(
    State(state): State<AppState>,
    Json(form): Json<ContactForm>,
) -> impl IntoResponse {
    let submission = ContactSubmission::new(ContactFields {
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
        subject: form.subject,
        message: form.message,
    });

    let data = serde_json::to_value(&submission).ok();

    match state.content().create_document(&submission).await {
        Ok(id) => {
            tracing::info!(submission_id = %id, "Contact submission created");
            (
                StatusCode::OK,
                Json(SubmissionResponse::created(
                    id,
                    data,
                    "Contact submission received.",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create contact submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionResponse::failed(
                    "Failed to submit contact form.",
                    e.to_string(),
                )),
            )
        }
    }
}

/// Submit a vehicle inquiry.
///
/// POST /api/inquiry
#[instrument(skip(state, form))]
pub async fn inquiry(
    State(state): State<AppState>,
    Json(form): Json<InquiryForm>,
) -> impl IntoResponse {
    let submission = InquirySubmission::new(InquiryFields {
        body_style: form.body_style,
        model: form.model,
        title: form.title,
        first_name: form.first_name,
        last_name: form.last_name,
        email: form.email,
        phone: form.phone,
        country: form.country,
        additional_comments: form.additional_comments,
        contact_preferences: form.contact_preferences,
    });

    let data = serde_json::to_value(&submission).ok();

    match state.content().create_document(&submission).await {
        Ok(id) => {
            tracing::info!(submission_id = %id, "Inquiry submission created");
            (
                StatusCode::OK,
                Json(SubmissionResponse::created(
                    id,
                    data,
                    "Inquiry submission received.",
                )),
            )
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to create inquiry submission");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SubmissionResponse::failed(
                    "Failed to submit inquiry.",
                    e.to_string(),
                )),
            )
        }
    }
}
