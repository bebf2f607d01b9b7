//! Document types for the content API.
//!
//! Serialized field names follow the CMS schema (camelCase, `_type`
//! discriminator). Submission constructors stamp the server-side fields the
//! client is never trusted to supply.

use chrono::{DateTime, Utc};
use meridian_core::{DocumentId, RegistrationStatus, SubmissionStatus};
use serde::{Deserialize, Serialize};

/// A contact form submission document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Fields accepted from the client for a contact submission.
#[derive(Debug, Clone, Default)]
pub struct ContactFields {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

impl ContactSubmission {
    /// Build a new submission, stamping the received time and initial status.
    #[must_use]
    pub fn new(fields: ContactFields) -> Self {
        Self {
            doc_type: "contactSubmission",
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            subject: fields.subject,
            message: fields.message,
            status: SubmissionStatus::New,
            submitted_at: Utc::now(),
        }
    }
}

/// A vehicle inquiry submission document.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InquirySubmission {
    #[serde(rename = "_type")]
    pub doc_type: &'static str,
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
    pub status: SubmissionStatus,
    pub submitted_at: DateTime<Utc>,
}

/// Fields accepted from the client for an inquiry submission.
#[derive(Debug, Clone, Default)]
pub struct InquiryFields {
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

impl InquirySubmission {
    /// Build a new submission, stamping the received time and initial status.
    #[must_use]
    pub fn new(fields: InquiryFields) -> Self {
        Self {
            doc_type: "vehicleInquiry",
            body_style: fields.body_style,
            model: fields.model,
            title: fields.title,
            first_name: fields.first_name,
            last_name: fields.last_name,
            email: fields.email,
            phone: fields.phone,
            country: fields.country,
            additional_comments: fields.additional_comments,
            contact_preferences: fields.contact_preferences,
            status: SubmissionStatus::New,
            submitted_at: Utc::now(),
        }
    }
}

/// An event registration projection read from the content API.
#[derive(Debug, Clone, Deserialize)]
pub struct Registration {
    /// Document id.
    #[serde(rename = "_id")]
    pub id: DocumentId,
    /// Registration status; documents without one count as active.
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
}

impl Registration {
    /// Whether this registration counts toward attendance.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.status.is_some_and(RegistrationStatus::is_cancelled)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_contact_submission_stamps_status_new() {
        let submission = ContactSubmission::new(ContactFields::default());
        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(value["_type"], "contactSubmission");
        assert_eq!(value["status"], "new");
        assert_eq!(value["firstName"], "");
        assert!(value["submittedAt"].is_string());
    }

    #[test]
    fn test_inquiry_submission_defaults_preferences_to_empty_list() {
        let submission = InquirySubmission::new(InquiryFields::default());
        let value = serde_json::to_value(&submission).unwrap();

        assert_eq!(value["_type"], "vehicleInquiry");
        assert_eq!(value["contactPreferences"], serde_json::json!([]));
        assert_eq!(value["additionalComments"], "");
    }

    #[test]
    fn test_registration_without_status_is_active() {
        let reg: Registration = serde_json::from_value(serde_json::json!({"_id": "r1"})).unwrap();
        assert!(reg.is_active());

        let reg: Registration =
            serde_json::from_value(serde_json::json!({"_id": "r2", "status": "cancelled"}))
                .unwrap();
        assert!(!reg.is_active());
    }
}
