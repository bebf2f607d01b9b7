//! Status enums for submissions and event registrations.

use serde::{Deserialize, Serialize};

/// Lifecycle status of a form submission document.
///
/// Every submission is created as `New`; later transitions happen in the
/// CMS studio, never through this service.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionStatus {
    /// Freshly received, nobody has looked at it yet.
    #[default]
    New,
    /// A team member is handling it.
    InProgress,
    /// Resolved or discarded.
    Closed,
}

/// Status of an event registration document.
///
/// Registrations are authored in the CMS; statuses other than the known set
/// deserialize as [`RegistrationStatus::Other`] and still count as active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationStatus {
    /// Confirmed attendance.
    Confirmed,
    /// Registered but not yet confirmed.
    Pending,
    /// Withdrawn; excluded from attendance counts.
    Cancelled,
    /// Any status value this service does not know about.
    #[serde(other)]
    Other,
}

impl RegistrationStatus {
    /// Whether this registration has been cancelled.
    #[must_use]
    pub const fn is_cancelled(self) -> bool {
        matches!(self, Self::Cancelled)
    }
}
