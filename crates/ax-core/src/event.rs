//! Structured logging of session lifecycle events.
//!
//! Security-relevant session transitions (login, logout, credential
//! purge, review-status changes, poll lifecycle) are emitted as
//! structured records under the `ax::event` target so operators can
//! filter them independently of ordinary diagnostics.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session event categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    /// Login attempt completed.
    Login,
    /// User logged out.
    Logout,
    /// Session refresh cycle completed.
    SessionRefresh,
    /// A stored credential was purged after being rejected.
    CredentialPurged,
    /// The user's review status changed between resolutions.
    ReviewStatusChanged,
    /// Review-status polling started.
    PollStarted,
    /// Review-status polling stopped.
    PollStopped,
}

/// Outcome of an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventOutcome {
    /// The operation succeeded.
    Success,
    /// The operation failed.
    Failure,
}

/// A structured session event.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthEvent {
    /// Event category.
    pub event_type: EventType,
    /// Success or failure.
    pub outcome: EventOutcome,
    /// Affected user, when known.
    pub user_id: Option<String>,
    /// Free-form detail (never token material).
    pub detail: Option<String>,
    /// When the event occurred.
    pub timestamp: DateTime<Utc>,
}

impl AuthEvent {
    /// Creates a successful event.
    #[must_use]
    pub fn success(event_type: EventType) -> Self {
        Self {
            event_type,
            outcome: EventOutcome::Success,
            user_id: None,
            detail: None,
            timestamp: Utc::now(),
        }
    }

    /// Creates a failed event with a detail message.
    #[must_use]
    pub fn failure(event_type: EventType, detail: impl Into<String>) -> Self {
        Self {
            event_type,
            outcome: EventOutcome::Failure,
            user_id: None,
            detail: Some(detail.into()),
            timestamp: Utc::now(),
        }
    }

    /// Attaches the affected user.
    #[must_use]
    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    /// Attaches a detail message.
    #[must_use]
    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }

    /// Emits the event to the active tracing subscriber.
    pub fn emit(&self) {
        match self.outcome {
            EventOutcome::Success => tracing::info!(
                target: "ax::event",
                event_type = ?self.event_type,
                user_id = self.user_id.as_deref(),
                detail = self.detail.as_deref(),
                "session event"
            ),
            EventOutcome::Failure => tracing::warn!(
                target: "ax::event",
                event_type = ?self.event_type,
                user_id = self.user_id.as_deref(),
                detail = self.detail.as_deref(),
                "session event failed"
            ),
        }
    }
}
