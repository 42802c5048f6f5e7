//! Error taxonomy for the session stack.
//!
//! Every failure a consumer can observe is one of these kinds; no raw
//! transport or serialization error escapes a public API. `NoCredential`
//! is a normal unauthenticated state, not a failure.

use thiserror::Error;

/// Result type alias using the session stack error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors surfaced by the credential, identity, and session layers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No credential is stored. The normal signed-out state.
    #[error("no credential present")]
    NoCredential,

    /// The backend could not be reached or answered abnormally.
    ///
    /// Transient: triggers the local claims fallback during identity
    /// resolution instead of failing hard.
    #[error("identity endpoint unavailable: {0}")]
    NetworkUnavailable(String),

    /// The credential was rejected by the backend and could not be
    /// decoded locally. The caller must purge it and treat the session
    /// as signed out.
    ///
    /// The message is deliberately generic to avoid echoing token material.
    #[error("invalid credential")]
    InvalidCredential,

    /// A role/review-status combination the redirect table does not cover.
    ///
    /// Indicates the policy table is out of date with the server's enum.
    /// Logged loudly; never silently routed home.
    #[error("redirect decision table gap: {0}")]
    DecisionTableGap(String),

    /// Credential persistence is unavailable (e.g. private browsing).
    #[error("credential storage unavailable: {0}")]
    Storage(String),

    /// The backend acknowledged the request but reported failure.
    #[error("request rejected by backend: {0}")]
    Rejected(String),

    /// Client configuration is invalid.
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Whether consumers should treat this state as "not logged in".
    #[must_use]
    pub const fn is_unauthenticated(&self) -> bool {
        matches!(self, Self::NoCredential | Self::InvalidCredential)
    }

    /// Whether the failure may resolve on retry without user action.
    #[must_use]
    pub const fn is_transient(&self) -> bool {
        matches!(self, Self::NetworkUnavailable(_) | Self::Storage(_))
    }
}
