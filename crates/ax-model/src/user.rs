//! User domain model.
//!
//! A [`User`] is the normalized identity record produced by the
//! identity resolver, whether it came from the identity endpoint or
//! from the local claims fallback. Field names follow the backend's
//! JSON (camelCase over the wire).

use std::collections::BTreeSet;

use serde::{Deserialize, Deserializer, Serialize};

/// Primary account roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// A brand account (campaign buyer).
    Brand,
    /// A creator account (subject to onboarding review).
    Creator,
    /// An administrator.
    Admin,
}

/// Server-assigned state of a creator's onboarding submission.
///
/// Absent and JSON `null` both normalize to [`ReviewStatus::NotSubmitted`];
/// the backend treats the three interchangeably.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    /// No profile has been submitted for review.
    #[default]
    NotSubmitted,
    /// A submission is awaiting an admin decision.
    Pending,
    /// The submission was approved.
    Approved,
    /// The submission was rejected. The user may resubmit.
    Rejected,
    /// A status this client does not recognize (server enum is newer
    /// than this build's decision table).
    #[serde(other)]
    Unknown,
}

impl ReviewStatus {
    /// Whether this status ends review-status polling.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Rejected)
    }
}

/// Deserializes a review status, mapping JSON `null` to the default.
pub(crate) fn review_status_or_default<'de, D>(deserializer: D) -> Result<ReviewStatus, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<ReviewStatus>::deserialize(deserializer)?.unwrap_or_default())
}

/// A normalized identity record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: String,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Primary role.
    pub role: Role,
    /// Additional roles for multi-role accounts. May be empty.
    #[serde(default)]
    pub roles: BTreeSet<Role>,
    /// Name shown in the UI. The backend historically sent `fullName`.
    #[serde(default, alias = "fullName")]
    pub display_name: Option<String>,
    /// Whether the minimal creator profile step is complete.
    #[serde(default)]
    pub minimal_profile_completed: bool,
    /// Creator vertical (creator accounts only).
    #[serde(default)]
    pub creator_type: Option<String>,
    /// Instagram handle (creator accounts only).
    #[serde(default)]
    pub instagram_username: Option<String>,
    /// Review state of the onboarding submission.
    #[serde(default, deserialize_with = "review_status_or_default")]
    pub review_status: ReviewStatus,
    /// Admin approval flag. Must agree with `review_status` before any
    /// screen is unlocked; see [`User::dashboard_unlocked`].
    #[serde(default)]
    pub is_approved: bool,
    /// Last completed onboarding step.
    #[serde(default)]
    pub onboarding_step: Option<u32>,
}

impl User {
    /// Creates a user with the given id and primary role; everything
    /// else starts at its default.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            email: None,
            role,
            roles: BTreeSet::new(),
            display_name: None,
            minimal_profile_completed: false,
            creator_type: None,
            instagram_username: None,
            review_status: ReviewStatus::default(),
            is_approved: false,
            onboarding_step: None,
        }
    }

    /// Sets the email address.
    #[must_use]
    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = Some(email.into());
        self
    }

    /// Sets the display name.
    #[must_use]
    pub fn with_display_name(mut self, name: impl Into<String>) -> Self {
        self.display_name = Some(name.into());
        self
    }

    /// Grants an additional role.
    #[must_use]
    pub fn with_role(mut self, role: Role) -> Self {
        self.roles.insert(role);
        self
    }

    /// Sets the review status.
    #[must_use]
    pub const fn with_review_status(mut self, status: ReviewStatus) -> Self {
        self.review_status = status;
        self
    }

    /// Sets the admin approval flag.
    #[must_use]
    pub const fn with_approval(mut self, approved: bool) -> Self {
        self.is_approved = approved;
        self
    }

    /// Whether the account holds `role`, either as the primary role or
    /// through the multi-role set.
    #[must_use]
    pub fn has_role(&self, role: Role) -> bool {
        self.role == role || self.roles.contains(&role)
    }

    /// Whether the account has admin access.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.has_role(Role::Admin)
    }

    /// Whether the account is a creator.
    #[must_use]
    pub fn is_creator(&self) -> bool {
        self.has_role(Role::Creator)
    }

    /// Whether the creator dashboard is unlocked.
    ///
    /// Both flags must agree; the source data allows them to disagree
    /// transiently, and neither alone is sufficient.
    #[must_use]
    pub const fn dashboard_unlocked(&self) -> bool {
        matches!(self.review_status, ReviewStatus::Approved) && self.is_approved
    }
}
