//! Onboarding submission payloads and the review-status echo.
//!
//! These mirror the bodies the marketplace backend accepts on its
//! profile-mutation endpoints and returns from the status endpoint.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::user::{review_status_or_default, ReviewStatus};

/// Payload for `POST /api/creator/minimal-profile`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MinimalProfile {
    /// Name shown on the creator's page.
    pub full_name: String,
    /// Creator vertical (e.g. "Fashion & Beauty").
    pub creator_type: String,
    /// Instagram handle, without the leading `@`.
    pub instagram_username: String,
    /// Optional location.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

impl MinimalProfile {
    /// Creates a minimal profile submission.
    #[must_use]
    pub fn new(
        full_name: impl Into<String>,
        creator_type: impl Into<String>,
        instagram_username: impl Into<String>,
    ) -> Self {
        Self {
            full_name: full_name.into(),
            creator_type: creator_type.into(),
            instagram_username: instagram_username.into(),
            location: None,
        }
    }

    /// Sets the location.
    #[must_use]
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }
}

/// Payload for `POST /api/onboarding/creator-profile`, the full
/// submission that enters admin review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatorProfile {
    /// Public username on the marketplace.
    pub creator_username: String,
    /// Instagram handle.
    pub instagram_handle: String,
    /// Country of residence.
    pub country: String,
    /// Primary content niche.
    pub primary_niche: String,
    /// Approximate follower count.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    /// Portfolio links. Empty entries are dropped before submission.
    #[serde(default)]
    pub portfolio_links: Vec<String>,
    /// Free-form description of past collaborations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub past_collaborations: Option<String>,
    /// Collaboration types the creator is open to.
    #[serde(default)]
    pub collaboration_type: Vec<String>,
    /// Monthly brand-deal goal.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly_brand_goal: Option<String>,
    /// Brand categories the creator prefers to work with.
    #[serde(default)]
    pub preferred_brand_categories: Vec<String>,
    /// Whether the creator is open to UGC-only work.
    #[serde(default, rename = "openToUGC")]
    pub open_to_ugc: bool,
}

impl CreatorProfile {
    /// Creates a submission with the required fields.
    #[must_use]
    pub fn new(
        creator_username: impl Into<String>,
        instagram_handle: impl Into<String>,
        country: impl Into<String>,
        primary_niche: impl Into<String>,
    ) -> Self {
        Self {
            creator_username: creator_username.into(),
            instagram_handle: instagram_handle.into(),
            country: country.into(),
            primary_niche: primary_niche.into(),
            follower_count: None,
            portfolio_links: Vec::new(),
            past_collaborations: None,
            collaboration_type: Vec::new(),
            monthly_brand_goal: None,
            preferred_brand_categories: Vec::new(),
            open_to_ugc: false,
        }
    }

    /// Sets the follower count.
    #[must_use]
    pub const fn with_follower_count(mut self, count: u64) -> Self {
        self.follower_count = Some(count);
        self
    }

    /// Adds a portfolio link, dropping empty entries.
    #[must_use]
    pub fn with_portfolio_link(mut self, link: impl Into<String>) -> Self {
        let link = link.into();
        if !link.trim().is_empty() {
            self.portfolio_links.push(link);
        }
        self
    }
}

/// Payload for `POST /api/creator/public-page`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicPage {
    /// URL slug for the public page.
    pub creator_slug: String,
    /// Name shown on the page.
    pub display_name: String,
    /// Short biography.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bio: Option<String>,
    /// Message shown to new visitors.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub welcome_message: Option<String>,
    /// Profile image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Cover image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_image: Option<String>,
    /// Instagram handle shown on the page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instagram_username: Option<String>,
    /// Page category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

impl PublicPage {
    /// Creates a public page payload with the required fields.
    #[must_use]
    pub fn new(creator_slug: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            creator_slug: creator_slug.into(),
            display_name: display_name.into(),
            bio: None,
            welcome_message: None,
            profile_image: None,
            cover_image: None,
            instagram_username: None,
            category: None,
        }
    }
}

/// Echo of the submitted profile returned by `GET /api/onboarding/status`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingStatus {
    /// Current review state.
    #[serde(default, deserialize_with = "review_status_or_default")]
    pub review_status: ReviewStatus,
    /// Submitted marketplace username.
    #[serde(default)]
    pub creator_username: Option<String>,
    /// Submitted Instagram handle.
    #[serde(default)]
    pub instagram_handle: Option<String>,
    /// Submitted country.
    #[serde(default)]
    pub country: Option<String>,
    /// Submitted primary niche.
    #[serde(default)]
    pub primary_niche: Option<String>,
    /// When the profile entered review.
    #[serde(default)]
    pub profile_submitted_at: Option<DateTime<Utc>>,
}
