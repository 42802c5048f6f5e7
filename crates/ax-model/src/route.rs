//! Application routes the core can direct a consumer to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Navigation targets produced by the redirect policy and screen guards.
///
/// Paths match the marketplace frontend's router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Route {
    /// Application home (public landing, hosts login).
    Home,
    /// Admin campaign curation landing.
    AdminCampaigns,
    /// Brand dashboard.
    BrandDashboard,
    /// Creator dashboard (requires approved review).
    CreatorDashboard,
    /// Creator welcome / onboarding start.
    CreatorWelcome,
    /// Waiting screen while a submission is under review.
    CreatorUnderReview,
    /// Shown after a rejected submission.
    CreatorRejected,
    /// Full creator profile submission form.
    CreatorProfileSetup,
    /// Creator login page.
    CreatorLogin,
}

impl Route {
    /// The router path for this route.
    #[must_use]
    pub const fn path(&self) -> &'static str {
        match self {
            Self::Home => "/",
            Self::AdminCampaigns => "/admin/campaigns",
            Self::BrandDashboard => "/brand/dashboard",
            Self::CreatorDashboard => "/creator/dashboard",
            Self::CreatorWelcome => "/creator/welcome",
            Self::CreatorUnderReview => "/creator/under-review",
            Self::CreatorRejected => "/creator/rejected",
            Self::CreatorProfileSetup => "/creator/profile-setup",
            Self::CreatorLogin => "/creator/login",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_match_frontend_router() {
        assert_eq!(Route::AdminCampaigns.path(), "/admin/campaigns");
        assert_eq!(Route::CreatorUnderReview.path(), "/creator/under-review");
        assert_eq!(Route::Home.path(), "/");
    }

    #[test]
    fn display_is_the_path() {
        assert_eq!(Route::BrandDashboard.to_string(), "/brand/dashboard");
    }
}
