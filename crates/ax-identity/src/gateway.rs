//! Gateway traits for the marketplace backend.
//!
//! Implementations may call the real backend over HTTP or stand in for
//! it in tests; the resolver and session layers depend only on these
//! traits.

use async_trait::async_trait;

use ax_core::Result;
use ax_model::{CreatorProfile, MinimalProfile, OnboardingStatus, PublicPage, User};

/// Fetches the authoritative identity for a credential.
#[async_trait]
pub trait IdentityGateway: Send + Sync {
    /// Calls the identity endpoint with the credential as a bearer token.
    ///
    /// # Errors
    ///
    /// [`ax_core::Error::NetworkUnavailable`] when the backend cannot be
    /// reached or answers abnormally; [`ax_core::Error::InvalidCredential`]
    /// when the credential is rejected outright.
    async fn fetch_identity(&self, credential: &str) -> Result<User>;
}

/// Onboarding endpoints: status polling and profile mutations.
#[async_trait]
pub trait OnboardingGateway: Send + Sync {
    /// Fetches the current review status and submitted-profile echo.
    async fn fetch_status(&self, credential: &str) -> Result<OnboardingStatus>;

    /// Submits the minimal creator profile.
    async fn submit_minimal_profile(
        &self,
        credential: &str,
        profile: &MinimalProfile,
    ) -> Result<()>;

    /// Submits the full creator profile, entering admin review.
    async fn submit_creator_profile(
        &self,
        credential: &str,
        profile: &CreatorProfile,
    ) -> Result<()>;

    /// Publishes the creator's public page.
    async fn publish_public_page(&self, credential: &str, page: &PublicPage) -> Result<()>;
}
