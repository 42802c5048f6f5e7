//! Onboarding submission flow.
//!
//! Each mutation submits through the onboarding gateway and then
//! refreshes the session, so the snapshot the caller renders from
//! already reflects the submission (`minimal_profile_completed`,
//! `review_status`, and so on).

use std::sync::Arc;

use ax_core::{Error, Result};
use ax_credential::CredentialStore;
use ax_identity::OnboardingGateway;
use ax_model::{CreatorProfile, MinimalProfile, OnboardingStatus, PublicPage};

use crate::machine::{Session, SessionManager};

/// Drives the creator onboarding steps against the backend.
pub struct OnboardingFlow {
    gateway: Arc<dyn OnboardingGateway>,
    session: Arc<SessionManager>,
    store: Arc<CredentialStore>,
}

impl OnboardingFlow {
    /// Creates a flow over the given gateway and session manager.
    #[must_use]
    pub fn new(
        gateway: Arc<dyn OnboardingGateway>,
        session: Arc<SessionManager>,
        store: Arc<CredentialStore>,
    ) -> Self {
        Self {
            gateway,
            session,
            store,
        }
    }

    fn credential(&self) -> Result<String> {
        self.store.get().ok_or(Error::NoCredential)
    }

    /// Fetches the current review status and submitted-profile echo.
    ///
    /// # Errors
    ///
    /// [`Error::NoCredential`] when signed out, otherwise whatever the
    /// gateway reports.
    pub async fn status(&self) -> Result<OnboardingStatus> {
        let credential = self.credential()?;
        self.gateway.fetch_status(&credential).await
    }

    /// Submits the minimal creator profile and refreshes the session.
    ///
    /// # Errors
    ///
    /// [`Error::NoCredential`] when signed out; gateway errors pass
    /// through and leave the session untouched.
    pub async fn submit_minimal_profile(&self, profile: &MinimalProfile) -> Result<Session> {
        let credential = self.credential()?;
        self.gateway
            .submit_minimal_profile(&credential, profile)
            .await?;
        Ok(self.session.refresh().await)
    }

    /// Submits the full creator profile, entering admin review, and
    /// refreshes the session.
    ///
    /// # Errors
    ///
    /// [`Error::NoCredential`] when signed out; gateway errors pass
    /// through and leave the session untouched.
    pub async fn submit_creator_profile(&self, profile: &CreatorProfile) -> Result<Session> {
        let credential = self.credential()?;
        self.gateway
            .submit_creator_profile(&credential, profile)
            .await?;
        Ok(self.session.refresh().await)
    }

    /// Publishes the creator's public page and refreshes the session.
    ///
    /// # Errors
    ///
    /// [`Error::NoCredential`] when signed out; gateway errors pass
    /// through and leave the session untouched.
    pub async fn publish_public_page(&self, page: &PublicPage) -> Result<Session> {
        let credential = self.credential()?;
        self.gateway.publish_public_page(&credential, page).await?;
        Ok(self.session.refresh().await)
    }
}
