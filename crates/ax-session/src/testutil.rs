//! Test doubles and fixtures shared by the session module tests.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use parking_lot::Mutex;

use ax_core::Result;
use ax_credential::CredentialStore;
use ax_identity::{IdentityGateway, IdentityResolver, OnboardingGateway};
use ax_model::{
    CreatorProfile, MinimalProfile, OnboardingStatus, PublicPage, ReviewStatus, Role, User,
};

use crate::machine::SessionManager;

/// Identity gateway double. Scripted responses are consumed in order;
/// once the script is empty the fallback response repeats.
pub(crate) struct MockIdentityGateway {
    script: Mutex<VecDeque<Result<User>>>,
    fallback: Mutex<Result<User>>,
    calls: AtomicUsize,
}

impl MockIdentityGateway {
    pub(crate) fn returning(response: Result<User>) -> Arc<Self> {
        Self::scripted([], response)
    }

    pub(crate) fn scripted(
        steps: impl IntoIterator<Item = Result<User>>,
        fallback: Result<User>,
    ) -> Arc<Self> {
        Arc::new(Self {
            script: Mutex::new(steps.into_iter().collect()),
            fallback: Mutex::new(fallback),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl IdentityGateway for MockIdentityGateway {
    async fn fetch_identity(&self, _credential: &str) -> Result<User> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        // Yield so concurrent callers reach the coalescing lock while
        // this call is still in flight.
        tokio::task::yield_now().await;
        let scripted = self.script.lock().pop_front();
        scripted.unwrap_or_else(|| self.fallback.lock().clone())
    }
}

/// Onboarding gateway double with one shared acknowledgement result.
pub(crate) struct MockOnboardingGateway {
    ack: Mutex<Result<()>>,
    status: Mutex<Result<OnboardingStatus>>,
    calls: AtomicUsize,
}

impl MockOnboardingGateway {
    pub(crate) fn accepting() -> Arc<Self> {
        Arc::new(Self {
            ack: Mutex::new(Ok(())),
            status: Mutex::new(Ok(OnboardingStatus {
                review_status: ReviewStatus::Pending,
                creator_username: None,
                instagram_handle: None,
                country: None,
                primary_niche: None,
                profile_submitted_at: None,
            })),
            calls: AtomicUsize::new(0),
        })
    }

    pub(crate) fn set_ack(&self, ack: Result<()>) {
        *self.ack.lock() = ack;
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn acknowledge(&self) -> Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.ack.lock().clone()
    }
}

#[async_trait]
impl OnboardingGateway for MockOnboardingGateway {
    async fn fetch_status(&self, _credential: &str) -> Result<OnboardingStatus> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.status.lock().clone()
    }

    async fn submit_minimal_profile(
        &self,
        _credential: &str,
        _profile: &MinimalProfile,
    ) -> Result<()> {
        self.acknowledge()
    }

    async fn submit_creator_profile(
        &self,
        _credential: &str,
        _profile: &CreatorProfile,
    ) -> Result<()> {
        self.acknowledge()
    }

    async fn publish_public_page(&self, _credential: &str, _page: &PublicPage) -> Result<()> {
        self.acknowledge()
    }
}

/// Builds a structurally valid unsigned-verification token.
pub(crate) fn signed_token(payload: &str) -> String {
    let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
    let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
    format!("{header}.{body}.sig")
}

pub(crate) fn pending_creator() -> User {
    User::new("u1", Role::Creator).with_review_status(ReviewStatus::Pending)
}

pub(crate) fn approved_creator() -> User {
    User::new("u1", Role::Creator)
        .with_review_status(ReviewStatus::Approved)
        .with_approval(true)
}

/// Builds a manager over an in-memory credential store.
pub(crate) fn manager(
    gateway: Arc<MockIdentityGateway>,
) -> (Arc<SessionManager>, Arc<CredentialStore>) {
    let store = Arc::new(CredentialStore::in_memory());
    let manager = Arc::new(SessionManager::new(
        Arc::clone(&store),
        IdentityResolver::new(gateway),
    ));
    (manager, store)
}

/// Like [`manager`], with a credential already stored.
pub(crate) fn manager_with_token(
    gateway: Arc<MockIdentityGateway>,
    token: &str,
) -> (Arc<SessionManager>, Arc<CredentialStore>) {
    let (manager, store) = manager(gateway);
    assert!(store.set(token));
    (manager, store)
}
