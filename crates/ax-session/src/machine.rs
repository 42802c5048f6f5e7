//! The authoritative session state machine.
//!
//! One [`SessionManager`] owns the credential store and the identity
//! resolver. Every way the session can change (`login`, `logout`,
//! `refresh`) goes through it, and consumers only ever see immutable
//! [`Session`] snapshots, so the rest of the application cannot invent
//! a second source of truth.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::{watch, Mutex};

use ax_core::event::{AuthEvent, EventType};
use ax_core::Error;
use ax_credential::CredentialStore;
use ax_identity::IdentityResolver;
use ax_model::{Route, User};

use crate::policy;

/// Lifecycle phase of the session machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    /// No resolution cycle has started yet.
    Uninitialized,
    /// A resolution cycle is in flight.
    Checking,
    /// At least one resolution cycle has completed.
    Resolved,
}

/// An immutable snapshot of session state.
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    /// The resolved user, when authenticated.
    pub user: Option<User>,
    /// Whether a resolution cycle is currently in flight.
    pub is_loading: bool,
    /// Whether at least one resolution cycle has completed. Guards must
    /// not redirect before this is set; an empty `user` before the
    /// first check means "unknown", not "signed out".
    pub has_checked_once: bool,
    /// Whether `user` was decoded locally from token claims because the
    /// identity endpoint was unreachable. Degraded identities are
    /// display-only and never drive navigation.
    pub degraded: bool,
    /// Bumped on logout so per-account caches know to reset.
    pub epoch: u64,
}

impl Session {
    /// The pre-first-check state.
    #[must_use]
    pub const fn uninitialized() -> Self {
        Self {
            user: None,
            is_loading: false,
            has_checked_once: false,
            degraded: false,
            epoch: 0,
        }
    }

    /// Whether a user is present.
    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    /// The machine phase this snapshot represents.
    #[must_use]
    pub const fn phase(&self) -> SessionPhase {
        if self.is_loading {
            SessionPhase::Checking
        } else if self.has_checked_once {
            SessionPhase::Resolved
        } else {
            SessionPhase::Uninitialized
        }
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::uninitialized()
    }
}

/// Owns session state and serializes every mutation of it.
pub struct SessionManager {
    store: Arc<CredentialStore>,
    resolver: IdentityResolver,
    state: watch::Sender<Session>,
    /// Serializes resolution cycles. Held across the whole cycle so a
    /// logout can never interleave with an in-flight check.
    cycle: Mutex<()>,
    /// Completed-cycle counter; `refresh` uses it to adopt the result
    /// of a cycle that finished while it waited for the lock.
    generation: AtomicU64,
}

impl SessionManager {
    /// Creates a manager over the given store and resolver.
    #[must_use]
    pub fn new(store: Arc<CredentialStore>, resolver: IdentityResolver) -> Self {
        let (state, _) = watch::channel(Session::uninitialized());
        Self {
            store,
            resolver,
            state,
            cycle: Mutex::new(()),
            generation: AtomicU64::new(0),
        }
    }

    /// Returns the current session snapshot.
    #[must_use]
    pub fn snapshot(&self) -> Session {
        self.state.borrow().clone()
    }

    /// Subscribes to session changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.state.subscribe()
    }

    /// The credential store this manager owns.
    #[must_use]
    pub fn store(&self) -> &Arc<CredentialStore> {
        &self.store
    }

    /// Re-resolves the stored credential and returns the new snapshot.
    ///
    /// Concurrent callers coalesce: whoever holds the cycle lock does
    /// the work, and callers that were waiting adopt that result
    /// instead of issuing a second identity request.
    pub async fn refresh(&self) -> Session {
        let ticket = self.generation.load(Ordering::SeqCst);
        let _cycle = self.cycle.lock().await;
        if self.generation.load(Ordering::SeqCst) > ticket {
            return self.snapshot();
        }
        self.run_cycle().await
    }

    /// Stores a fresh credential and resolves it.
    ///
    /// Returns the landing route for the resolved account, computed
    /// from the same snapshot the caller will observe. A credential
    /// that fails to persist still yields a working in-memory session.
    pub async fn login(&self, credential: &str) -> Route {
        let _cycle = self.cycle.lock().await;
        if !self.store.set(credential) {
            tracing::warn!("login credential held in memory only for this page lifetime");
        }
        let session = self.run_cycle().await;
        let route = policy::decide_for(session.user.as_ref());
        match &session.user {
            Some(user) => AuthEvent::success(EventType::Login)
                .with_user(user.id.as_str())
                .emit(),
            None => {
                AuthEvent::failure(EventType::Login, "credential did not resolve to a user").emit();
            }
        }
        route
    }

    /// Clears the credential and resets the session.
    ///
    /// The epoch bump tells downstream caches that account-scoped state
    /// is stale. Idempotent.
    pub async fn logout(&self) {
        let _cycle = self.cycle.lock().await;
        self.store.clear();
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.state.send_modify(|session| {
            session.user = None;
            session.degraded = false;
            session.is_loading = false;
            session.has_checked_once = true;
            session.epoch += 1;
        });
        AuthEvent::success(EventType::Logout).emit();
    }

    /// One resolution cycle. Caller must hold the cycle lock.
    async fn run_cycle(&self) -> Session {
        self.state.send_modify(|session| session.is_loading = true);
        let previous_status = {
            let session = self.state.borrow();
            session.user.as_ref().map(|user| user.review_status)
        };

        let credential = self.store.get();
        let mut purge = false;
        let resolved = match self.resolver.resolve(credential.as_deref()).await {
            Ok(identity) => Some(identity),
            Err(Error::NoCredential) => None,
            Err(Error::InvalidCredential) => {
                purge = true;
                None
            }
            Err(err) => {
                AuthEvent::failure(EventType::SessionRefresh, err.to_string()).emit();
                None
            }
        };
        if purge {
            // The backend rejected the token and it was undecodable; a
            // retry can never succeed, so drop it everywhere.
            self.store.clear();
            AuthEvent::success(EventType::CredentialPurged).emit();
        }

        self.state.send_modify(|session| {
            session.is_loading = false;
            session.has_checked_once = true;
            match &resolved {
                Some(identity) => {
                    session.degraded = identity.source.is_degraded();
                    session.user = Some(identity.user.clone());
                }
                None => {
                    session.degraded = false;
                    session.user = None;
                }
            }
        });

        if let Some(identity) = &resolved {
            if let Some(previous) = previous_status {
                if previous != identity.user.review_status {
                    AuthEvent::success(EventType::ReviewStatusChanged)
                        .with_user(identity.user.id.as_str())
                        .with_detail(format!("{previous:?} -> {:?}", identity.user.review_status))
                        .emit();
                }
            }
        }

        self.generation.fetch_add(1, Ordering::SeqCst);
        self.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use ax_core::Error;
    use ax_model::{ReviewStatus, Route};

    use crate::testutil::{
        approved_creator, manager, manager_with_token, pending_creator, signed_token,
        MockIdentityGateway,
    };

    use super::*;

    #[tokio::test]
    async fn cold_start_without_credential_resolves_signed_out() {
        let gateway = MockIdentityGateway::returning(Ok(pending_creator()));
        let (manager, _store) = manager(gateway.clone());

        assert_eq!(manager.snapshot().phase(), SessionPhase::Uninitialized);
        let session = manager.refresh().await;

        assert_eq!(session.phase(), SessionPhase::Resolved);
        assert!(!session.is_authenticated());
        // No credential means no identity request at all.
        assert_eq!(gateway.calls(), 0);
        assert_eq!(policy::decide_for(session.user.as_ref()), Route::Home);
    }

    #[tokio::test]
    async fn login_lands_pending_creator_under_review() {
        let gateway = MockIdentityGateway::returning(Ok(pending_creator()));
        let (manager, store) = manager(gateway.clone());

        let route = manager.login("fresh-token").await;

        assert_eq!(route, Route::CreatorUnderReview);
        assert_eq!(store.get().as_deref(), Some("fresh-token"));
        let session = manager.snapshot();
        assert!(session.is_authenticated());
        assert!(!session.degraded);
        assert_eq!(gateway.calls(), 1);
    }

    #[tokio::test]
    async fn concurrent_refreshes_coalesce_into_one_cycle() {
        let gateway = MockIdentityGateway::returning(Ok(pending_creator()));
        let (manager, _store) = manager_with_token(gateway.clone(), "tok");

        let (first, second) = tokio::join!(manager.refresh(), manager.refresh());

        assert_eq!(gateway.calls(), 1);
        assert_eq!(first, second);
        assert!(first.is_authenticated());
    }

    #[tokio::test]
    async fn refresh_racing_a_login_adopts_its_result() {
        let gateway = MockIdentityGateway::returning(Ok(approved_creator()));
        let (manager, _store) = manager(gateway.clone());

        let (route, session) = tokio::join!(manager.login("tok"), manager.refresh());

        assert_eq!(gateway.calls(), 1);
        assert_eq!(route, Route::CreatorDashboard);
        assert!(session.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_undecodable_credential_is_purged() {
        let gateway = MockIdentityGateway::returning(Err(Error::InvalidCredential));
        let (manager, store) = manager_with_token(gateway, "not-a-jwt");

        let session = manager.refresh().await;

        assert!(!session.is_authenticated());
        assert_eq!(session.phase(), SessionPhase::Resolved);
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn unreachable_backend_yields_degraded_session() {
        let gateway =
            MockIdentityGateway::returning(Err(Error::NetworkUnavailable("refused".into())));
        let token = signed_token(r#"{"userId":"u1","role":"creator","name":"Casey"}"#);
        let (manager, store) = manager_with_token(gateway, &token);

        let session = manager.refresh().await;

        assert!(session.is_authenticated());
        assert!(session.degraded);
        // The fallback never carries review state, and the credential
        // stays stored for the next attempt.
        let user = session.user.unwrap();
        assert_eq!(user.review_status, ReviewStatus::NotSubmitted);
        assert!(store.get().is_some());
    }

    #[tokio::test]
    async fn logout_resets_session_and_bumps_epoch() {
        let gateway = MockIdentityGateway::returning(Ok(pending_creator()));
        let (manager, store) = manager(gateway.clone());

        manager.login("tok").await;
        let epoch_before = manager.snapshot().epoch;

        manager.logout().await;

        let session = manager.snapshot();
        assert!(!session.is_authenticated());
        assert!(session.has_checked_once);
        assert_eq!(session.epoch, epoch_before + 1);
        assert_eq!(store.get(), None);

        // A refresh after logout short-circuits on the empty store.
        manager.refresh().await;
        assert_eq!(gateway.calls(), 1);

        // Logout is idempotent.
        manager.logout().await;
        assert_eq!(store.get(), None);
    }

    #[tokio::test]
    async fn subscribers_observe_resolution() {
        let gateway = MockIdentityGateway::returning(Ok(pending_creator()));
        let (manager, _store) = manager_with_token(gateway, "tok");
        let mut updates = manager.subscribe();

        manager.refresh().await;

        updates.changed().await.unwrap();
        let session = updates.borrow_and_update().clone();
        assert!(session.has_checked_once);
        assert!(session.user.is_some());
    }

    #[tokio::test]
    async fn status_transition_is_reflected_across_refreshes() {
        let gateway = MockIdentityGateway::scripted(
            [Ok(pending_creator())],
            Ok(approved_creator()),
        );
        let (manager, _store) = manager_with_token(gateway, "tok");

        let first = manager.refresh().await;
        assert_eq!(
            first.user.as_ref().map(|user| user.review_status),
            Some(ReviewStatus::Pending)
        );

        let second = manager.refresh().await;
        let user = second.user.unwrap();
        assert_eq!(user.review_status, ReviewStatus::Approved);
        assert!(user.dashboard_unlocked());
    }
}
