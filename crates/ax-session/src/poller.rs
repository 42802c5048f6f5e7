//! Background polling of the creator review decision.
//!
//! The under-review screen starts a poller; each tick re-resolves the
//! session and re-evaluates the redirect table. When the decision is
//! terminal (or the table points anywhere other than the under-review
//! screen) the poller delivers the destination once and stops itself.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use ax_core::config::OnboardingConfig;
use ax_core::event::{AuthEvent, EventType};
use ax_model::Route;

use crate::machine::SessionManager;
use crate::policy;

/// Polls the session until the review decision leaves the under-review
/// screen. At most one poll task runs per poller.
pub struct OnboardingPoller {
    session: Arc<SessionManager>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl OnboardingPoller {
    /// Creates a poller over the given session manager.
    #[must_use]
    pub fn new(session: Arc<SessionManager>) -> Self {
        Self {
            session,
            task: Mutex::new(None),
        }
    }

    /// Starts polling at the configured interval.
    pub fn start_with(&self, config: &OnboardingConfig) -> oneshot::Receiver<Route> {
        self.start(config.poll_interval())
    }

    /// Starts polling at `interval`, replacing any running poll task.
    ///
    /// The returned channel yields the destination route exactly once,
    /// when the review decision becomes terminal or the redirect table
    /// otherwise points away from the under-review screen. Dropping the
    /// receiver does not stop the poller; call [`OnboardingPoller::stop`].
    pub fn start(&self, interval: Duration) -> oneshot::Receiver<Route> {
        let mut slot = self.task.lock();
        if let Some(previous) = slot.take() {
            previous.abort();
        }
        AuthEvent::success(EventType::PollStarted)
            .with_detail(format!("interval {}s", interval.as_secs()))
            .emit();

        let session = Arc::clone(&self.session);
        let (tx, rx) = oneshot::channel();
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; the screen has just
            // rendered from a fresh snapshot, so skip it.
            ticker.tick().await;
            loop {
                ticker.tick().await;
                let snapshot = session.refresh().await;
                if snapshot.degraded {
                    // Fallback identities carry no review state and
                    // must never drive navigation. Try again next tick.
                    tracing::debug!("review poll tick resolved a fallback identity; skipping");
                    continue;
                }
                let route = policy::decide_for(snapshot.user.as_ref());
                let terminal = snapshot
                    .user
                    .as_ref()
                    .is_some_and(|user| user.review_status.is_terminal());
                if terminal || route != Route::CreatorUnderReview {
                    AuthEvent::success(EventType::PollStopped)
                        .with_detail(format!("redirecting to {route}"))
                        .emit();
                    let _ = tx.send(route);
                    break;
                }
            }
        });
        *slot = Some(handle);
        rx
    }

    /// Stops the poll task, if one is running. Idempotent.
    pub fn stop(&self) {
        if let Some(task) = self.task.lock().take() {
            // A task that ran to completion already logged its own stop.
            if !task.is_finished() {
                task.abort();
                AuthEvent::success(EventType::PollStopped)
                    .with_detail("stopped by caller")
                    .emit();
            }
        }
    }

    /// Whether a poll task is currently running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.task
            .lock()
            .as_ref()
            .is_some_and(|task| !task.is_finished())
    }
}

impl Drop for OnboardingPoller {
    fn drop(&mut self) {
        self.stop();
    }
}
