//! # ax-session
//!
//! The session/identity reconciliation core: a single authoritative
//! session state machine, the pure redirect decision table, the
//! onboarding review poller, the profile submission flow, and the
//! screen guards the presentational layer consumes.
//!
//! Consumers read `{ user, is_loading, is_authenticated }` snapshots
//! and call `login`, `logout`, and `refresh`; nothing else mutates
//! session state.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod flow;
pub mod guard;
pub mod machine;
pub mod policy;
pub mod poller;

#[cfg(test)]
pub(crate) mod testutil;

pub use flow::OnboardingFlow;
pub use guard::{entry_redirect, protect, Gate};
pub use machine::{Session, SessionManager, SessionPhase};
pub use policy::{decide, decide_for};
pub use poller::OnboardingPoller;
