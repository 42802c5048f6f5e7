//! # ax-model
//!
//! Domain model for the Aurax client core.
//!
//! Users are the normalized identity records the session layer works
//! with; routes are the navigation targets the redirect policy can
//! decide; onboarding types carry creator profile submissions and the
//! review-status echo.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod onboarding;
pub mod route;
pub mod user;

pub use onboarding::{CreatorProfile, MinimalProfile, OnboardingStatus, PublicPage};
pub use route::Route;
pub use user::{ReviewStatus, Role, User};
