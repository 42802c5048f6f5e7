//! Pure redirect decision table.
//!
//! Maps `(role, roles, review_status, is_approved)` to a landing route.
//! No I/O, no state. The match order is load-bearing: a user can hold
//! an admin role and a creator review status at the same time, and
//! admin must win.

use std::collections::BTreeSet;

use ax_core::Error;
use ax_model::{ReviewStatus, Role, Route, User};

/// Decides the landing route for an authenticated account.
///
/// First match wins: admin (primary or in the role set) goes to the
/// admin landing; a creator is routed by review state, and both
/// approval flags must agree before the dashboard unlocks; a brand
/// goes to the brand dashboard; anything else lands on application
/// home.
#[must_use]
pub fn decide(
    role: Role,
    roles: &BTreeSet<Role>,
    review_status: ReviewStatus,
    is_approved: bool,
) -> Route {
    let holds = |candidate: Role| role == candidate || roles.contains(&candidate);

    if holds(Role::Admin) {
        return Route::AdminCampaigns;
    }

    if holds(Role::Creator) {
        // Exhaustive on purpose: a new ReviewStatus variant must update
        // this table before the crate compiles.
        return match review_status {
            ReviewStatus::Approved if is_approved => Route::CreatorDashboard,
            // The approval flags disagree; the explicit flag is the
            // gatekeeper, so the user stays at the start of onboarding.
            ReviewStatus::Approved => Route::CreatorWelcome,
            ReviewStatus::Pending => Route::CreatorUnderReview,
            ReviewStatus::Rejected => Route::CreatorRejected,
            ReviewStatus::NotSubmitted => Route::CreatorWelcome,
            ReviewStatus::Unknown => {
                let gap = Error::DecisionTableGap(format!(
                    "unrecognized review status for creator (approved flag: {is_approved})"
                ));
                tracing::error!(error = %gap, "redirect policy out of date with server enum");
                Route::CreatorWelcome
            }
        };
    }

    if holds(Role::Brand) {
        return Route::BrandDashboard;
    }

    Route::Home
}

/// Decides the landing route for an optional user; `None` lands home.
#[must_use]
pub fn decide_for(user: Option<&User>) -> Route {
    user.map_or(Route::Home, |user| {
        decide(user.role, &user.roles, user.review_status, user.is_approved)
    })
}
