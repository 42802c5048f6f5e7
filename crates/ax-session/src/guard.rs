//! Screen guards.
//!
//! Pure functions from a [`Session`] snapshot to a render decision.
//! [`protect`] gates role-restricted screens; [`entry_redirect`] moves
//! an authenticated user off entry screens (login, home) to wherever
//! the redirect table says they belong.

use ax_model::{Role, Route};

use crate::machine::Session;
use crate::policy;

/// What the router should do with the current screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Session state is not settled yet; hold rendering.
    Wait,
    /// Render the requested screen.
    Render,
    /// Navigate to the given route instead.
    Redirect(Route),
}

/// Gates a role-restricted screen.
///
/// Holds while a resolution is in flight or before the first one
/// completes, so a signed-in user is never bounced to the entry screen
/// by a race. An empty `required` slice admits any authenticated user.
#[must_use]
pub fn protect(session: &Session, required: &[Role]) -> Gate {
    if session.is_loading || !session.has_checked_once {
        return Gate::Wait;
    }
    let Some(user) = &session.user else {
        return Gate::Redirect(Route::Home);
    };
    if !required.is_empty() && !required.iter().any(|role| user.has_role(*role)) {
        return Gate::Redirect(Route::Home);
    }
    Gate::Render
}

/// Gates an entry screen the way the redirect table says.
///
/// A degraded snapshot (identity decoded locally from token claims)
/// renders in place; its review fields are defaults and must not drive
/// navigation.
#[must_use]
pub fn entry_redirect(session: &Session, current: Route) -> Gate {
    if session.is_loading || !session.has_checked_once {
        return Gate::Wait;
    }
    if session.degraded {
        return Gate::Render;
    }
    let destination = policy::decide_for(session.user.as_ref());
    if destination == current {
        Gate::Render
    } else {
        Gate::Redirect(destination)
    }
}
