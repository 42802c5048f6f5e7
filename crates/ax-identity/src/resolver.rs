//! Credential-to-user resolution with local fallback.

use std::sync::Arc;

use ax_core::{Error, Result};
use ax_model::User;

use crate::claims;
use crate::gateway::IdentityGateway;

/// Where a resolved identity came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdentitySource {
    /// Resolved by the identity endpoint. Authoritative.
    Server,
    /// Decoded locally from the token's claims while the backend was
    /// unreachable. Display-only; review fields are defaulted.
    TokenClaims,
}

impl IdentitySource {
    /// Whether the identity is a reduced-fidelity fallback.
    #[must_use]
    pub const fn is_degraded(&self) -> bool {
        matches!(self, Self::TokenClaims)
    }
}

/// A resolved identity with its provenance.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedIdentity {
    /// The normalized user.
    pub user: User,
    /// Where the record came from.
    pub source: IdentitySource,
}

/// Resolves a stored credential into a normalized [`User`].
pub struct IdentityResolver {
    gateway: Arc<dyn IdentityGateway>,
}

impl IdentityResolver {
    /// Creates a resolver over the given gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn IdentityGateway>) -> Self {
        Self { gateway }
    }

    /// Resolves `credential` into a user.
    ///
    /// Without a credential this returns [`Error::NoCredential`]
    /// immediately, with no network call. When the identity endpoint
    /// fails (transport error or any non-success status), the token's
    /// claims are decoded locally as a display-only fallback.
    ///
    /// # Errors
    ///
    /// [`Error::NoCredential`] when `credential` is `None`;
    /// [`Error::InvalidCredential`] when the endpoint rejected the
    /// token and it could not be decoded locally either. The caller
    /// must purge the credential on the latter.
    pub async fn resolve(&self, credential: Option<&str>) -> Result<ResolvedIdentity> {
        let Some(token) = credential else {
            return Err(Error::NoCredential);
        };
        match self.gateway.fetch_identity(token).await {
            Ok(user) => Ok(ResolvedIdentity {
                user,
                source: IdentitySource::Server,
            }),
            Err(err) => {
                tracing::debug!(%err, "identity endpoint failed; attempting local claims decode");
                let user = claims::decode_unverified(token)?.into_user()?;
                tracing::info!(user_id = %user.id, "identity resolved from unverified token claims");
                Ok(ResolvedIdentity {
                    user,
                    source: IdentitySource::TokenClaims,
                })
            }
        }
    }
}
