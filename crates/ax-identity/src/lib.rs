//! # ax-identity
//!
//! Turns a stored bearer credential into a normalized [`ax_model::User`].
//!
//! Resolution prefers the identity endpoint; when the backend is
//! unreachable or rejects the call, the token's own claims are decoded
//! locally (without signature verification) as a display-only fallback.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

pub mod claims;
pub mod gateway;
pub mod resolver;
pub mod rest;

pub use claims::{decode_unverified, TokenClaims};
pub use gateway::{IdentityGateway, OnboardingGateway};
pub use resolver::{IdentityResolver, IdentitySource, ResolvedIdentity};
pub use rest::HttpGateway;
