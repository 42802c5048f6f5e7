//! Unverified decode of the bearer token's claims.
//!
//! This is a display-only fallback: the signature is NOT checked, and
//! nothing decoded here may participate in an access-control decision.
//! The server remains the sole authority; a claims-derived user carries
//! no review-status fields and must not be treated as fully onboarded.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use serde::Deserialize;

use ax_core::{Error, Result};
use ax_model::{Role, User};

/// Claims carried by the marketplace's self-contained bearer token.
///
/// The issuer has signed the subject under different names over time
/// (`userId` from the backend, `id`/`sub` in older tokens), so all
/// three are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenClaims {
    /// Subject as `id`.
    #[serde(default)]
    pub id: Option<String>,
    /// Subject as the standard `sub` claim.
    #[serde(default)]
    pub sub: Option<String>,
    /// Subject as `userId`.
    #[serde(default, rename = "userId")]
    pub user_id: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Account role.
    #[serde(default)]
    pub role: Option<Role>,
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,
    /// Account username.
    #[serde(default)]
    pub username: Option<String>,
    /// Expiry (seconds since epoch). Informational only here.
    #[serde(default)]
    pub exp: Option<i64>,
    /// Issued-at (seconds since epoch).
    #[serde(default)]
    pub iat: Option<i64>,
}

impl TokenClaims {
    /// The user identifier, whichever claim the issuer used.
    #[must_use]
    pub fn subject(&self) -> Option<&str> {
        self.id
            .as_deref()
            .or(self.sub.as_deref())
            .or(self.user_id.as_deref())
    }

    /// Best display name available in the claims.
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.name.as_deref().or(self.username.as_deref())
    }

    /// Builds a minimal [`User`] from the claims.
    ///
    /// Review fields keep their defaults; only identity and role are
    /// carried over.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCredential`] if the claims carry no
    /// subject or no role.
    pub fn into_user(self) -> Result<User> {
        let id = self.subject().ok_or(Error::InvalidCredential)?.to_owned();
        let role = self.role.ok_or(Error::InvalidCredential)?;
        let mut user = User::new(id, role);
        user.email = self.email;
        user.display_name = self.name.or(self.username);
        Ok(user)
    }
}

/// Decodes the payload segment of a compact JWS without verifying the
/// signature.
///
/// # Errors
///
/// Returns [`Error::InvalidCredential`] if the token is not three
/// dot-separated segments, the payload is not valid base64url, or the
/// decoded payload is not a JSON claims object.
pub fn decode_unverified(token: &str) -> Result<TokenClaims> {
    let mut segments = token.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) = (
        segments.next(),
        segments.next(),
        segments.next(),
        segments.next(),
    ) else {
        return Err(Error::InvalidCredential);
    };
    let bytes = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|_| Error::InvalidCredential)?;
    serde_json::from_slice(&bytes).map_err(|_| Error::InvalidCredential)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token_with_payload(payload: &str) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"HS256","typ":"JWT"}"#);
        let body = URL_SAFE_NO_PAD.encode(payload.as_bytes());
        format!("{header}.{body}.sig")
    }

    #[test]
    fn decodes_backend_claims() {
        let token = token_with_payload(
            r#"{"userId":"u1","email":"c@example.com","username":"casey","role":"creator","exp":1999999999}"#,
        );
        let claims = decode_unverified(&token).unwrap();
        assert_eq!(claims.subject(), Some("u1"));
        assert_eq!(claims.display_name(), Some("casey"));
        assert_eq!(claims.role, Some(Role::Creator));
    }

    #[test]
    fn subject_prefers_id_over_sub() {
        let token = token_with_payload(r#"{"id":"a","sub":"b","role":"brand"}"#);
        let claims = decode_unverified(&token).unwrap();
        assert_eq!(claims.subject(), Some("a"));
    }

    #[test]
    fn into_user_keeps_review_defaults() {
        let token = token_with_payload(r#"{"sub":"u1","email":"c@example.com","role":"creator"}"#);
        let user = decode_unverified(&token).unwrap().into_user().unwrap();
        assert_eq!(user.id, "u1");
        assert_eq!(user.email.as_deref(), Some("c@example.com"));
        assert_eq!(user.review_status, ax_model::ReviewStatus::NotSubmitted);
        assert!(!user.is_approved);
    }

    #[test]
    fn rejects_malformed_tokens() {
        assert!(matches!(
            decode_unverified("not-a-token"),
            Err(Error::InvalidCredential)
        ));
    }

    #[test]
    fn rejects_wrong_segment_count() {
        assert!(decode_unverified("a.b").is_err());
        assert!(decode_unverified("a.b.c.d").is_err());
    }

    #[test]
    fn rejects_bad_base64_payload() {
        assert!(decode_unverified("header.???.sig").is_err());
    }

    #[test]
    fn into_user_requires_subject_and_role() {
        let no_subject = token_with_payload(r#"{"email":"c@example.com","role":"creator"}"#);
        assert!(decode_unverified(&no_subject).unwrap().into_user().is_err());

        let no_role = token_with_payload(r#"{"sub":"u1"}"#);
        assert!(decode_unverified(&no_role).unwrap().into_user().is_err());
    }
}
