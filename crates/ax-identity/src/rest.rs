//! `reqwest`-backed gateway implementation.

use async_trait::async_trait;
use reqwest::{RequestBuilder, Response, StatusCode};
use serde::Deserialize;

use ax_core::config::ApiConfig;
use ax_core::{Error, Result};
use ax_model::{CreatorProfile, MinimalProfile, OnboardingStatus, PublicPage, User};

use crate::gateway::{IdentityGateway, OnboardingGateway};

/// HTTP gateway to the marketplace backend.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    http: reqwest::Client,
    base_url: String,
}

/// The identity endpoint returns either the user object directly or
/// wrapped as `{ "user": ... }`.
#[derive(Deserialize)]
#[serde(untagged)]
enum MePayload {
    Wrapped { user: User },
    Bare(User),
}

/// The onboarding endpoints wrap their payloads in `{ success, data }`.
#[derive(Deserialize)]
struct Envelope<T> {
    #[serde(default = "default_true")]
    success: bool,
    data: T,
}

/// Acknowledgement body for mutation endpoints.
#[derive(Deserialize)]
struct Ack {
    #[serde(default = "default_true")]
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

const fn default_true() -> bool {
    true
}

impl HttpGateway {
    /// Creates a gateway for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the configuration is invalid or the
    /// HTTP client cannot be constructed.
    pub fn new(config: &ApiConfig) -> Result<Self> {
        config.validate()?;
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| Error::Config(err.to_string()))?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_owned(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends a request and maps transport and status failures into the
    /// shared taxonomy.
    async fn execute(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(|err| Error::NetworkUnavailable(err.to_string()))?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(Error::InvalidCredential);
        }
        if !status.is_success() {
            return Err(Error::NetworkUnavailable(format!(
                "unexpected status {status}"
            )));
        }
        Ok(response)
    }

    async fn acknowledge(&self, request: RequestBuilder) -> Result<()> {
        let ack: Ack = self
            .execute(request)
            .await?
            .json()
            .await
            .map_err(|err| Error::NetworkUnavailable(format!("malformed response: {err}")))?;
        if ack.success {
            Ok(())
        } else {
            Err(Error::Rejected(
                ack.message.unwrap_or_else(|| "no reason given".into()),
            ))
        }
    }
}

#[async_trait]
impl IdentityGateway for HttpGateway {
    async fn fetch_identity(&self, credential: &str) -> Result<User> {
        let response = self
            .execute(self.http.get(self.url("/api/me")).bearer_auth(credential))
            .await?;
        let payload: MePayload = response
            .json()
            .await
            .map_err(|err| Error::NetworkUnavailable(format!("malformed identity response: {err}")))?;
        Ok(match payload {
            MePayload::Wrapped { user } | MePayload::Bare(user) => user,
        })
    }
}

#[async_trait]
impl OnboardingGateway for HttpGateway {
    async fn fetch_status(&self, credential: &str) -> Result<OnboardingStatus> {
        let response = self
            .execute(
                self.http
                    .get(self.url("/api/onboarding/status"))
                    .bearer_auth(credential),
            )
            .await?;
        let envelope: Envelope<OnboardingStatus> = response
            .json()
            .await
            .map_err(|err| Error::NetworkUnavailable(format!("malformed status response: {err}")))?;
        if !envelope.success {
            return Err(Error::Rejected("status request failed".into()));
        }
        Ok(envelope.data)
    }

    async fn submit_minimal_profile(
        &self,
        credential: &str,
        profile: &MinimalProfile,
    ) -> Result<()> {
        self.acknowledge(
            self.http
                .post(self.url("/api/creator/minimal-profile"))
                .bearer_auth(credential)
                .json(profile),
        )
        .await
    }

    async fn submit_creator_profile(
        &self,
        credential: &str,
        profile: &CreatorProfile,
    ) -> Result<()> {
        self.acknowledge(
            self.http
                .post(self.url("/api/onboarding/creator-profile"))
                .bearer_auth(credential)
                .json(profile),
        )
        .await
    }

    async fn publish_public_page(&self, credential: &str, page: &PublicPage) -> Result<()> {
        self.acknowledge(
            self.http
                .post(self.url("/api/creator/public-page"))
                .bearer_auth(credential)
                .json(page),
        )
        .await
    }
}
