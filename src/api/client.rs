use log::warn;
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::json;

use crate::config::Config;
use crate::error::{Error, Result, SubmissionError};
use crate::model::ballot::{Roster, VotePayload};

/// Opaque receipt returned by a successful vote submission.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReferenceCode(String);

impl ReferenceCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ReferenceCode {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}", self.0)
    }
}

#[derive(Deserialize)]
struct TokenResponse {
    token: String,
}

#[derive(Deserialize)]
struct SubmitResponse {
    #[serde(rename = "referenceCode", alias = "ref_code")]
    reference_code: ReferenceCode,
}

/// Machine-readable error body returned by the election API.
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    reason: Option<String>,
}

/// Classify a rejected submission response.
///
/// A 409, or an explicit `ALREADY_VOTED` reason, proves a prior
/// submission won; other client errors are server-side rule violations;
/// everything else is transient.
pub(crate) fn classify_rejection(status: StatusCode, body: &str) -> SubmissionError {
    let parsed: Option<ErrorBody> = serde_json::from_str(body).ok();
    let reason = parsed.as_ref().and_then(|body| body.reason.as_deref());
    let message = parsed
        .as_ref()
        .and_then(|body| body.message.clone())
        .unwrap_or_else(|| status.to_string());

    if status == StatusCode::CONFLICT || reason == Some("ALREADY_VOTED") {
        SubmissionError::AlreadyVoted
    } else if status.is_client_error() {
        SubmissionError::ValidationRejected(message)
    } else {
        SubmissionError::NetworkOrServer(message)
    }
}

/// Thin client for the election REST API.
pub struct PortalClient {
    http: reqwest::Client,
    base_url: String,
}

impl PortalClient {
    pub fn new(config: &Config) -> Result<Self> {
        Ok(Self {
            http: reqwest::Client::builder()
                .timeout(config.request_timeout())
                .build()?,
            base_url: config.api_url().trim_end_matches('/').to_string(),
        })
    }

    /// Exchange an identity assertion for a session token.
    pub async fn exchange_identity(&self, id_token: &str) -> Result<String> {
        let response: TokenResponse = self
            .http
            .post(format!("{}/auth/google-login", self.base_url))
            .json(&json!({ "id_token": id_token }))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;
        Ok(response.token)
    }

    /// Fetch the candidate lists for all three categories.
    pub async fn fetch_candidates(&self) -> Result<Roster> {
        Ok(self
            .http
            .get(format!("{}/candidates/getballots", self.base_url))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }

    /// Submit a serialized ballot. Rejections come back classified; a
    /// transport failure is indistinguishable from a server one and maps
    /// to the retryable class.
    pub async fn submit(&self, payload: &VotePayload) -> Result<ReferenceCode> {
        let response = self
            .http
            .post(format!("{}/vote/submit", self.base_url))
            .json(payload)
            .send()
            .await
            .map_err(|err| {
                warn!("Vote submission transport failure: {err}");
                Error::Submission(SubmissionError::NetworkOrServer(err.to_string()))
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_rejection(status, &body).into());
        }

        let receipt: SubmitResponse = response.json().await?;
        Ok(receipt.reference_code)
    }
}
