//! SDK-based enterprise provider (Gemini).
//!
//! The retry policy lives here and nowhere else: up to three attempts,
//! sleeping `attempt × delay_unit` before every attempt after the first.
//! The network call sits behind [`GenerativeClient`] so the policy can be
//! exercised without a server.

use std::time::Duration;

use async_trait::async_trait;
use ct_core::ports::{CancellationToken, ProviderError, TranslationProviderPort};
use ct_core::translation::Direction;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::http::{self, ApiError};

pub const DEFAULT_MODEL: &str = "models/gemini-2.0-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// One generation call. May return empty text; the provider decides what that means.
#[async_trait]
pub trait GenerativeClient: Send + Sync {
    async fn generate(
        &self,
        cancel: &CancellationToken,
        instruction: &str,
        text: &str,
    ) -> Result<String, ProviderError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub delay_unit: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay_unit: Duration::from_secs(1),
        }
    }
}

impl RetryPolicy {
    /// Delay before the 0-based `attempt`.
    pub fn delay_before(&self, attempt: u32) -> Duration {
        self.delay_unit * attempt
    }
}

pub struct GeminiProvider<C = GeminiRestClient> {
    client: C,
    policy: RetryPolicy,
}

impl GeminiProvider<GeminiRestClient> {
    pub fn new(
        api_key: impl Into<String>,
        model: &str,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        Ok(Self::with_client(
            GeminiRestClient::new(api_key, model, base_url)?,
            RetryPolicy::default(),
        ))
    }
}

impl<C: GenerativeClient> GeminiProvider<C> {
    pub fn with_client(client: C, policy: RetryPolicy) -> Self {
        Self { client, policy }
    }
}

#[async_trait]
impl<C: GenerativeClient> TranslationProviderPort for GeminiProvider<C> {
    fn name(&self) -> &str {
        "Gemini"
    }

    async fn translate(
        &self,
        cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        let instruction = direction.system_instruction();
        let mut last_error = ProviderError::NoResult;

        for attempt in 0..self.policy.max_attempts {
            if attempt > 0 {
                let delay = self.policy.delay_before(attempt);
                debug!(attempt = attempt + 1, delay_ms = delay.as_millis() as u64, "Retrying Gemini request");
                tokio::time::sleep(delay).await;
            }
            if cancel.is_cancelled() {
                return Err(ProviderError::Cancelled);
            }

            match self.client.generate(cancel, instruction, text).await {
                Ok(translated) if !translated.trim().is_empty() => {
                    return Ok(translated.trim().to_string());
                }
                Ok(_) => {
                    warn!(attempt = attempt + 1, "Gemini returned no candidates");
                    last_error = ProviderError::NoResult;
                }
                Err(ProviderError::Cancelled) => return Err(ProviderError::Cancelled),
                Err(err) => {
                    warn!(attempt = attempt + 1, error = %err, "Gemini request failed");
                    last_error = err;
                }
            }
        }

        Err(ProviderError::RetriesExhausted {
            attempts: self.policy.max_attempts,
            last: Box::new(last_error),
        })
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}

/// `generateContent` over REST.
pub struct GeminiRestClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiRestClient {
    pub fn new(
        api_key: impl Into<String>,
        model: &str,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials("Gemini".into()));
        }

        Ok(Self {
            client: http::build_client(http::CLOUD_TIMEOUT)?,
            api_key,
            model: model_path(model),
            base_url: super::or_default(base_url.unwrap_or_default(), DEFAULT_BASE_URL),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

/// `"gemini-pro"` → `"models/gemini-pro"`; empty → the default model.
fn model_path(model: &str) -> String {
    let model = model.trim();
    if model.is_empty() {
        DEFAULT_MODEL.to_string()
    } else if model.starts_with("models/") {
        model.to_string()
    } else {
        format!("models/{model}")
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    system_instruction: Content<'a>,
    contents: [Content<'a>; 1],
}

#[derive(Serialize)]
struct Content<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'a str>,
    parts: [Part<'a>; 1],
}

#[derive(Serialize)]
struct Part<'a> {
    text: &'a str,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: String,
}

#[async_trait]
impl GenerativeClient for GeminiRestClient {
    async fn generate(
        &self,
        cancel: &CancellationToken,
        instruction: &str,
        text: &str,
    ) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: [Part { text: instruction }],
            },
            contents: [Content {
                role: Some("user"),
                parts: [Part { text }],
            }],
        };

        let url = http::endpoint(&self.base_url, &format!("{}:generateContent", self.model));
        let request = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body);

        let response: GenerateResponse = http::decode(&http::execute(cancel, request).await?)?;
        if let Some(error) = response.error {
            return Err(ProviderError::Provider(error.into_message()));
        }

        Ok(response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts.into_iter().map(|part| part.text).collect())
            .unwrap_or_default())
    }
}
