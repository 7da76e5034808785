//! Messages style cloud provider (Claude).

use async_trait::async_trait;
use ct_core::ports::{CancellationToken, ProviderError, TranslationProviderPort};
use ct_core::translation::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{self, ApiError};

pub const DEFAULT_MODEL: &str = "claude-3-haiku-20240307";
pub const DEFAULT_BASE_URL: &str = "https://api.anthropic.com/v1";
const API_VERSION: &str = "2023-06-01";
const MAX_TOKENS: u32 = 1000;

pub struct ClaudeProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl ClaudeProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: &str,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials("Claude".into()));
        }

        Ok(Self {
            client: http::build_client(http::CLOUD_TIMEOUT)?,
            api_key,
            model: super::or_default(model, DEFAULT_MODEL),
            base_url: super::or_default(base_url.unwrap_or_default(), DEFAULT_BASE_URL),
        })
    }
}

#[derive(Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: [Message<'a>; 1],
}

#[derive(Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: Option<String>,
}

#[async_trait]
impl TranslationProviderPort for ClaudeProvider {
    fn name(&self) -> &str {
        "Claude"
    }

    async fn translate(
        &self,
        cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        let body = MessagesRequest {
            model: &self.model,
            max_tokens: MAX_TOKENS,
            system: direction.system_instruction(),
            messages: [Message {
                role: "user",
                content: text,
            }],
        };

        let request = self
            .client
            .post(http::endpoint(&self.base_url, "messages"))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&body);

        let response: MessagesResponse = http::decode(&http::execute(cancel, request).await?)?;
        if let Some(error) = response.error {
            return Err(ProviderError::Provider(error.into_message()));
        }

        let text = response
            .content
            .into_iter()
            .find_map(|block| block.text)
            .ok_or(ProviderError::NoResult)?;
        debug!(model = %self.model, "Claude translation received");
        http::non_empty(&text)
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
