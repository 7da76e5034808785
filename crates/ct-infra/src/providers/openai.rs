//! Chat-completion style cloud provider (OpenAI).

use async_trait::async_trait;
use ct_core::ports::{CancellationToken, ProviderError, TranslationProviderPort};
use ct_core::translation::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http::{self, ApiError};

pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

pub struct OpenAiProvider {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(
        api_key: impl Into<String>,
        model: &str,
        base_url: Option<&str>,
    ) -> Result<Self, ProviderError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(ProviderError::InvalidCredentials("OpenAI".into()));
        }

        Ok(Self {
            client: http::build_client(http::CLOUD_TIMEOUT)?,
            api_key,
            model: super::or_default(model, DEFAULT_MODEL),
            base_url: super::or_default(base_url.unwrap_or_default(), DEFAULT_BASE_URL),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
    error: Option<ApiError>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl TranslationProviderPort for OpenAiProvider {
    fn name(&self) -> &str {
        "OpenAI"
    }

    async fn translate(
        &self,
        cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        let body = ChatRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: direction.system_instruction(),
                },
                ChatMessage {
                    role: "user",
                    content: text,
                },
            ],
        };

        let request = self
            .client
            .post(http::endpoint(&self.base_url, "chat/completions"))
            .bearer_auth(&self.api_key)
            .json(&body);

        let response: ChatResponse = http::decode(&http::execute(cancel, request).await?)?;
        if let Some(error) = response.error {
            return Err(ProviderError::Provider(error.into_message()));
        }

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::NoResult)?;
        debug!(model = %self.model, "OpenAI translation received");
        http::non_empty(&content)
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
