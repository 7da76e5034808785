//! Local HTTP inference provider (Ollama). Needs no API key.

use async_trait::async_trait;
use ct_core::ports::{CancellationToken, ProviderError, TranslationProviderPort};
use ct_core::translation::Direction;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::http;

pub const DEFAULT_MODEL: &str = "llama2";
pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

pub struct OllamaProvider {
    client: reqwest::Client,
    model: String,
    base_url: String,
}

impl OllamaProvider {
    pub fn new(model: &str, base_url: Option<&str>) -> Result<Self, ProviderError> {
        Ok(Self {
            client: http::build_client(http::LOCAL_TIMEOUT)?,
            model: super::or_default(model, DEFAULT_MODEL),
            base_url: super::or_default(base_url.unwrap_or_default(), DEFAULT_BASE_URL),
        })
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
    error: Option<String>,
}

fn build_prompt(direction: Direction, text: &str) -> String {
    format!("{}\n\n{}", direction.system_instruction(), text)
}

#[async_trait]
impl TranslationProviderPort for OllamaProvider {
    fn name(&self) -> &str {
        "Ollama"
    }

    async fn translate(
        &self,
        cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt: build_prompt(direction, text),
            stream: false,
        };

        let request = self
            .client
            .post(http::endpoint(&self.base_url, "api/generate"))
            .json(&body);

        let response: GenerateResponse = http::decode(&http::execute(cancel, request).await?)?;
        if let Some(error) = response.error {
            return Err(ProviderError::Provider(error));
        }
        debug!(model = %self.model, "Ollama translation received");
        http::non_empty(&response.response)
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
