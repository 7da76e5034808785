//! Translation providers.
//!
//! [`build_provider`] is the only place where the configured kind is
//! matched; callers hold the result as `Arc<dyn TranslationProviderPort>`.

pub mod claude;
pub mod gemini;
mod http;
pub mod ollama;
pub mod openai;

use std::sync::Arc;

use ct_core::ports::{ProviderError, ProviderFactoryPort, TranslationProviderPort};
use ct_core::settings::model::{ProviderConfig, ProviderKind};
use tracing::info;

pub use claude::ClaudeProvider;
pub use gemini::{GeminiProvider, GeminiRestClient, GenerativeClient, RetryPolicy};
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;

fn or_default(value: &str, default: &str) -> String {
    let value = value.trim();
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

/// Construct the provider described by `config`.
///
/// `env` resolves environment variables for `use_env_key`.
pub fn build_provider(
    config: &ProviderConfig,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Arc<dyn TranslationProviderPort>, ProviderError> {
    let api_key = config.effective_api_key(env).unwrap_or_default();
    let model = config.model.as_str();
    let base_url = config.base_url.as_deref();

    let provider: Arc<dyn TranslationProviderPort> = match config.kind {
        ProviderKind::CloudChat => Arc::new(OpenAiProvider::new(api_key, model, base_url)?),
        ProviderKind::CloudMessages => Arc::new(ClaudeProvider::new(api_key, model, base_url)?),
        ProviderKind::LocalInference => Arc::new(OllamaProvider::new(model, base_url)?),
        ProviderKind::SdkBased => Arc::new(GeminiProvider::new(api_key, model, base_url)?),
    };

    info!(provider = provider.name(), "Translation provider constructed");
    Ok(provider)
}

/// Builds providers from the process environment.
#[derive(Default)]
pub struct ProviderFactory;

impl ProviderFactory {
    pub fn new() -> Self {
        Self
    }
}

impl ProviderFactoryPort for ProviderFactory {
    fn build(
        &self,
        config: &ProviderConfig,
    ) -> Result<Arc<dyn TranslationProviderPort>, ProviderError> {
        build_provider(config, |name| std::env::var(name).ok())
    }
}
