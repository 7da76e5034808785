use async_trait::async_trait;
use ct_core::ports::{CancellationToken, ProviderError, TranslationProviderPort};
use ct_core::translation::Direction;

/// Stands in when the configured provider cannot be constructed, so that
/// one provider is always active. Every call fails with the construction error.
pub struct UnconfiguredProvider {
    reason: String,
}

impl UnconfiguredProvider {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl TranslationProviderPort for UnconfiguredProvider {
    fn name(&self) -> &str {
        "Unconfigured"
    }

    async fn translate(
        &self,
        _cancel: &CancellationToken,
        _text: &str,
        _direction: Direction,
    ) -> Result<String, ProviderError> {
        Err(ProviderError::Provider(format!(
            "no translation provider configured: {}",
            self.reason
        )))
    }

    async fn close(&self) -> Result<(), ProviderError> {
        Ok(())
    }
}
