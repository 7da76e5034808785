use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use super::errors::ProviderError;
use crate::translation::Direction;

/// A translation backend.
///
/// Each implementation owns its own retry policy; callers never retry.
#[async_trait]
pub trait TranslationProviderPort: Send + Sync {
    /// Display name, e.g. `"Gemini"`.
    fn name(&self) -> &str;

    /// Translate `text` in `direction`.
    ///
    /// Returns `ProviderError::Cancelled` once `cancel` fires, and
    /// `ProviderError::NoResult` instead of an empty string.
    async fn translate(
        &self,
        cancel: &CancellationToken,
        text: &str,
        direction: Direction,
    ) -> Result<String, ProviderError>;

    /// Release the backend. Called once after the instance is swapped out.
    async fn close(&self) -> Result<(), ProviderError>;
}
