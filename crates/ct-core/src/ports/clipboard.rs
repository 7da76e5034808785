use async_trait::async_trait;

use super::errors::ClipboardError;

#[async_trait]
pub trait ClipboardPort: Send + Sync {
    /// Current clipboard text. An empty string means there is nothing to translate.
    async fn read_text(&self) -> Result<String, ClipboardError>;
}
