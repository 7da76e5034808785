//! System clipboard reader backed by `arboard`
//! 基于 arboard 的系统剪贴板读取

use async_trait::async_trait;
use ct_core::ports::{ClipboardError, ClipboardPort};
use tokio::task::spawn_blocking;
use tracing::debug;

/// Opens a fresh clipboard handle per read.
///
/// Non-text content (images, files) reads as an empty string so the job
/// skips it instead of failing.
#[derive(Debug, Default, Clone)]
pub struct ArboardClipboard;

impl ArboardClipboard {
    pub fn new() -> Self {
        Self
    }
}

fn read_blocking() -> Result<String, ClipboardError> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| ClipboardError::Read(e.to_string()))?;
    match clipboard.get_text() {
        Ok(text) => Ok(text),
        Err(arboard::Error::ContentNotAvailable) => {
            debug!("Clipboard holds no text content");
            Ok(String::new())
        }
        Err(e) => Err(ClipboardError::Read(e.to_string())),
    }
}

#[async_trait]
impl ClipboardPort for ArboardClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        spawn_blocking(read_blocking)
            .await
            .map_err(|e| ClipboardError::Read(format!("clipboard task failed: {e}")))?
    }
}
