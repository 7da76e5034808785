use async_trait::async_trait;

use super::errors::NotificationError;

#[async_trait]
pub trait NotificationPort: Send + Sync {
    async fn push(&self, title: &str, message: &str) -> Result<(), NotificationError>;
}
