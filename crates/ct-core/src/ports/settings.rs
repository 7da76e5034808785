use async_trait::async_trait;

use super::errors::ConfigError;
use crate::settings::model::Settings;

#[async_trait]
pub trait SettingsPort: Send + Sync {
    async fn load(&self) -> Result<Settings, ConfigError>;
    async fn save(&self, settings: &Settings) -> Result<(), ConfigError>;
}
