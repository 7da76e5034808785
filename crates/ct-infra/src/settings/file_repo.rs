use std::path::{Path, PathBuf};

use async_trait::async_trait;
use ct_core::ports::{ConfigError, SettingsPort};
use ct_core::settings::model::Settings;
use tokio::fs;
use tracing::info;

/// JSON settings file.
///
/// A missing file yields the defaults, which are written back so the user
/// has something to edit. Saves go through a temp file and a rename.
pub struct FileSettingsRepository {
    path: PathBuf,
}

impl FileSettingsRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> Option<&Path> {
        self.path.parent().filter(|dir| !dir.as_os_str().is_empty())
    }

    async fn ensure_parent_dir(&self) -> Result<(), ConfigError> {
        if let Some(dir) = self.dir() {
            fs::create_dir_all(dir).await.map_err(|e| {
                ConfigError::Io(format!("create settings dir failed: {}: {e}", dir.display()))
            })?;
        }
        Ok(())
    }

    /// Write to `<name>.json.tmp` next to the target, then rename over it.
    async fn atomic_write(&self, content: &str) -> Result<(), ConfigError> {
        self.ensure_parent_dir().await?;

        let tmp_path = self.path.with_extension("json.tmp");
        fs::write(&tmp_path, content).await.map_err(|e| {
            ConfigError::Io(format!("write temp settings failed: {}: {e}", tmp_path.display()))
        })?;

        // TODO: Windows 上 rename 覆盖可能不一致；macOS/Linux OK。
        fs::rename(&tmp_path, &self.path).await.map_err(|e| {
            ConfigError::Io(format!(
                "rename temp settings to target failed: {} -> {}: {e}",
                tmp_path.display(),
                self.path.display()
            ))
        })
    }
}

#[async_trait]
impl SettingsPort for FileSettingsRepository {
    async fn load(&self) -> Result<Settings, ConfigError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(s) => s,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                let defaults = Settings::default();
                self.save(&defaults).await?;
                info!(path = %self.path.display(), "Settings file missing, wrote defaults");
                return Ok(defaults);
            }
            Err(e) => {
                return Err(ConfigError::Io(format!(
                    "read settings failed: {}: {e}",
                    self.path.display()
                )))
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            ConfigError::Malformed(format!("{}: {e}", self.path.display()))
        })
    }

    async fn save(&self, settings: &Settings) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;

        self.atomic_write(&content).await
    }
}
