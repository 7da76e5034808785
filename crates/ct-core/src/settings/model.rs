use std::fmt;

use serde::{Deserialize, Serialize};

use crate::hotkey::HotkeyBinding;
use crate::settings::patch::SettingsPatch;

pub const CURRENT_SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotkeySettings {
    pub translate: HotkeyBinding,

    /// 仅保存给界面使用，服务本身不注册该快捷键
    #[serde(rename = "showHide", alias = "show_hide")]
    pub show_hide: HotkeyBinding,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProviderKind {
    /// Chat-completion style cloud API (OpenAI)
    #[serde(rename = "openai", alias = "cloud_chat")]
    CloudChat,
    /// Messages style cloud API (Claude)
    #[serde(rename = "claude", alias = "cloud_messages")]
    CloudMessages,
    /// Local HTTP inference server (Ollama)
    #[serde(rename = "ollama", alias = "local_inference")]
    LocalInference,
    /// SDK-based enterprise API (Gemini)
    #[default]
    #[serde(rename = "gemini", alias = "sdk_based")]
    SdkBased,
}

impl ProviderKind {
    /// Environment variable consulted when `use_env_key` is set.
    pub fn env_key(&self) -> Option<&'static str> {
        match self {
            ProviderKind::CloudChat => Some("OPENAI_API_KEY"),
            ProviderKind::CloudMessages => Some("ANTHROPIC_API_KEY"),
            ProviderKind::LocalInference => None,
            ProviderKind::SdkBased => Some("GEMINI_API_KEY"),
        }
    }

    pub fn requires_key(&self) -> bool {
        self.env_key().is_some()
    }
}

#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub use_env_key: bool,
}

impl ProviderConfig {
    /// The configured key, or the kind's environment variable when the
    /// configured key is empty and `use_env_key` is set.
    pub fn effective_api_key(&self, env: impl Fn(&str) -> Option<String>) -> Option<String> {
        let configured = self.api_key.trim();
        if !configured.is_empty() {
            return Some(configured.to_string());
        }
        if !self.use_env_key {
            return None;
        }
        self.kind
            .env_key()
            .and_then(env)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("kind", &self.kind)
            .field(
                "api_key",
                &if self.api_key.is_empty() { "" } else { "<redacted>" },
            )
            .field("model", &self.model)
            .field("base_url", &self.base_url)
            .field("use_env_key", &self.use_env_key)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PersistenceKind {
    Sqlite,
}

/// Where history lives and how much of it is kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistenceConfig {
    #[serde(rename = "type")]
    pub kind: PersistenceKind,
    pub connection: String,
    /// 0 表示不限制
    pub retention_ceiling: u32,
}

impl PersistenceConfig {
    pub fn target(&self) -> PersistenceTarget {
        PersistenceTarget {
            kind: self.kind,
            connection: self.connection.clone(),
        }
    }
}

/// The part of [`PersistenceConfig`] that identifies a store instance.
/// Changing only the retention ceiling keeps the same instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PersistenceTarget {
    pub kind: PersistenceKind,
    pub connection: String,
}

impl fmt::Display for PersistenceTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}:{}", self.kind, self.connection)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TranslationSettings {
    pub show_notification: bool,
    pub target_language: String,
    /// 仅供界面保存，服务不读取
    pub auto_translate: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub port: u16,
    pub theme: String,
    pub start_minimized: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSettings {
    pub auto_start: bool,
}

/// Config snapshot. Published atomically; every request reads one snapshot.
///
/// (De)serializes through [`SettingsPatch`], so sections missing from a file
/// fall back to defaults and the web UI's `api` / `system` sections are
/// understood.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "SettingsPatch", into = "SettingsPatch")]
pub struct Settings {
    pub schema_version: u32,
    pub hotkeys: HotkeySettings,
    pub provider: ProviderConfig,
    pub translation: TranslationSettings,
    pub ui: UiSettings,
    pub system: SystemSettings,
    pub database: PersistenceConfig,
}
