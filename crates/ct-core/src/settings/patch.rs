//! Section-level config updates
//! 分段配置合并
//!
//! [`SettingsPatch`] is the on-disk and wire form of [`Settings`]. Every
//! section is optional and [`Settings::patched`] keeps the base value of any
//! section the patch leaves out.
//!
//! The web UI's layout is read as well:
//! - `api.gemini_key` / `api.use_env_key` update the provider while it is
//!   Gemini, unless the patch also carries a `provider` section
//! - `system.max_history_items` sets the retention ceiling unless
//!   `database.retention_ceiling` is present
//!
//! Both are written back as mirrors of the canonical fields.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::model::{
    HotkeySettings, PersistenceKind, ProviderConfig, ProviderKind, Settings, TranslationSettings,
    UiSettings,
};

/// Stands in for a stored API key in responses. Sending it back keeps the
/// stored key.
pub const REDACTED_API_KEY: &str = "********";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsPatch {
    pub schema_version: Option<u32>,
    pub hotkeys: Option<HotkeySettings>,
    pub provider: Option<ProviderConfig>,
    pub api: Option<ApiSection>,
    pub translation: Option<TranslationSettings>,
    pub ui: Option<UiSettings>,
    pub system: Option<SystemSection>,
    pub database: Option<DatabasePatch>,
}

/// `api` section of the web UI (Gemini only).
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiSection {
    pub gemini_key: Option<String>,
    pub use_env_key: Option<bool>,
}

impl fmt::Debug for ApiSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiSection")
            .field("gemini_key", &self.gemini_key.as_ref().map(|_| "<redacted>"))
            .field("use_env_key", &self.use_env_key)
            .finish()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SystemSection {
    pub auto_start: Option<bool>,
    pub max_history_items: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabasePatch {
    #[serde(rename = "type")]
    pub kind: Option<PersistenceKind>,
    pub connection: Option<String>,
    #[serde(alias = "max_history_items")]
    pub retention_ceiling: Option<u32>,
}

impl Settings {
    /// `self` with every section present in `patch` replaced.
    pub fn patched(&self, patch: SettingsPatch) -> Settings {
        let mut next = self.clone();

        if let Some(version) = patch.schema_version {
            next.schema_version = version;
        }
        if let Some(hotkeys) = patch.hotkeys {
            next.hotkeys = hotkeys;
        }

        match (patch.provider, patch.api) {
            (Some(provider), _) => next.provider = provider,
            (None, Some(api)) if next.provider.kind == ProviderKind::SdkBased => {
                if let Some(key) = api.gemini_key {
                    next.provider.api_key = key;
                }
                if let Some(use_env_key) = api.use_env_key {
                    next.provider.use_env_key = use_env_key;
                }
                // Without a key the environment is the only source left.
                if next.provider.api_key.is_empty() {
                    next.provider.use_env_key = true;
                }
            }
            _ => {}
        }
        if next.provider.api_key == REDACTED_API_KEY {
            next.provider.api_key = self.provider.api_key.clone();
        }

        if let Some(translation) = patch.translation {
            next.translation = translation;
        }
        if let Some(ui) = patch.ui {
            next.ui = ui;
        }

        let system = patch.system.unwrap_or_default();
        if let Some(auto_start) = system.auto_start {
            next.system.auto_start = auto_start;
        }

        let database = patch.database.unwrap_or_default();
        if let Some(kind) = database.kind {
            next.database.kind = kind;
        }
        if let Some(connection) = database.connection {
            next.database.connection = connection;
        }
        if let Some(ceiling) = database.retention_ceiling.or(system.max_history_items) {
            next.database.retention_ceiling = ceiling;
        }

        next
    }

    /// Copy for clients: a non-empty API key is replaced by [`REDACTED_API_KEY`].
    pub fn redacted(&self) -> Settings {
        let mut copy = self.clone();
        if !copy.provider.api_key.is_empty() {
            copy.provider.api_key = REDACTED_API_KEY.to_string();
        }
        copy
    }
}

impl From<SettingsPatch> for Settings {
    fn from(patch: SettingsPatch) -> Self {
        Settings::default().patched(patch)
    }
}

impl From<Settings> for SettingsPatch {
    fn from(settings: Settings) -> Self {
        let gemini_key = match settings.provider.kind {
            ProviderKind::SdkBased => settings.provider.api_key.clone(),
            _ => String::new(),
        };

        SettingsPatch {
            schema_version: Some(settings.schema_version),
            hotkeys: Some(settings.hotkeys),
            api: Some(ApiSection {
                gemini_key: Some(gemini_key),
                use_env_key: Some(settings.provider.use_env_key),
            }),
            provider: Some(settings.provider),
            translation: Some(settings.translation),
            ui: Some(settings.ui),
            system: Some(SystemSection {
                auto_start: Some(settings.system.auto_start),
                max_history_items: Some(settings.database.retention_ceiling),
            }),
            database: Some(DatabasePatch {
                kind: Some(settings.database.kind),
                connection: Some(settings.database.connection),
                retention_ceiling: Some(settings.database.retention_ceiling),
            }),
        }
    }
}
