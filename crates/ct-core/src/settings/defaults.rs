use super::model::*;
use crate::hotkey::{HotkeyBinding, Modifier};

pub const DEFAULT_DATABASE_CONNECTION: &str = "clipboard-translate.db";
pub const DEFAULT_RETENTION_CEILING: u32 = 100;
pub const DEFAULT_UI_PORT: u16 = 8080;

impl Default for HotkeySettings {
    fn default() -> Self {
        Self {
            translate: HotkeyBinding::new([Modifier::Control, Modifier::Alt], "t"),
            show_hide: HotkeyBinding::new([Modifier::Control, Modifier::Shift], ""),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            kind: ProviderKind::default(),
            api_key: String::new(),
            model: String::new(),
            base_url: None,
            use_env_key: true,
        }
    }
}

impl Default for PersistenceConfig {
    fn default() -> Self {
        Self {
            kind: PersistenceKind::Sqlite,
            connection: DEFAULT_DATABASE_CONNECTION.to_string(),
            retention_ceiling: DEFAULT_RETENTION_CEILING,
        }
    }
}

impl Default for TranslationSettings {
    fn default() -> Self {
        Self {
            show_notification: true,
            target_language: "zh-CN".to_string(),
            auto_translate: false,
        }
    }
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            port: DEFAULT_UI_PORT,
            theme: "light".to_string(),
            start_minimized: false,
        }
    }
}

impl Default for SystemSettings {
    fn default() -> Self {
        Self { auto_start: true }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            hotkeys: HotkeySettings::default(),
            provider: ProviderConfig::default(),
            translation: TranslationSettings::default(),
            ui: UiSettings::default(),
            system: SystemSettings::default(),
            database: PersistenceConfig::default(),
        }
    }
}
