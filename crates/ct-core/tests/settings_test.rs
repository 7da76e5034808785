//! Config snapshot deserialization: partial files fall back to defaults.

use ct_core::hotkey::{HotkeyBinding, Modifier};
use ct_core::settings::model::{PersistenceKind, ProviderConfig, ProviderKind, Settings};
use ct_core::SettingsPatch;

#[test]
fn empty_object_yields_defaults() {
    let settings: Settings = serde_json::from_str("{}").unwrap();
    assert_eq!(settings, Settings::default());
    assert_eq!(
        settings.hotkeys.translate,
        HotkeyBinding::new([Modifier::Control, Modifier::Alt], "t")
    );
    assert!(settings.hotkeys.show_hide.is_unbound());
    assert_eq!(settings.provider.kind, ProviderKind::SdkBased);
    assert_eq!(settings.database.kind, PersistenceKind::Sqlite);
    assert_eq!(settings.database.connection, "clipboard-translate.db");
    assert_eq!(settings.database.retention_ceiling, 100);
    assert!(settings.translation.show_notification);
    assert_eq!(settings.ui.port, 8080);
}

#[test]
fn partial_sections_keep_remaining_defaults() {
    let settings: Settings = serde_json::from_str(
        r#"{
            "hotkeys": {"showHide": {"modifiers": ["ctrl", "shift"], "key": "h"}},
            "provider": {"kind": "claude", "model": "claude-3-opus"},
            "database": {"max_history_items": 5}
        }"#,
    )
    .unwrap();

    assert_eq!(settings.hotkeys.translate, Settings::default().hotkeys.translate);
    assert_eq!(settings.hotkeys.show_hide.key, "h");
    assert_eq!(settings.provider.kind, ProviderKind::CloudMessages);
    assert_eq!(settings.provider.model, "claude-3-opus");
    assert!(settings.provider.use_env_key);
    assert_eq!(settings.database.retention_ceiling, 5);
    assert_eq!(settings.database.connection, "clipboard-translate.db");
}

#[test]
fn provider_kind_accepts_capability_names() {
    let config: ProviderConfig = serde_json::from_str(r#"{"kind": "local_inference"}"#).unwrap();
    assert_eq!(config.kind, ProviderKind::LocalInference);
    assert_eq!(
        serde_json::to_value(ProviderKind::LocalInference).unwrap(),
        serde_json::json!("ollama")
    );
}

#[test]
fn effective_api_key_prefers_configured_key() {
    let env = |name: &str| (name == "GEMINI_API_KEY").then(|| "env-key".to_string());

    let mut config = ProviderConfig::default();
    assert_eq!(config.effective_api_key(env).as_deref(), Some("env-key"));

    config.api_key = " file-key ".to_string();
    assert_eq!(config.effective_api_key(env).as_deref(), Some("file-key"));

    config.api_key.clear();
    config.use_env_key = false;
    assert_eq!(config.effective_api_key(env), None);
}

#[test]
fn debug_output_redacts_api_key() {
    let config = ProviderConfig {
        api_key: "sk-secret".to_string(),
        ..ProviderConfig::default()
    };
    let debug = format!("{config:?}");
    assert!(!debug.contains("sk-secret"));
    assert!(debug.contains("<redacted>"));
}

#[test]
fn retention_change_keeps_persistence_target() {
    let old = Settings::default();
    let mut new = old.clone();
    new.database.retention_ceiling = 10;
    assert_eq!(old.database.target(), new.database.target());

    new.database.connection = "other.db".to_string();
    assert_ne!(old.database.target(), new.database.target());
}

const WEB_UI_CONFIG: &str = r#"{
  "hotkeys": {
    "showHide": {"modifiers": ["control", "shift"], "key": ""},
    "translate": {"modifiers": ["control", "win"], "key": "y"}
  },
  "api": {"gemini_key": "AIza-from-file", "use_env_key": false},
  "translation": {"target_language": "zh-CN", "auto_translate": true, "show_notification": false},
  "ui": {"port": 9090, "theme": "dark"},
  "system": {"auto_start": false, "max_history_items": 25},
  "database": {"type": "sqlite", "connection": "clipboard-translate.db"}
}"#;

#[test]
fn web_ui_layout_loads_into_a_gemini_provider() {
    let settings: Settings = serde_json::from_str(WEB_UI_CONFIG).unwrap();

    assert_eq!(settings.provider.kind, ProviderKind::SdkBased);
    assert_eq!(settings.provider.api_key, "AIza-from-file");
    assert!(!settings.provider.use_env_key);
    assert_eq!(settings.database.retention_ceiling, 25);
    assert_eq!(
        settings.hotkeys.translate,
        HotkeyBinding::new([Modifier::Control, Modifier::Meta], "y")
    );
    assert!(settings.translation.auto_translate);
    assert!(!settings.translation.show_notification);
    assert!(!settings.system.auto_start);
    assert_eq!(settings.ui.port, 9090);
}

#[test]
fn serialized_settings_carry_the_web_ui_sections() {
    let settings: Settings = serde_json::from_str(WEB_UI_CONFIG).unwrap();
    let value = serde_json::to_value(&settings).unwrap();

    assert_eq!(value["api"]["gemini_key"], "AIza-from-file");
    assert_eq!(value["api"]["use_env_key"], false);
    assert_eq!(value["system"]["max_history_items"], 25);
    assert_eq!(value["system"]["auto_start"], false);
    assert_eq!(value["ui"]["start_minimized"], false);
    assert_eq!(value["hotkeys"]["translate"]["modifiers"], serde_json::json!(["control", "win"]));

    let reloaded: Settings = serde_json::from_value(value).unwrap();
    assert_eq!(reloaded, settings);
}

#[test]
fn web_ui_patch_keeps_provider_and_database() {
    let mut current = Settings::default();
    current.provider.kind = ProviderKind::CloudMessages;
    current.provider.api_key = "sk-ant-stored".to_string();
    current.database.connection = "/data/history.db".to_string();

    let mut patch: SettingsPatch = serde_json::from_str(WEB_UI_CONFIG).unwrap();
    patch.database = None;
    let next = current.patched(patch);

    assert_eq!(next.provider, current.provider);
    assert_eq!(next.database.connection, "/data/history.db");
    assert_eq!(next.database.retention_ceiling, 25);
    assert_eq!(next.ui.theme, "dark");
}

#[test]
fn api_section_updates_a_gemini_provider() {
    let mut current = Settings::default();
    current.provider.model = "gemini-1.5-flash".to_string();

    let patch: SettingsPatch =
        serde_json::from_str(r#"{"api": {"gemini_key": "AIza-new", "use_env_key": false}}"#).unwrap();
    let next = current.patched(patch);

    assert_eq!(next.provider.api_key, "AIza-new");
    assert!(!next.provider.use_env_key);
    assert_eq!(next.provider.model, "gemini-1.5-flash");

    let cleared: SettingsPatch =
        serde_json::from_str(r#"{"api": {"gemini_key": "", "use_env_key": false}}"#).unwrap();
    assert!(next.patched(cleared).provider.use_env_key);
}

#[test]
fn explicit_retention_wins_over_system_section() {
    let patch: SettingsPatch = serde_json::from_str(
        r#"{"system": {"max_history_items": 25}, "database": {"retention_ceiling": 0}}"#,
    )
    .unwrap();

    assert_eq!(Settings::default().patched(patch).database.retention_ceiling, 0);
}
