//! Integration tests for applying config updates at runtime.

mod common;

use std::sync::Arc;

use common::*;
use ct_app::usecases::{UpdateSettings, UpdateSettingsError};
use ct_app::{ActiveResources, Swap};
use ct_core::hotkey::{HotkeyBinding, Modifier};
use ct_core::ports::ProviderError;
use ct_core::settings::model::{ProviderKind, Settings};
use ct_core::SettingsPatch;
use mockall::Sequence;

struct Harness {
    resources: Arc<ActiveResources>,
    settings: Arc<MemorySettings>,
    providers: Arc<FakeProviderFactory>,
    stores: Arc<FakeStoreFactory>,
    provider: Arc<FakeProvider>,
    store: Arc<InMemoryStore>,
    usecase: UpdateSettings,
}

fn harness_with(initial: Settings, repo: Arc<MemorySettings>, hotkey: MockHotkey) -> Harness {
    init_tracing();
    let provider = FakeProvider::named("Initial");
    let store = InMemoryStore::ready();
    let resources = resources_with(initial, provider.clone(), store.clone());
    let providers = Arc::new(FakeProviderFactory::default());
    let stores = Arc::new(FakeStoreFactory::default());
    let usecase = UpdateSettings::new(
        resources.clone(),
        repo.clone(),
        Arc::new(hotkey),
        providers.clone(),
        stores.clone(),
    );
    Harness {
        resources,
        settings: repo,
        providers,
        stores,
        provider,
        store,
        usecase,
    }
}

fn harness(hotkey: MockHotkey) -> Harness {
    harness_with(Settings::default(), MemorySettings::with(None), hotkey)
}

fn quiet_hotkey() -> MockHotkey {
    let mut hotkey = MockHotkey::new();
    hotkey.expect_register().never();
    hotkey.expect_unregister().never();
    hotkey
}

#[tokio::test]
async fn unrelated_change_leaves_hotkey_provider_and_store_alone() {
    let h = harness(quiet_hotkey());
    let mut next = Settings::default();
    next.ui.theme = "dark".to_string();

    let applied = h.usecase.execute(next.clone()).await.unwrap();

    assert!(!applied.hotkey_rebound);
    assert_eq!(applied.provider, Swap::Unchanged);
    assert_eq!(applied.store, Swap::Unchanged);
    assert_eq!(h.providers.built(), 0);
    assert_eq!(h.stores.built(), 0);
    assert_eq!(h.settings.stored(), Some(next.clone()));
    assert_eq!(*h.resources.settings().await, next);
}

#[tokio::test]
async fn changed_binding_unregisters_once_then_registers_once() {
    let initial = Settings::default();
    let mut next = initial.clone();
    next.hotkeys.translate = HotkeyBinding::new([Modifier::Control, Modifier::Shift], "t");
    let expected = next.hotkeys.translate.clone();

    let mut hotkey = MockHotkey::new();
    let mut seq = Sequence::new();
    hotkey
        .expect_unregister()
        .times(1)
        .in_sequence(&mut seq)
        .return_const(());
    hotkey
        .expect_register()
        .withf(move |binding| *binding == expected)
        .times(1)
        .in_sequence(&mut seq)
        .return_const(true);

    let h = harness_with(initial, MemorySettings::with(None), hotkey);
    let applied = h.usecase.execute(next).await.unwrap();

    assert!(applied.hotkey_rebound);
}

#[tokio::test]
async fn reordered_modifiers_are_the_same_binding() {
    let mut initial = Settings::default();
    initial.hotkeys.translate = HotkeyBinding::new([Modifier::Control, Modifier::Alt], "t");
    let mut next = initial.clone();
    next.hotkeys.translate = HotkeyBinding::new([Modifier::Alt, Modifier::Control], "t");

    let h = harness_with(initial, MemorySettings::with(None), quiet_hotkey());
    let applied = h.usecase.execute(next).await.unwrap();

    assert!(!applied.hotkey_rebound);
}

#[tokio::test]
async fn clearing_the_binding_only_unregisters() {
    let mut hotkey = MockHotkey::new();
    hotkey.expect_unregister().times(1).return_const(());
    hotkey.expect_register().never();

    let h = harness(hotkey);
    let mut next = Settings::default();
    next.hotkeys.translate = HotkeyBinding::new([], "");

    let applied = h.usecase.execute(next).await.unwrap();

    assert!(applied.hotkey_rebound);
}

#[tokio::test]
async fn rejected_registration_still_applies_settings() {
    let mut hotkey = MockHotkey::new();
    hotkey.expect_unregister().times(1).return_const(());
    hotkey.expect_register().times(1).return_const(false);

    let h = harness(hotkey);
    let mut next = Settings::default();
    next.hotkeys.translate = HotkeyBinding::new([Modifier::Meta], "f9");

    let applied = h.usecase.execute(next.clone()).await.unwrap();

    assert!(applied.hotkey_rebound);
    assert_eq!(*h.resources.settings().await, next);
}

#[tokio::test]
async fn save_failure_changes_nothing() {
    let h = harness_with(Settings::default(), MemorySettings::failing_save(), quiet_hotkey());
    let mut next = Settings::default();
    next.provider.kind = ProviderKind::LocalInference;
    next.hotkeys.translate = HotkeyBinding::new([Modifier::Shift], "t");

    let err = h.usecase.execute(next).await.unwrap_err();

    assert!(matches!(err, UpdateSettingsError::Persist(_)));
    assert_eq!(*h.resources.settings().await, Settings::default());
    assert_eq!(h.providers.built(), 0);
    assert_eq!(h.provider.closed(), 0);
}

#[tokio::test]
async fn provider_change_swaps_and_closes_previous() {
    let h = harness(quiet_hotkey());
    let replacement = FakeProvider::named("Local");
    h.providers.next(Ok(replacement.clone()));
    let mut next = Settings::default();
    next.provider.kind = ProviderKind::LocalInference;
    next.provider.model = "qwen2:7b".to_string();

    let applied = h.usecase.execute(next.clone()).await.unwrap();

    assert_eq!(applied.provider, Swap::Swapped);
    assert_eq!(h.resources.provider().await.name(), "Local");
    assert_eq!(h.provider.closed(), 1);
    assert_eq!(replacement.closed(), 0);
    assert_eq!(h.providers.built.lock().unwrap()[0], next.provider);
}

#[tokio::test]
async fn provider_build_failure_keeps_previous_provider() {
    let h = harness(quiet_hotkey());
    h.providers
        .next(Err(ProviderError::InvalidCredentials("OpenAI".into())));
    let mut next = Settings::default();
    next.provider.kind = ProviderKind::CloudChat;

    let err = h.usecase.execute(next.clone()).await.unwrap_err();

    assert!(matches!(
        err,
        UpdateSettingsError::Reinitialization { component: "provider", .. }
    ));
    assert_eq!(h.resources.provider().await.name(), "Initial");
    assert_eq!(h.provider.closed(), 0);
    // The snapshot itself was saved and published before the swap.
    assert_eq!(*h.resources.settings().await, next);
}

#[tokio::test]
async fn new_persistence_target_switches_store() {
    let h = harness(quiet_hotkey());
    let replacement = Arc::new(InMemoryStore::default());
    h.stores.next(replacement.clone());
    let mut next = Settings::default();
    next.database.connection = "other.db".to_string();

    let applied = h.usecase.execute(next).await.unwrap();

    assert_eq!(applied.store, Swap::Swapped);
    assert!(*replacement.initialized.lock().unwrap());
    assert_eq!(h.store.closed(), 1);
    h.resources.store().await.count().await.unwrap();
}

#[tokio::test]
async fn retention_change_keeps_store_instance() {
    let h = harness(quiet_hotkey());
    let mut next = Settings::default();
    next.database.retention_ceiling = 5;

    let applied = h.usecase.execute(next).await.unwrap();

    assert_eq!(applied.store, Swap::Unchanged);
    assert_eq!(h.stores.built(), 0);
    assert_eq!(h.store.closed(), 0);
}

#[tokio::test]
async fn store_initialization_failure_keeps_previous_store() {
    let h = harness(quiet_hotkey());
    h.stores.next(Arc::new(InMemoryStore {
        fail_initialize: true,
        ..Default::default()
    }));
    let mut next = Settings::default();
    next.database.connection = "/nonexistent/dir/history.db".to_string();

    let err = h.usecase.execute(next).await.unwrap_err();

    assert!(matches!(
        err,
        UpdateSettingsError::Reinitialization { component: "history store", .. }
    ));
    assert_eq!(h.store.closed(), 0);
    assert_eq!(h.resources.store().await.count().await.unwrap(), 0);
}

#[tokio::test]
async fn concurrent_updates_are_serialized() {
    let h = harness(quiet_hotkey());
    let mut first = Settings::default();
    first.ui.port = 9001;
    let mut second = Settings::default();
    second.ui.port = 9002;

    let (a, b) = tokio::join!(h.usecase.execute(first), h.usecase.execute(second));
    a.unwrap();
    b.unwrap();

    let published = h.resources.settings().await;
    assert_eq!(h.settings.stored().as_ref(), Some(&*published));
    assert!([9001, 9002].contains(&published.ui.port));
    assert_eq!(h.settings.saves.load(std::sync::atomic::Ordering::SeqCst), 2);
}

#[tokio::test]
async fn patch_without_provider_section_keeps_the_active_provider() {
    let mut initial = Settings::default();
    initial.provider.kind = ProviderKind::CloudChat;
    initial.provider.api_key = "sk-stored".to_string();
    let h = harness_with(initial.clone(), MemorySettings::with(Some(initial.clone())), quiet_hotkey());
    let patch: SettingsPatch = serde_json::from_str(
        r#"{
            "api": {"gemini_key": "", "use_env_key": true},
            "ui": {"port": 8080, "theme": "dark", "start_minimized": true},
            "system": {"auto_start": false, "max_history_items": 7}
        }"#,
    )
    .unwrap();

    let applied = h.usecase.execute_patch(patch).await.unwrap();

    assert_eq!(applied.provider, Swap::Unchanged);
    assert_eq!(applied.store, Swap::Unchanged);
    let published = h.resources.settings().await;
    assert_eq!(published.provider, initial.provider);
    assert_eq!(published.database.retention_ceiling, 7);
    assert!(published.ui.start_minimized);
    assert!(!published.system.auto_start);
    assert_eq!(h.settings.stored().as_ref(), Some(&*published));
}

#[tokio::test]
async fn patch_with_redacted_key_keeps_the_stored_key() {
    let mut initial = Settings::default();
    initial.provider.api_key = "AIza-stored".to_string();
    let h = harness_with(initial.clone(), MemorySettings::with(Some(initial.clone())), quiet_hotkey());
    let mut shown = initial.redacted();
    shown.ui.theme = "dark".to_string();

    let applied = h.usecase.execute_patch(SettingsPatch::from(shown)).await.unwrap();

    assert_eq!(applied.provider, Swap::Unchanged);
    assert_eq!(h.providers.built(), 0);
    assert_eq!(h.resources.settings().await.provider.api_key, "AIza-stored");
}
