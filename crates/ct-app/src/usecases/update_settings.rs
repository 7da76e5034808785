//! Use case for applying a new config snapshot
//! 应用新配置快照的用例

use std::sync::Arc;

use ct_core::hotkey::HotkeyBinding;
use ct_core::ports::{
    ConfigError, HistoryStoreFactoryPort, HotkeyPort, ProviderFactoryPort, SettingsPort,
};
use ct_core::settings::model::Settings;
use ct_core::settings::patch::SettingsPatch;
use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};

use crate::resources::{ActiveResources, Swap};

#[derive(Debug, Error)]
pub enum UpdateSettingsError {
    #[error("failed to persist settings: {0}")]
    Persist(#[from] ConfigError),

    #[error("failed to reinitialize {component}: {message}")]
    Reinitialization {
        component: &'static str,
        message: String,
    },
}

/// What an update actually changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppliedChanges {
    pub hotkey_rebound: bool,
    pub provider: Swap,
    pub store: Swap,
}

/// Use case for updating application settings.
///
/// ## Behavior / 行为
/// 1. Persists the full snapshot through the settings port; nothing else
///    happens if that fails
/// 2. Publishes the snapshot
/// 3. Re-registers the translate hotkey if its binding changed
///    (registration failure is logged, not returned)
/// 4. Swaps the provider if its config changed
/// 5. Re-points history if the persistence target changed
///
/// Steps 4 and 5 keep the previous instance active on failure and report
/// `Reinitialization`. The snapshot stays published either way.
pub struct UpdateSettings {
    resources: Arc<ActiveResources>,
    settings: Arc<dyn SettingsPort>,
    hotkey: Arc<dyn HotkeyPort>,
    providers: Arc<dyn ProviderFactoryPort>,
    stores: Arc<dyn HistoryStoreFactoryPort>,
}

impl UpdateSettings {
    pub fn new(
        resources: Arc<ActiveResources>,
        settings: Arc<dyn SettingsPort>,
        hotkey: Arc<dyn HotkeyPort>,
        providers: Arc<dyn ProviderFactoryPort>,
        stores: Arc<dyn HistoryStoreFactoryPort>,
    ) -> Self {
        Self {
            resources,
            settings,
            hotkey,
            providers,
            stores,
        }
    }

    pub async fn execute(&self, settings: Settings) -> Result<AppliedChanges, UpdateSettingsError> {
        let span = info_span!("usecase.update_settings.execute");

        async {
            let _guard = self.resources.reconfigure_guard().await;
            let old = self.resources.settings().await;
            self.apply(old, settings).await
        }
        .instrument(span)
        .await
    }

    /// Like [`execute`](Self::execute), with `patch` merged over the current
    /// snapshot while the reconfigure guard is held.
    pub async fn execute_patch(
        &self,
        patch: SettingsPatch,
    ) -> Result<AppliedChanges, UpdateSettingsError> {
        let span = info_span!("usecase.update_settings.execute_patch");

        async {
            let _guard = self.resources.reconfigure_guard().await;
            let old = self.resources.settings().await;
            let settings = old.patched(patch);
            self.apply(old, settings).await
        }
        .instrument(span)
        .await
    }

    async fn apply(
        &self,
        old: Arc<Settings>,
        settings: Settings,
    ) -> Result<AppliedChanges, UpdateSettingsError> {
        let changes = SettingsDiff::diff(&old, &settings);
        info!(changed_fields = %changes.to_log_string(), "Updating application settings");

        self.settings.save(&settings).await?;

        let new = Arc::new(settings);
        self.resources.publish_settings(new.clone()).await;

        let hotkey_rebound = if old.hotkeys.translate != new.hotkeys.translate {
            rebind_hotkey(self.hotkey.clone(), new.hotkeys.translate.clone()).await;
            true
        } else {
            false
        };

        let provider = self
            .resources
            .swap_provider(self.providers.as_ref(), &new.provider)
            .await
            .map_err(|err| {
                error!(error = %err, "Provider reinitialization failed, keeping previous provider");
                UpdateSettingsError::Reinitialization {
                    component: "provider",
                    message: err.to_string(),
                }
            });

        let store = self
            .resources
            .swap_store(self.stores.as_ref(), &new.database)
            .await
            .map_err(|err| {
                error!(error = %err, "History store reinitialization failed, keeping previous store");
                UpdateSettingsError::Reinitialization {
                    component: "history store",
                    message: err.to_string(),
                }
            });

        let applied = AppliedChanges {
            hotkey_rebound,
            provider: provider?,
            store: store?,
        };
        info!(?applied, "Settings updated successfully");
        Ok(applied)
    }
}

/// Unregister the old binding, then register `binding` unless it is unbound.
async fn rebind_hotkey(hotkey: Arc<dyn HotkeyPort>, binding: HotkeyBinding) {
    let rebound = tokio::task::spawn_blocking(move || {
        hotkey.unregister();
        binding.is_unbound() || hotkey.register(&binding)
    })
    .await;

    match rebound {
        Ok(true) => info!("Translate hotkey re-registered"),
        Ok(false) => warn!("Failed to register new translate hotkey; HTTP trigger still available"),
        Err(err) => warn!(error = %err, "Hotkey re-registration task failed"),
    }
}

/// Represents the difference between two config snapshots
struct SettingsDiff {
    parts: Vec<String>,
}

impl SettingsDiff {
    fn diff(old: &Settings, new: &Settings) -> Self {
        let mut parts = Vec::new();
        let mut field = |name: &str, changed: Option<(String, String)>| {
            if let Some((old, new)) = changed {
                parts.push(format!("{name}: {old} → {new}"));
            }
        };

        field(
            "hotkeys.translate",
            (old.hotkeys.translate != new.hotkeys.translate)
                .then(|| (old.hotkeys.translate.to_string(), new.hotkeys.translate.to_string())),
        );
        field(
            "hotkeys.showHide",
            (old.hotkeys.show_hide != new.hotkeys.show_hide)
                .then(|| (old.hotkeys.show_hide.to_string(), new.hotkeys.show_hide.to_string())),
        );
        field(
            "provider.kind",
            (old.provider.kind != new.provider.kind)
                .then(|| (format!("{:?}", old.provider.kind), format!("{:?}", new.provider.kind))),
        );
        field(
            "provider.model",
            (old.provider.model != new.provider.model)
                .then(|| (old.provider.model.clone(), new.provider.model.clone())),
        );
        field(
            "provider.base_url",
            (old.provider.base_url != new.provider.base_url).then(|| {
                (
                    format!("{:?}", old.provider.base_url),
                    format!("{:?}", new.provider.base_url),
                )
            }),
        );
        // Keys are never logged, only the fact that one changed.
        field(
            "provider.api_key",
            (old.provider.api_key != new.provider.api_key)
                .then(|| ("<redacted>".to_string(), "<redacted>".to_string())),
        );
        field(
            "provider.use_env_key",
            (old.provider.use_env_key != new.provider.use_env_key).then(|| {
                (
                    old.provider.use_env_key.to_string(),
                    new.provider.use_env_key.to_string(),
                )
            }),
        );
        field(
            "translation.show_notification",
            (old.translation.show_notification != new.translation.show_notification).then(|| {
                (
                    old.translation.show_notification.to_string(),
                    new.translation.show_notification.to_string(),
                )
            }),
        );
        field(
            "translation.target_language",
            (old.translation.target_language != new.translation.target_language).then(|| {
                (
                    old.translation.target_language.clone(),
                    new.translation.target_language.clone(),
                )
            }),
        );
        field(
            "ui.port",
            (old.ui.port != new.ui.port).then(|| (old.ui.port.to_string(), new.ui.port.to_string())),
        );
        field(
            "ui.theme",
            (old.ui.theme != new.ui.theme).then(|| (old.ui.theme.clone(), new.ui.theme.clone())),
        );
        field(
            "translation.auto_translate",
            (old.translation.auto_translate != new.translation.auto_translate).then(|| {
                (
                    old.translation.auto_translate.to_string(),
                    new.translation.auto_translate.to_string(),
                )
            }),
        );
        field(
            "ui.start_minimized",
            (old.ui.start_minimized != new.ui.start_minimized)
                .then(|| (old.ui.start_minimized.to_string(), new.ui.start_minimized.to_string())),
        );
        field(
            "system.auto_start",
            (old.system.auto_start != new.system.auto_start)
                .then(|| (old.system.auto_start.to_string(), new.system.auto_start.to_string())),
        );
        field(
            "database.target",
            (old.database.target() != new.database.target())
                .then(|| (old.database.target().to_string(), new.database.target().to_string())),
        );
        field(
            "database.retention_ceiling",
            (old.database.retention_ceiling != new.database.retention_ceiling).then(|| {
                (
                    old.database.retention_ceiling.to_string(),
                    new.database.retention_ceiling.to_string(),
                )
            }),
        );

        Self { parts }
    }

    fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    fn to_log_string(&self) -> String {
        if self.is_empty() {
            "(no changes)".to_string()
        } else {
            self.parts.join(", ")
        }
    }
}
