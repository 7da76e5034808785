//! Dependency wiring
//! 依赖装配
//!
//! The only place that names concrete adapters. Everything past this point
//! sees ports.

use std::sync::Arc;

use anyhow::Context;
use ct_app::AppDeps;
use ct_infra::{FileSettingsRepository, ProviderFactory, SqliteHistoryStoreFactory, SystemClock};
use ct_platform::{ArboardClipboard, DesktopNotifier, GlobalHotkeyAdapter, TokioTaskSpawner};
use tokio::runtime::Handle;
use tracing::debug;

use super::paths::AppPaths;

pub struct WiredDeps {
    pub deps: AppDeps,
    /// Kept concrete so shutdown can close the event source.
    pub hotkey: Arc<GlobalHotkeyAdapter>,
}

pub fn build_deps(paths: &AppPaths, handle: Handle) -> anyhow::Result<WiredDeps> {
    debug!(
        config = %paths.config_file.display(),
        logs = %paths.logs_dir.display(),
        "Wiring dependencies"
    );

    let hotkey = Arc::new(GlobalHotkeyAdapter::new().context("start hotkey manager thread")?);

    let deps = AppDeps {
        settings: Arc::new(FileSettingsRepository::new(paths.config_file.clone())),
        provider_factory: Arc::new(ProviderFactory::new()),
        store_factory: Arc::new(SqliteHistoryStoreFactory::new(Some(paths.config_dir.clone()))),
        clipboard: Arc::new(ArboardClipboard::new()),
        notifier: Arc::new(DesktopNotifier::new()),
        hotkey: hotkey.clone(),
        clock: Arc::new(SystemClock),
        spawner: Arc::new(TokioTaskSpawner::new(handle)),
    };

    Ok(WiredDeps { deps, hotkey })
}
