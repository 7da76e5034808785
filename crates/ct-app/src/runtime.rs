//! Application runtime
//! 应用运行时
//!
//! [`AppRuntime::start`] loads the config snapshot, brings up the provider
//! and history store, and registers the translate hotkey. [`UseCases`]
//! wires ports to use cases so callers never touch [`AppDeps`] directly.

use std::sync::Arc;

use anyhow::{Context, Result};
use ct_core::ports::{CancellationToken, TranslationProviderPort};
use ct_core::settings::model::Settings;
use tracing::{error, info, info_span, warn, Instrument};

use crate::deps::AppDeps;
use crate::dispatcher::TriggerDispatcher;
use crate::resources::ActiveResources;
use crate::unconfigured::UnconfiguredProvider;
use crate::usecases::{ClearHistory, GetSettings, ListHistory, TranslateClipboard, UpdateSettings};

pub struct AppRuntime {
    pub deps: AppDeps,
    resources: Arc<ActiveResources>,
    shutdown: CancellationToken,
}

impl AppRuntime {
    /// Bring the runtime up.
    ///
    /// ## Behavior / 行为
    /// - Unreadable or malformed settings fall back to the defaults
    /// - A provider that cannot be constructed is replaced by
    ///   [`UnconfiguredProvider`]; jobs then record the failure
    /// - A history store that cannot be initialized aborts startup
    /// - Hotkey registration failure is logged; the HTTP trigger still works
    pub async fn start(deps: AppDeps) -> Result<Arc<Self>> {
        let span = info_span!("runtime.start");

        async {
            let settings = match deps.settings.load().await {
                Ok(settings) => settings,
                Err(err) => {
                    warn!(error = %err, "Failed to load settings, using defaults");
                    Settings::default()
                }
            };

            let provider: Arc<dyn TranslationProviderPort> =
                match deps.provider_factory.build(&settings.provider) {
                    Ok(provider) => provider,
                    Err(err) => {
                        error!(error = %err, "Failed to construct translation provider");
                        Arc::new(UnconfiguredProvider::new(err.to_string()))
                    }
                };

            let store = deps
                .store_factory
                .build(&settings.database)
                .context("build history store")?;
            store
                .initialize()
                .await
                .context("initialize history store")?;

            let binding = settings.hotkeys.translate.clone();
            if !binding.is_unbound() {
                let hotkey = deps.hotkey.clone();
                let shown = binding.to_string();
                let registered =
                    tokio::task::spawn_blocking(move || hotkey.register(&binding)).await;
                match registered {
                    Ok(true) => info!(hotkey = %shown, "Translate hotkey registered"),
                    _ => warn!(
                        hotkey = %shown,
                        "Failed to register translate hotkey; HTTP trigger still available"
                    ),
                }
            }

            info!(provider = provider.name(), "Runtime started");
            Ok(Arc::new(Self {
                resources: Arc::new(ActiveResources::new(settings, provider, store)),
                deps,
                shutdown: CancellationToken::new(),
            }))
        }
        .instrument(span)
        .await
    }

    pub fn resources(&self) -> &Arc<ActiveResources> {
        &self.resources
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }

    /// Fire-and-forget: in-flight jobs are not awaited, their provider calls
    /// are cancelled. Then the hotkey is released and resources closed.
    pub async fn shutdown(&self) {
        info!("Shutting down runtime");
        self.shutdown.cancel();

        let hotkey = self.deps.hotkey.clone();
        if let Err(err) = tokio::task::spawn_blocking(move || hotkey.unregister()).await {
            warn!(error = %err, "Failed to unregister hotkey");
        }
        self.resources.close().await;
    }
}

/// Use case accessor for AppRuntime.
/// AppRuntime 的用例访问器。
pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    pub fn translate_clipboard(&self) -> TranslateClipboard {
        TranslateClipboard::new(
            self.runtime.resources.clone(),
            self.runtime.deps.clipboard.clone(),
            self.runtime.deps.notifier.clone(),
            self.runtime.deps.clock.clone(),
            self.runtime.shutdown.clone(),
        )
    }

    pub fn dispatcher(&self) -> TriggerDispatcher {
        TriggerDispatcher::new(
            Arc::new(self.translate_clipboard()),
            self.runtime.deps.spawner.clone(),
        )
    }

    pub fn list_history(&self) -> ListHistory {
        ListHistory::new(self.runtime.resources.clone())
    }

    pub fn clear_history(&self) -> ClearHistory {
        ClearHistory::new(self.runtime.resources.clone())
    }

    pub fn get_settings(&self) -> GetSettings {
        GetSettings::new(self.runtime.resources.clone())
    }

    pub fn update_settings(&self) -> UpdateSettings {
        UpdateSettings::new(
            self.runtime.resources.clone(),
            self.runtime.deps.settings.clone(),
            self.runtime.deps.hotkey.clone(),
            self.runtime.deps.provider_factory.clone(),
            self.runtime.deps.store_factory.clone(),
        )
    }
}
