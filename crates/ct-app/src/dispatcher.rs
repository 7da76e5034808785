//! Trigger dispatcher
//! 触发分发器
//!
//! Hotkey firings and HTTP refresh requests both end up in [`TriggerDispatcher::fire`],
//! which spawns one independent job per firing. Jobs are neither queued nor
//! coalesced; overlapping firings run concurrently and each records its own entry.

use std::fmt;
use std::sync::Arc;

use ct_core::ports::{HotkeyPort, TaskSpawnerPort};
use tracing::{debug, info};

use crate::usecases::TranslateClipboard;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerSource {
    Hotkey,
    Http,
}

impl fmt::Display for TriggerSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TriggerSource::Hotkey => "hotkey",
            TriggerSource::Http => "http",
        })
    }
}

#[derive(Clone)]
pub struct TriggerDispatcher {
    translate: Arc<TranslateClipboard>,
    spawner: Arc<dyn TaskSpawnerPort>,
}

impl TriggerDispatcher {
    pub fn new(translate: Arc<TranslateClipboard>, spawner: Arc<dyn TaskSpawnerPort>) -> Self {
        Self { translate, spawner }
    }

    /// Start a job and return immediately.
    pub fn fire(&self, source: TriggerSource) {
        debug!(%source, "Trigger fired");
        let translate = self.translate.clone();
        self.spawner.spawn(Box::pin(async move {
            translate.execute(source).await;
        }));
    }

    /// Block on the hotkey event source, firing a job per signal.
    ///
    /// Returns once the source is closed. Run this on a dedicated thread.
    pub fn run_hotkey_listener(&self, hotkey: Arc<dyn HotkeyPort>) {
        info!("Hotkey listener started");
        while hotkey.wait_for_trigger() {
            self.fire(TriggerSource::Hotkey);
        }
        info!("Hotkey listener stopped");
    }
}
