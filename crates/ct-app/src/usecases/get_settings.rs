//! Use case for reading the published config snapshot
//! 读取当前配置快照的用例

use std::sync::Arc;

use ct_core::settings::model::Settings;
use tracing::{debug, info_span, Instrument};

use crate::resources::ActiveResources;

/// Returns the snapshot currently in effect, not the file on disk.
pub struct GetSettings {
    resources: Arc<ActiveResources>,
}

impl GetSettings {
    pub fn new(resources: Arc<ActiveResources>) -> Self {
        Self { resources }
    }

    pub async fn execute(&self) -> Arc<Settings> {
        let span = info_span!("usecase.get_settings.execute");

        async {
            let settings = self.resources.settings().await;
            debug!(schema_version = settings.schema_version, "Settings snapshot retrieved");
            settings
        }
        .instrument(span)
        .await
    }
}
