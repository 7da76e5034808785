use std::sync::Arc;

use ct_core::ports::HistoryError;
use ct_core::translation::TranslationResult;
use tracing::{debug, info_span, Instrument};

use crate::resources::ActiveResources;

/// Lists history from the active store, newest first.
pub struct ListHistory {
    resources: Arc<ActiveResources>,
}

impl ListHistory {
    pub fn new(resources: Arc<ActiveResources>) -> Self {
        Self { resources }
    }

    pub async fn execute(&self) -> Result<Vec<TranslationResult>, HistoryError> {
        let span = info_span!("usecase.list_history.execute");

        async {
            let store = self.resources.store().await;
            let entries = store.list().await?;
            debug!(count = entries.len(), "History listed");
            Ok(entries)
        }
        .instrument(span)
        .await
    }
}
