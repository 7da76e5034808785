use std::sync::Arc;

use ct_core::ports::HistoryError;
use tracing::{info, info_span, Instrument};

use crate::resources::ActiveResources;

pub struct ClearHistory {
    resources: Arc<ActiveResources>,
}

impl ClearHistory {
    pub fn new(resources: Arc<ActiveResources>) -> Self {
        Self { resources }
    }

    pub async fn execute(&self) -> Result<(), HistoryError> {
        let span = info_span!("usecase.clear_history.execute");

        async {
            let store = self.resources.store().await;
            store.clear().await?;
            info!("History cleared on request");
            Ok(())
        }
        .instrument(span)
        .await
    }
}
