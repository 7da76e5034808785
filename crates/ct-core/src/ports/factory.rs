use std::sync::Arc;

use super::errors::{HistoryError, ProviderError};
use super::history::HistoryStorePort;
use super::provider::TranslationProviderPort;
use crate::settings::model::{PersistenceConfig, ProviderConfig};

/// Builds provider instances for hot-swapping.
pub trait ProviderFactoryPort: Send + Sync {
    fn build(&self, config: &ProviderConfig)
        -> Result<Arc<dyn TranslationProviderPort>, ProviderError>;
}

/// Builds history store instances. The returned store is not yet initialized.
pub trait HistoryStoreFactoryPort: Send + Sync {
    fn build(&self, config: &PersistenceConfig) -> Result<Arc<dyn HistoryStorePort>, HistoryError>;
}
