use std::path::{Path, PathBuf};
use std::sync::Arc;

use ct_core::ports::{HistoryError, HistoryStoreFactoryPort, HistoryStorePort};
use ct_core::settings::defaults::DEFAULT_DATABASE_CONNECTION;
use ct_core::settings::model::{PersistenceConfig, PersistenceKind};

use crate::db::store::SqliteHistoryStore;

/// Builds history stores from the persistence section of the config.
///
/// Relative SQLite paths resolve against `base_dir` when one is set.
pub struct SqliteHistoryStoreFactory {
    base_dir: Option<PathBuf>,
}

impl SqliteHistoryStoreFactory {
    pub fn new(base_dir: Option<PathBuf>) -> Self {
        Self { base_dir }
    }

    pub fn resolve_connection(&self, connection: &str) -> String {
        let connection = connection.trim();
        let connection = if connection.is_empty() {
            DEFAULT_DATABASE_CONNECTION
        } else {
            connection
        };

        if connection == ":memory:" || connection.starts_with("file:") {
            return connection.to_string();
        }
        match &self.base_dir {
            Some(base) if Path::new(connection).is_relative() => {
                base.join(connection).to_string_lossy().into_owned()
            }
            _ => connection.to_string(),
        }
    }
}

impl HistoryStoreFactoryPort for SqliteHistoryStoreFactory {
    fn build(&self, config: &PersistenceConfig) -> Result<Arc<dyn HistoryStorePort>, HistoryError> {
        match config.kind {
            PersistenceKind::Sqlite => Ok(Arc::new(SqliteHistoryStore::new(
                self.resolve_connection(&config.connection),
            ))),
        }
    }
}
