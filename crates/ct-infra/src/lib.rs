pub mod db;
pub mod providers;
pub mod settings;
pub mod time;

pub use db::{SqliteHistoryStore, SqliteHistoryStoreFactory};
pub use providers::{build_provider, ProviderFactory};
pub use settings::FileSettingsRepository;
pub use time::SystemClock;
