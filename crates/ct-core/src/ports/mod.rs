//! Port interfaces for the application layer
//!
//! Ports define the contract between the orchestration logic (use cases)
//! and the infrastructure/platform implementations. The core stays
//! independent of HTTP clients, SQLite and OS APIs.

mod clipboard;
mod clock;
pub mod errors;
mod factory;
mod history;
mod hotkey;
mod notification;
mod provider;
mod settings;
mod spawner;

pub use clipboard::ClipboardPort;
pub use clock::ClockPort;
pub use errors::{
    ClipboardError, ConfigError, HistoryError, NotificationError, ProviderError,
};
pub use factory::{HistoryStoreFactoryPort, ProviderFactoryPort};
pub use history::HistoryStorePort;
pub use hotkey::HotkeyPort;
pub use notification::NotificationPort;
pub use provider::TranslationProviderPort;
pub use settings::SettingsPort;
pub use spawner::{BoxedJob, TaskSpawnerPort};

pub use tokio_util::sync::CancellationToken;
