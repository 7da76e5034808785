//! # ct-core
//!
//! Core domain models and ports for cliptrans.
//!
//! This crate contains pure domain logic without any infrastructure dependencies.

pub mod hotkey;
pub mod language;
pub mod ports;
pub mod settings;
pub mod translation;

// Re-export commonly used types at the crate root
pub use hotkey::{HotkeyBinding, Modifier};
pub use language::detect;
pub use settings::model::{PersistenceConfig, PersistenceKind, ProviderConfig, ProviderKind, Settings};
pub use settings::patch::{SettingsPatch, REDACTED_API_KEY};
pub use translation::{Direction, TranslationRequest, TranslationResult};
