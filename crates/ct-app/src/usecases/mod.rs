//! Use cases
//!
//! [TriggerDispatcher]
//!        ↓
//! TranslateClipboard  → capture → detect → translate → persist → notify
//!
//! [HTTP]
//!        ↓
//! ListHistory / ClearHistory / GetSettings / UpdateSettings

pub mod clear_history;
pub mod get_settings;
pub mod list_history;
pub mod translate_clipboard;
pub mod update_settings;

pub use clear_history::ClearHistory;
pub use get_settings::GetSettings;
pub use list_history::ListHistory;
pub use translate_clipboard::{JobOutcome, TranslateClipboard};
pub use update_settings::{AppliedChanges, UpdateSettings, UpdateSettingsError};
