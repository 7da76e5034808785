//! # ct-platform
//!
//! OS-facing adapters for the ports declared in `ct-core`.
//! 面向操作系统的端口适配器。

pub mod clipboard;
pub mod hotkey;
pub mod notification;
pub mod runtime;

pub use clipboard::ArboardClipboard;
pub use hotkey::GlobalHotkeyAdapter;
pub use notification::DesktopNotifier;
pub use runtime::TokioTaskSpawner;
