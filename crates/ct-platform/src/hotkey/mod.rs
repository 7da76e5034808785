mod keymap;
mod manager;
#[cfg(windows)]
mod message_loop;

pub use keymap::{parse_key, to_hotkey};
pub use manager::GlobalHotkeyAdapter;
