use crate::hotkey::HotkeyBinding;

/// OS-level global shortcut for the translate action.
///
/// At most one binding is registered at a time.
pub trait HotkeyPort: Send + Sync {
    /// Register `binding`. Returns `false` on failure.
    fn register(&self, binding: &HotkeyBinding) -> bool;

    /// Drop the current registration, if any.
    fn unregister(&self);

    /// Block until the registered shortcut fires.
    ///
    /// Returns `false` once the event source is closed.
    fn wait_for_trigger(&self) -> bool;
}
