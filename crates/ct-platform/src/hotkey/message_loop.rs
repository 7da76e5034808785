//! Win32 message pump for the hotkey manager thread.
//!
//! `global-hotkey` delivers `WM_HOTKEY` through a hidden window owned by the
//! thread that created the manager, so that thread has to dispatch its
//! message queue.

use std::time::Duration;

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, PeekMessageW, TranslateMessage, MSG, PM_REMOVE,
};

/// How long the manager thread waits on its command channel between pumps.
pub const POLL_INTERVAL: Duration = Duration::from_millis(15);

/// Dispatch every message queued for the current thread without blocking.
pub fn pump() {
    let mut msg = MSG::default();
    // SAFETY: `msg` is a valid out-pointer for the duration of each call and
    // only messages of the calling thread are retrieved.
    unsafe {
        while PeekMessageW(&mut msg, HWND::default(), 0, 0, PM_REMOVE).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }
}
