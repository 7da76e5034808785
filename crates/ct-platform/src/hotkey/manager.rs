//! Global hotkey adapter
//! 全局快捷键适配器
//!
//! The `GlobalHotKeyManager` lives on its own thread and is driven through a
//! command channel, so the adapter itself can be shared across threads.
//! Key events arrive on the crate-wide `GlobalHotKeyEvent` receiver.
//!
//! ## Platforms / 平台
//! - Windows: the manager thread pumps its Win32 message queue between
//!   commands, which is where `WM_HOTKEY` arrives.
//! - Linux (X11): `global-hotkey` runs its own event thread; nothing to pump.
//! - macOS: events need the main-thread run loop, which this service does not
//!   own, so the hotkey never fires there. The HTTP trigger still works.

use std::sync::{Mutex, PoisonError};
use std::thread;

use crossbeam_channel::{bounded, select, unbounded, Receiver, Sender};
use ct_core::hotkey::HotkeyBinding;
use ct_core::ports::HotkeyPort;
use global_hotkey::hotkey::HotKey;
use global_hotkey::{GlobalHotKeyEvent, GlobalHotKeyManager, HotKeyState};
use tracing::{debug, error, info, warn};

use super::keymap::to_hotkey;
#[cfg(windows)]
use super::message_loop;

enum Command {
    Register(HotKey, Sender<bool>),
    Unregister(Sender<()>),
}

pub struct GlobalHotkeyAdapter {
    commands: Sender<Command>,
    /// Id of the registered hotkey, if any.
    active: Mutex<Option<u32>>,
    stop_tx: Mutex<Option<Sender<()>>>,
    stop_rx: Receiver<()>,
}

impl GlobalHotkeyAdapter {
    pub fn new() -> std::io::Result<Self> {
        #[cfg(target_os = "macos")]
        warn!("Global hotkeys need the main-thread run loop on macOS; use the HTTP trigger");

        let (commands, receiver) = unbounded();
        thread::Builder::new()
            .name("hotkey-manager".into())
            .spawn(move || run_manager(receiver))?;

        let (stop_tx, stop_rx) = bounded(0);
        Ok(Self {
            commands,
            active: Mutex::new(None),
            stop_tx: Mutex::new(Some(stop_tx)),
            stop_rx,
        })
    }

    /// Wake any blocked [`HotkeyPort::wait_for_trigger`] and make it return `false`.
    pub fn close(&self) {
        let sender = self
            .stop_tx
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if sender.is_some() {
            debug!("Hotkey event source closed");
        }
    }

    fn set_active(&self, id: Option<u32>) {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner) = id;
    }

    fn active(&self) -> Option<u32> {
        *self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl HotkeyPort for GlobalHotkeyAdapter {
    fn register(&self, binding: &HotkeyBinding) -> bool {
        let Some(hotkey) = to_hotkey(binding) else {
            warn!(hotkey = %binding, "Unsupported hotkey binding");
            return false;
        };

        let (reply_tx, reply_rx) = bounded(1);
        if self.commands.send(Command::Register(hotkey, reply_tx)).is_err() {
            error!("Hotkey manager thread is gone");
            return false;
        }
        let registered = reply_rx.recv().unwrap_or(false);
        self.set_active(registered.then(|| hotkey.id()));
        registered
    }

    fn unregister(&self) {
        self.set_active(None);
        let (reply_tx, reply_rx) = bounded(1);
        if self.commands.send(Command::Unregister(reply_tx)).is_ok() {
            let _ = reply_rx.recv();
        }
    }

    fn wait_for_trigger(&self) -> bool {
        let events = GlobalHotKeyEvent::receiver();
        loop {
            select! {
                recv(events) -> event => match event {
                    Ok(event) if event.state() == HotKeyState::Pressed
                        && Some(event.id()) == self.active() => return true,
                    Ok(_) => {}
                    Err(_) => return false,
                },
                recv(self.stop_rx) -> _ => return false,
            }
        }
    }
}

fn run_manager(commands: Receiver<Command>) {
    let manager = match GlobalHotKeyManager::new() {
        Ok(manager) => Some(manager),
        Err(err) => {
            error!(error = %err, "Failed to create global hotkey manager");
            None
        }
    };
    let mut current: Option<HotKey> = None;

    while let Some(command) = next_command(&commands) {
        match command {
            Command::Register(hotkey, reply) => {
                let registered = match &manager {
                    Some(manager) => {
                        if let Some(previous) = current.take() {
                            if let Err(err) = manager.unregister(previous) {
                                warn!(error = %err, "Failed to release previous hotkey");
                            }
                        }
                        match manager.register(hotkey) {
                            Ok(()) => {
                                info!(id = hotkey.id(), "Global hotkey registered");
                                current = Some(hotkey);
                                true
                            }
                            Err(err) => {
                                warn!(error = %err, "Global hotkey registration rejected");
                                false
                            }
                        }
                    }
                    None => false,
                };
                let _ = reply.send(registered);
            }
            Command::Unregister(reply) => {
                if let (Some(manager), Some(previous)) = (&manager, current.take()) {
                    match manager.unregister(previous) {
                        Ok(()) => info!("Global hotkey unregistered"),
                        Err(err) => warn!(error = %err, "Failed to unregister global hotkey"),
                    }
                }
                let _ = reply.send(());
            }
        }
    }
    debug!("Hotkey manager thread exiting");
}

/// Next command, or `None` once every sender is gone.
#[cfg(windows)]
fn next_command(commands: &Receiver<Command>) -> Option<Command> {
    use crossbeam_channel::RecvTimeoutError;

    loop {
        message_loop::pump();
        match commands.recv_timeout(message_loop::POLL_INTERVAL) {
            Ok(command) => return Some(command),
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => return None,
        }
    }
}

/// Next command, or `None` once every sender is gone.
#[cfg(not(windows))]
fn next_command(commands: &Receiver<Command>) -> Option<Command> {
    commands.recv().ok()
}
