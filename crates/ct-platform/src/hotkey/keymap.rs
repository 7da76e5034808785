//! Binding → `global-hotkey` translation
//! 快捷键绑定到 global-hotkey 类型的转换

use ct_core::hotkey::{HotkeyBinding, Modifier};
use global_hotkey::hotkey::{Code, HotKey, Modifiers};

/// Map a key name to a physical key code. Case-insensitive.
///
/// Supported: `a`–`z`, `0`–`9`, `f1`–`f12`, `space`, `insert`, `delete`.
pub fn parse_key(key: &str) -> Option<Code> {
    let code = match key.trim().to_ascii_lowercase().as_str() {
        "a" => Code::KeyA,
        "b" => Code::KeyB,
        "c" => Code::KeyC,
        "d" => Code::KeyD,
        "e" => Code::KeyE,
        "f" => Code::KeyF,
        "g" => Code::KeyG,
        "h" => Code::KeyH,
        "i" => Code::KeyI,
        "j" => Code::KeyJ,
        "k" => Code::KeyK,
        "l" => Code::KeyL,
        "m" => Code::KeyM,
        "n" => Code::KeyN,
        "o" => Code::KeyO,
        "p" => Code::KeyP,
        "q" => Code::KeyQ,
        "r" => Code::KeyR,
        "s" => Code::KeyS,
        "t" => Code::KeyT,
        "u" => Code::KeyU,
        "v" => Code::KeyV,
        "w" => Code::KeyW,
        "x" => Code::KeyX,
        "y" => Code::KeyY,
        "z" => Code::KeyZ,
        "0" => Code::Digit0,
        "1" => Code::Digit1,
        "2" => Code::Digit2,
        "3" => Code::Digit3,
        "4" => Code::Digit4,
        "5" => Code::Digit5,
        "6" => Code::Digit6,
        "7" => Code::Digit7,
        "8" => Code::Digit8,
        "9" => Code::Digit9,
        "f1" => Code::F1,
        "f2" => Code::F2,
        "f3" => Code::F3,
        "f4" => Code::F4,
        "f5" => Code::F5,
        "f6" => Code::F6,
        "f7" => Code::F7,
        "f8" => Code::F8,
        "f9" => Code::F9,
        "f10" => Code::F10,
        "f11" => Code::F11,
        "f12" => Code::F12,
        "space" => Code::Space,
        "insert" => Code::Insert,
        "delete" => Code::Delete,
        _ => return None,
    };
    Some(code)
}

fn modifier_flag(modifier: Modifier) -> Modifiers {
    match modifier {
        Modifier::Alt => Modifiers::ALT,
        Modifier::Control => Modifiers::CONTROL,
        Modifier::Shift => Modifiers::SHIFT,
        Modifier::Meta => Modifiers::META,
    }
}

/// `None` when the key is unbound or not supported.
pub fn to_hotkey(binding: &HotkeyBinding) -> Option<HotKey> {
    let code = parse_key(&binding.key)?;
    let mods = binding
        .modifiers
        .iter()
        .fold(Modifiers::empty(), |acc, m| acc | modifier_flag(*m));
    Some(HotKey::new((!mods.is_empty()).then_some(mods), code))
}
