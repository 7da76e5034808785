use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Modifier {
    Alt,
    Control,
    Shift,
    Meta,
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Modifier::Alt => "alt",
            Modifier::Control => "control",
            Modifier::Shift => "shift",
            Modifier::Meta => "win",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown modifier: {0}")]
pub struct ParseModifierError(pub String);

impl FromStr for Modifier {
    type Err = ParseModifierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "alt" | "option" => Ok(Modifier::Alt),
            "control" | "ctrl" => Ok(Modifier::Control),
            "shift" => Ok(Modifier::Shift),
            "meta" | "win" | "super" | "cmd" | "command" => Ok(Modifier::Meta),
            _ => Err(ParseModifierError(s.to_string())),
        }
    }
}

/// A global shortcut: a set of modifiers plus one key.
///
/// Equality ignores modifier order and compares the key exactly.
/// An empty key means the binding is unbound.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HotkeyBinding {
    #[serde_as(as = "BTreeSet<DisplayFromStr>")]
    #[serde(default)]
    pub modifiers: BTreeSet<Modifier>,
    #[serde(default)]
    pub key: String,
}

impl HotkeyBinding {
    pub fn new(modifiers: impl IntoIterator<Item = Modifier>, key: impl Into<String>) -> Self {
        Self {
            modifiers: modifiers.into_iter().collect(),
            key: key.into(),
        }
    }

    pub fn is_unbound(&self) -> bool {
        self.key.is_empty()
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for modifier in &self.modifiers {
            write!(f, "{modifier}+")?;
        }
        f.write_str(&self.key)
    }
}
