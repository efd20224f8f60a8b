//! Configuration for keybinds.

use serde::{Deserialize, Serialize};

/// Keybind definition - can be single key or multiple keys.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(untagged)]
pub enum KeybindDef {
    /// Single keybind
    Single(String),
    /// Multiple alternative keybinds for the same action
    Multiple(Vec<String>),
}

impl KeybindDef {
    fn many(keys: &[&str]) -> Self {
        Self::Multiple(keys.iter().map(|k| (*k).to_string()).collect())
    }

    /// All key strings bound by this definition
    #[must_use]
    pub fn keys(&self) -> Vec<&str> {
        match self {
            Self::Single(key) => vec![key.as_str()],
            Self::Multiple(keys) => keys.iter().map(String::as_str).collect(),
        }
    }
}

/// Key strings for each session action.
///
/// Keys use the `ctrl-x` / `ctrl+x` notation; named keys are `up`, `down`,
/// `esc`, `enter`, `tab`, `home`, `end`, `pgup`, `pgdn` and `f1`..`f12`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
pub struct KeybindConfig {
    #[serde(default = "default_up")]
    pub up: KeybindDef,
    #[serde(default = "default_down")]
    pub down: KeybindDef,
    #[serde(default = "default_copy")]
    pub copy: KeybindDef,
    #[serde(default = "default_quit")]
    pub quit: KeybindDef,
    #[serde(default = "default_help")]
    pub help: KeybindDef,
}

impl Default for KeybindConfig {
    fn default() -> Self {
        Self {
            up: default_up(),
            down: default_down(),
            copy: default_copy(),
            quit: default_quit(),
            help: default_help(),
        }
    }
}

fn default_up() -> KeybindDef {
    KeybindDef::many(&["up", "k"])
}

fn default_down() -> KeybindDef {
    KeybindDef::many(&["down", "j"])
}

fn default_copy() -> KeybindDef {
    KeybindDef::many(&["c", "ctrl-c"])
}

fn default_quit() -> KeybindDef {
    KeybindDef::many(&["q", "esc"])
}

fn default_help() -> KeybindDef {
    KeybindDef::Single("?".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_single_and_multiple() {
        assert_eq!(KeybindDef::Single("x".into()).keys(), vec!["x"]);
        assert_eq!(
            KeybindDef::Multiple(vec!["a".into(), "b".into()]).keys(),
            vec!["a", "b"]
        );
    }

    #[test]
    fn test_default_bindings() {
        let binds = KeybindConfig::default();
        assert_eq!(binds.up.keys(), vec!["up", "k"]);
        assert_eq!(binds.down.keys(), vec!["down", "j"]);
        assert_eq!(binds.quit.keys(), vec!["q", "esc"]);
        assert_eq!(binds.help.keys(), vec!["?"]);
    }
}
