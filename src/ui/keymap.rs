//! Key bindings for the session
//!
//! Maps terminal key events to the handful of logical actions the viewer
//! understands. Bindings come from [`KeybindConfig`] so they can be remapped
//! in the config file.

use super::error::{Result, UiError};
use crate::config::{KeybindConfig, KeybindDef};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Logical actions a key can trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Up,
    Down,
    Copy,
    Quit,
    ToggleHelp,
}

impl Action {
    /// Short description used in key hints
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Copy => "copy value",
            Self::Quit => "quit",
            Self::ToggleHelp => "toggle help",
        }
    }
}

/// A single key combination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// Create a key combination
    #[must_use]
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Parse a key string like "ctrl-c", "ctrl+c", "esc" or "k"
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        // A lone character is always a literal key, including '-' and '+'.
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Some(Self::new(KeyCode::Char(c), KeyModifiers::NONE));
        }

        let parts: Vec<&str> = s.split(['-', '+']).collect();
        let key_part = parts.last()?;
        let mut modifiers = KeyModifiers::NONE;

        for part in &parts[..parts.len().saturating_sub(1)] {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
                "alt" => modifiers |= KeyModifiers::ALT,
                "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }

        let code = match key_part.to_lowercase().as_str() {
            "enter" => KeyCode::Enter,
            "esc" | "escape" => KeyCode::Esc,
            "tab" => KeyCode::Tab,
            "space" => KeyCode::Char(' '),
            "up" => KeyCode::Up,
            "down" => KeyCode::Down,
            "left" => KeyCode::Left,
            "right" => KeyCode::Right,
            "home" => KeyCode::Home,
            "end" => KeyCode::End,
            "pgup" | "pageup" => KeyCode::PageUp,
            "pgdn" | "pagedown" => KeyCode::PageDown,
            k if k.starts_with('f') && k.len() > 1 => k[1..].parse().ok().map(KeyCode::F)?,
            _ => {
                let mut chars = key_part.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => KeyCode::Char(c),
                    _ => return None,
                }
            }
        };

        Some(Self::new(code, modifiers))
    }

    /// Whether a terminal key event is this combination
    ///
    /// Shift is ignored for character keys, since terminals report `?` both
    /// with and without it.
    #[must_use]
    pub fn matches(&self, key: &KeyEvent) -> bool {
        if self.code != key.code {
            return false;
        }
        match key.code {
            KeyCode::Char(_) => {
                self.modifiers.difference(KeyModifiers::SHIFT)
                    == key.modifiers.difference(KeyModifiers::SHIFT)
            }
            _ => self.modifiers == key.modifiers,
        }
    }

    /// Human-readable label, e.g. "↑", "ctrl+c", "esc"
    #[must_use]
    pub fn label(&self) -> String {
        let base = match self.code {
            KeyCode::Up => "↑".to_string(),
            KeyCode::Down => "↓".to_string(),
            KeyCode::Left => "←".to_string(),
            KeyCode::Right => "→".to_string(),
            KeyCode::Esc => "esc".to_string(),
            KeyCode::Enter => "enter".to_string(),
            KeyCode::Tab => "tab".to_string(),
            KeyCode::Home => "home".to_string(),
            KeyCode::End => "end".to_string(),
            KeyCode::PageUp => "pgup".to_string(),
            KeyCode::PageDown => "pgdn".to_string(),
            KeyCode::Char(' ') => "space".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::F(n) => format!("f{n}"),
            _ => "?".to_string(),
        };

        let mut label = String::new();
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            label.push_str("ctrl+");
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            label.push_str("alt+");
        }
        label.push_str(&base);
        label
    }
}

/// Ordered table of key combinations to actions
#[derive(Debug, Clone)]
pub struct KeyMap {
    bindings: Vec<(Action, Vec<KeyCombo>)>,
}

impl Default for KeyMap {
    fn default() -> Self {
        // The built-in bindings always parse.
        Self::from_config(&KeybindConfig::default()).unwrap_or(Self {
            bindings: Vec::new(),
        })
    }
}

impl KeyMap {
    /// Build a key map from configuration
    ///
    /// # Errors
    ///
    /// Returns `UiError::InvalidConfig` if any key string cannot be parsed.
    pub fn from_config(config: &KeybindConfig) -> Result<Self> {
        let entries = [
            (Action::Up, &config.up),
            (Action::Down, &config.down),
            (Action::Copy, &config.copy),
            (Action::Quit, &config.quit),
            (Action::ToggleHelp, &config.help),
        ];

        let bindings = entries
            .into_iter()
            .map(|(action, def)| Ok((action, Self::parse_def(action, def)?)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { bindings })
    }

    fn parse_def(action: Action, def: &KeybindDef) -> Result<Vec<KeyCombo>> {
        def.keys()
            .into_iter()
            .map(|key| {
                KeyCombo::parse(key).ok_or_else(|| {
                    UiError::InvalidConfig(format!(
                        "cannot parse key '{key}' bound to '{}'",
                        action.description()
                    ))
                })
            })
            .collect()
    }

    /// Action bound to a key event, if any
    #[must_use]
    pub fn action_for(&self, key: &KeyEvent) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(_, combos)| combos.iter().any(|combo| combo.matches(key)))
            .map(|(action, _)| *action)
    }

    /// Joined key labels for an action, e.g. "↑/k"
    #[must_use]
    pub fn label(&self, action: Action) -> String {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, combos)| {
                combos
                    .iter()
                    .map(KeyCombo::label)
                    .collect::<Vec<_>>()
                    .join("/")
            })
            .unwrap_or_default()
    }

    /// Label of the first key bound to an action
    #[must_use]
    pub fn primary_label(&self, action: Action) -> Option<String> {
        self.bindings
            .iter()
            .find(|(a, _)| *a == action)
            .and_then(|(_, combos)| combos.first())
            .map(KeyCombo::label)
    }
}
