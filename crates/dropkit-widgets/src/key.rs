//! Key bindings for the picker and a help-line view of them.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::fmt;

/// A single key press with the modifiers that must accompany it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyCombination {
    /// The base key.
    pub code: KeyCode,
    /// Modifiers that must be held.
    pub modifiers: KeyModifiers,
}

impl KeyCombination {
    /// A key with no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::NONE)
    }

    /// A key held with Ctrl.
    pub fn ctrl(code: KeyCode) -> Self {
        Self::with_modifiers(code, KeyModifiers::CONTROL)
    }

    /// A key with an explicit modifier set.
    pub fn with_modifiers(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    fn matches(&self, event: &KeyEvent) -> bool {
        self.code == event.code && event.modifiers.contains(self.modifiers)
    }
}

impl fmt::Display for KeyCombination {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.modifiers.contains(KeyModifiers::CONTROL) {
            write!(f, "ctrl+")?;
        }
        if self.modifiers.contains(KeyModifiers::ALT) {
            write!(f, "alt+")?;
        }
        match self.code {
            KeyCode::Char(' ') => write!(f, "space"),
            KeyCode::Char(c) => write!(f, "{c}"),
            KeyCode::Enter => write!(f, "enter"),
            KeyCode::Esc => write!(f, "esc"),
            KeyCode::Up => write!(f, "↑"),
            KeyCode::Down => write!(f, "↓"),
            KeyCode::Home => write!(f, "home"),
            KeyCode::End => write!(f, "end"),
            KeyCode::Tab => write!(f, "tab"),
            KeyCode::Backspace => write!(f, "backspace"),
            KeyCode::Delete => write!(f, "del"),
            other => write!(f, "{other:?}"),
        }
    }
}

/// One or more key combinations bound to a described action.
#[derive(Debug, Clone)]
pub struct Binding {
    /// Keys that trigger the action.
    pub keys: Vec<KeyCombination>,
    /// What the action does, for help text.
    pub description: String,
    /// Disabled bindings never match.
    pub enabled: bool,
}

impl Binding {
    /// Bind a single key.
    pub fn new(key: KeyCombination, description: impl Into<String>) -> Self {
        Self::with_keys(vec![key], description)
    }

    /// Bind several keys to the same action.
    pub fn with_keys(keys: Vec<KeyCombination>, description: impl Into<String>) -> Self {
        Self {
            keys,
            description: description.into(),
            enabled: true,
        }
    }

    /// Whether `event` triggers this binding.
    pub fn matches(&self, event: &KeyEvent) -> bool {
        self.enabled && self.keys.iter().any(|k| k.matches(event))
    }

    /// Enable or disable the binding.
    pub fn enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// `"enter/space select"` style help entry.
    pub fn help(&self) -> String {
        let keys: Vec<String> = self.keys.iter().map(ToString::to_string).collect();
        format!("{} {}", keys.join("/"), self.description)
    }
}

/// Types exposing key bindings for a help line.
pub trait KeyMap {
    /// The few bindings worth a one-line hint.
    fn short_help(&self) -> Vec<&Binding>;
    /// Every binding, grouped by purpose.
    fn full_help(&self) -> Vec<Vec<&Binding>>;
}

/// Key bindings of a [`Picker`](crate::picker::Picker).
///
/// While the search line has focus, printable characters always go to the
/// query, so `select` bindings on plain characters (Space by default) only
/// apply when the picker is not searchable.
#[derive(Debug, Clone)]
pub struct PickerKeyMap {
    /// Open the overlay from the trigger.  Default: Enter, Space, Down.
    pub open: Binding,
    /// Close without choosing.  Default: Esc.
    pub close: Binding,
    /// Previous option.  Default: Up, Ctrl+P.
    pub up: Binding,
    /// Next option.  Default: Down, Ctrl+N.
    pub down: Binding,
    /// First option.  Default: Home.
    pub first: Binding,
    /// Last option.  Default: End.
    pub last: Binding,
    /// Choose the highlighted option.  Default: Enter, Space.
    pub select: Binding,
    /// Clear the value (clearable pickers only).  Default: Delete.
    pub clear: Binding,
    /// Leave the picker.  Default: Tab.
    pub leave: Binding,
    /// Delete the last query character.  Default: Backspace.
    pub erase: Binding,
}

impl Default for PickerKeyMap {
    fn default() -> Self {
        Self {
            open: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                    KeyCombination::new(KeyCode::Down),
                ],
                "open",
            ),
            close: Binding::new(KeyCombination::new(KeyCode::Esc), "close"),
            up: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Up),
                    KeyCombination::ctrl(KeyCode::Char('p')),
                ],
                "up",
            ),
            down: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Down),
                    KeyCombination::ctrl(KeyCode::Char('n')),
                ],
                "down",
            ),
            first: Binding::new(KeyCombination::new(KeyCode::Home), "first"),
            last: Binding::new(KeyCombination::new(KeyCode::End), "last"),
            select: Binding::with_keys(
                vec![
                    KeyCombination::new(KeyCode::Enter),
                    KeyCombination::new(KeyCode::Char(' ')),
                ],
                "select",
            ),
            clear: Binding::new(KeyCombination::new(KeyCode::Delete), "clear"),
            leave: Binding::new(KeyCombination::new(KeyCode::Tab), "leave"),
            erase: Binding::new(KeyCombination::new(KeyCode::Backspace), "erase"),
        }
    }
}

impl KeyMap for PickerKeyMap {
    fn short_help(&self) -> Vec<&Binding> {
        vec![&self.up, &self.down, &self.select, &self.close]
    }

    fn full_help(&self) -> Vec<Vec<&Binding>> {
        vec![
            vec![&self.up, &self.down, &self.first, &self.last],
            vec![&self.open, &self.select, &self.close, &self.leave],
            vec![&self.clear, &self.erase],
        ]
    }
}
