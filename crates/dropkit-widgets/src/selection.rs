//! Selection values and the pure rules for moving between them.
//!
//! Nothing here knows about option metadata: rejecting disabled or unknown
//! values is the caller's job (see [`Picker::propose`](crate::picker::Picker::propose)).

use std::collections::BTreeSet;

/// Whether a picker yields one value or a set of values.  Fixed per picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Exactly one value; choosing closes the overlay.
    #[default]
    Single,
    /// Any number of values; choosing toggles membership and keeps the
    /// overlay open.
    Multi,
}

/// The controlled value of a picker.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionValue {
    /// The chosen value; the empty string means nothing is chosen.
    Single(String),
    /// The chosen values.
    Multi(BTreeSet<String>),
}

impl SelectionValue {
    /// The "nothing selected" value for `mode`.
    pub fn empty(mode: Mode) -> Self {
        match mode {
            Mode::Single => SelectionValue::Single(String::new()),
            Mode::Multi => SelectionValue::Multi(BTreeSet::new()),
        }
    }

    /// Build a multi value from any list of values.
    pub fn multi<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SelectionValue::Multi(values.into_iter().map(Into::into).collect())
    }

    /// Build a single value.
    pub fn single(value: impl Into<String>) -> Self {
        SelectionValue::Single(value.into())
    }

    /// The mode this value belongs to.
    pub fn mode(&self) -> Mode {
        match self {
            SelectionValue::Single(_) => Mode::Single,
            SelectionValue::Multi(_) => Mode::Multi,
        }
    }

    /// Number of selected values.
    pub fn len(&self) -> usize {
        match self {
            SelectionValue::Single(v) if v.is_empty() => 0,
            SelectionValue::Single(_) => 1,
            SelectionValue::Multi(set) => set.len(),
        }
    }

    /// `true` when nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The selected values, in set order for multi values.
    pub fn values(&self) -> Vec<&str> {
        match self {
            SelectionValue::Single(v) if v.is_empty() => Vec::new(),
            SelectionValue::Single(v) => vec![v.as_str()],
            SelectionValue::Multi(set) => set.iter().map(String::as_str).collect(),
        }
    }
}

impl Default for SelectionValue {
    fn default() -> Self {
        SelectionValue::empty(Mode::Single)
    }
}

/// Result of choosing a value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Next {
    /// The value to propose to the owner.
    pub value: SelectionValue,
    /// Whether the interaction should close.
    pub close: bool,
}

/// Whether `value` is part of `selection`.
pub fn is_selected(value: &str, selection: &SelectionValue) -> bool {
    match selection {
        SelectionValue::Single(current) => !current.is_empty() && current == value,
        SelectionValue::Multi(set) => set.contains(value),
    }
}

/// The value that results from choosing `value` in `mode`.
///
/// Single mode replaces whatever was selected and asks to close.  Multi mode
/// toggles membership and never asks to close.  A `selection` of the other
/// mode is treated as empty.
pub fn next(selection: &SelectionValue, mode: Mode, value: &str) -> Next {
    match mode {
        Mode::Single => Next {
            value: SelectionValue::Single(value.to_string()),
            close: true,
        },
        Mode::Multi => {
            let mut set = match selection {
                SelectionValue::Multi(set) => set.clone(),
                SelectionValue::Single(_) => BTreeSet::new(),
            };
            if !set.remove(value) {
                set.insert(value.to_string());
            }
            Next {
                value: SelectionValue::Multi(set),
                close: false,
            }
        }
    }
}

/// The cleared value for `mode`.
pub fn clear(mode: Mode) -> SelectionValue {
    SelectionValue::empty(mode)
}
