//! The option record every picker is built from.

/// One selectable entry.
///
/// `value` is the key the picker reports through
/// [`Message::Changed`](crate::picker::Message::Changed); `label` is what the
/// user sees.  Values are expected to be unique within one list; when they
/// are not, the later entry shadows the earlier one in every lookup (see
/// [`OptionIndex`](crate::index::OptionIndex)).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectOption {
    /// Unique key reported on selection.
    pub value: String,
    /// Display text, also matched by the search filter.
    pub label: String,
    /// Secondary text shown under the label, also matched by the filter.
    pub description: Option<String>,
    /// Group header this option is listed under.
    pub group: Option<String>,
    /// Disabled options are rendered but can never be selected.
    pub disabled: bool,
    /// Glyph drawn before the label.
    pub icon: Option<String>,
}

impl SelectOption {
    /// Create an enabled, ungrouped option.
    pub fn new(value: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            label: label.into(),
            description: None,
            group: None,
            disabled: false,
            icon: None,
        }
    }

    /// Set the secondary description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Place the option under a group header.
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }

    /// Set the leading glyph.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Mark the option as disabled (or re-enable it).
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }
}
