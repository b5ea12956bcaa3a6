//! Behaviour and text settings of a picker.

use crate::selection::Mode;

/// Settings fixed when a [`Picker`](crate::picker::Picker) is built.
///
/// All fields have defaults; override with struct update syntax or the
/// `with_*` builders:
///
/// ```rust,ignore
/// let config = PickerConfig {
///     mode: Mode::Multi,
///     searchable: true,
///     ..PickerConfig::default()
/// }
/// .with_placeholder("Regions...");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerConfig {
    /// Single or multi selection.  Never changes after construction.
    pub mode: Mode,
    /// Open into a search line that filters the options.
    pub searchable: bool,
    /// Offer a clear glyph and the clear key while something is selected.
    pub clearable: bool,
    /// Refuse to open or change the value.
    pub disabled: bool,
    /// Trigger text when nothing is selected.
    pub placeholder: String,
    /// Search line text while the query is empty.
    pub search_placeholder: String,
    /// Row shown when a query matches nothing.
    pub empty_text: String,
    /// Word after the count in multi mode ("3 selected").
    pub count_suffix: String,
    /// Field label drawn above the trigger.
    pub label: Option<String>,
    /// Error text drawn below the trigger.
    pub error: Option<String>,
    /// Option rows shown before the list scrolls (default: 8).
    pub max_visible: usize,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            mode: Mode::Single,
            searchable: false,
            clearable: false,
            disabled: false,
            placeholder: "Select...".to_string(),
            search_placeholder: "Search...".to_string(),
            empty_text: "No results".to_string(),
            count_suffix: "selected".to_string(),
            label: None,
            error: None,
            max_visible: 8,
        }
    }
}

impl PickerConfig {
    /// Single-select defaults.
    pub fn single() -> Self {
        Self::default()
    }

    /// Multi-select defaults.
    pub fn multi() -> Self {
        Self {
            mode: Mode::Multi,
            ..Self::default()
        }
    }

    /// Enable the search line.
    pub fn with_search(mut self, searchable: bool) -> Self {
        self.searchable = searchable;
        self
    }

    /// Enable clearing.
    pub fn with_clear(mut self, clearable: bool) -> Self {
        self.clearable = clearable;
        self
    }

    /// Start disabled.
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set the placeholder.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Set the search line placeholder.
    pub fn with_search_placeholder(mut self, text: impl Into<String>) -> Self {
        self.search_placeholder = text.into();
        self
    }

    /// Set the empty-state text.
    pub fn with_empty_text(mut self, text: impl Into<String>) -> Self {
        self.empty_text = text.into();
        self
    }

    /// Set the multi-mode count suffix.
    pub fn with_count_suffix(mut self, suffix: impl Into<String>) -> Self {
        self.count_suffix = suffix.into();
        self
    }

    /// Set the field label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the error text.
    pub fn with_error(mut self, error: impl Into<String>) -> Self {
        self.error = Some(error.into());
        self
    }

    /// Set how many option rows show before scrolling.
    pub fn with_max_visible(mut self, rows: usize) -> Self {
        self.max_visible = rows.max(1);
        self
    }
}
