//! Trigger text for the current selection.

use crate::index::OptionIndex;
use crate::selection::SelectionValue;

/// Human-readable description of `selection`.
///
/// Nothing selected gives `placeholder`.  A single value gives the label of
/// its option, or the raw value when the option is gone from `options`.  A
/// multi value gives a count such as `"3 selected"`, built from
/// `count_suffix`.
pub fn summarize(
    selection: &SelectionValue,
    options: &OptionIndex,
    placeholder: &str,
    count_suffix: &str,
) -> String {
    match selection {
        _ if selection.is_empty() => placeholder.to_string(),
        SelectionValue::Single(value) => options
            .get(value)
            .map_or_else(|| value.clone(), |option| option.label.clone()),
        SelectionValue::Multi(set) => format!("{} {}", set.len(), count_suffix),
    }
}
