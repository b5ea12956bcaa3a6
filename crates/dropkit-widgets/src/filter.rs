//! Query narrowing of a grouped option view.

use crate::index::GroupedOptions;
use crate::option::SelectOption;

/// Keep the options whose label or description contains `query`,
/// ignoring case.
///
/// Groups left without members are dropped.  An empty query returns the
/// input unchanged.  Filtering is display-only; it never touches the
/// selection.
pub fn filter(grouped: &GroupedOptions, query: &str) -> GroupedOptions {
    if query.is_empty() {
        return grouped.clone();
    }

    let needle = query.to_lowercase();
    let groups = grouped
        .groups()
        .iter()
        .filter_map(|(key, options)| {
            let kept: Vec<SelectOption> = options
                .iter()
                .filter(|option| matches(option, &needle))
                .cloned()
                .collect();
            (!kept.is_empty()).then(|| (key.clone(), kept))
        })
        .collect();

    GroupedOptions::from_groups(groups)
}

/// Whether `option` matches an already-lowercased needle.
pub fn matches(option: &SelectOption, needle: &str) -> bool {
    option.label.to_lowercase().contains(needle)
        || option
            .description
            .as_deref()
            .is_some_and(|d| d.to_lowercase().contains(needle))
}

/// The empty-state condition: a non-empty query that matched nothing.
pub fn is_no_results(filtered: &GroupedOptions, query: &str) -> bool {
    filtered.is_empty() && !query.is_empty()
}
