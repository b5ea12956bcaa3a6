//! Grouped view of an option list and value lookups over it.

use crate::option::SelectOption;
use std::collections::HashMap;

/// Bucket an option is listed under.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GroupKey {
    /// Options without a group.  Never rendered as a header.
    Ungrouped,
    /// Options sharing a `group` name.
    Named(String),
}

impl GroupKey {
    /// Header text for this bucket, `None` for [`GroupKey::Ungrouped`].
    pub fn header(&self) -> Option<&str> {
        match self {
            GroupKey::Ungrouped => None,
            GroupKey::Named(name) => Some(name),
        }
    }
}

impl From<Option<&str>> for GroupKey {
    fn from(group: Option<&str>) -> Self {
        match group {
            Some(name) if !name.is_empty() => GroupKey::Named(name.to_string()),
            _ => GroupKey::Ungrouped,
        }
    }
}

/// Options partitioned into groups.
///
/// Groups appear in the order their first member appears in the input, and
/// each group keeps its members in input order.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GroupedOptions {
    groups: Vec<(GroupKey, Vec<SelectOption>)>,
}

impl GroupedOptions {
    /// Build directly from already-partitioned groups.
    pub fn from_groups(groups: Vec<(GroupKey, Vec<SelectOption>)>) -> Self {
        Self { groups }
    }

    /// The groups in display order.
    pub fn groups(&self) -> &[(GroupKey, Vec<SelectOption>)] {
        &self.groups
    }

    /// Number of groups.
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    /// `true` when there are no groups (and therefore no options).
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Members of `key`, if the group is present.
    pub fn get(&self, key: &GroupKey) -> Option<&[SelectOption]> {
        self.groups
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, options)| options.as_slice())
    }

    /// Every option in display order.
    pub fn options(&self) -> impl Iterator<Item = &SelectOption> {
        self.groups.iter().flat_map(|(_, options)| options.iter())
    }
}

/// Partition `options` by their `group` field.
///
/// Ungrouped options, and options with an empty group name, land in
/// [`GroupKey::Ungrouped`].  Nothing is sorted and
/// nothing is deduplicated.
pub fn group(options: &[SelectOption]) -> GroupedOptions {
    let mut slots: HashMap<GroupKey, usize> = HashMap::new();
    let mut groups: Vec<(GroupKey, Vec<SelectOption>)> = Vec::new();

    for option in options {
        let key = GroupKey::from(option.group.as_deref());
        let slot = *slots.entry(key.clone()).or_insert_with(|| {
            groups.push((key, Vec::new()));
            groups.len() - 1
        });
        groups[slot].1.push(option.clone());
    }

    GroupedOptions { groups }
}

/// Value lookup over an option list.
///
/// When two options share a value the later one wins.
#[derive(Debug, Clone, Default)]
pub struct OptionIndex {
    options: Vec<SelectOption>,
    by_value: HashMap<String, usize>,
}

impl OptionIndex {
    /// Index `options`.
    pub fn new(options: Vec<SelectOption>) -> Self {
        let by_value = options
            .iter()
            .enumerate()
            .map(|(i, option)| (option.value.clone(), i))
            .collect();
        Self { options, by_value }
    }

    /// The option list in input order, duplicates included.
    pub fn options(&self) -> &[SelectOption] {
        &self.options
    }

    /// The option currently answering to `value`.
    pub fn get(&self, value: &str) -> Option<&SelectOption> {
        self.by_value.get(value).map(|&i| &self.options[i])
    }

    /// Whether `value` names a present, enabled option.
    pub fn is_selectable(&self, value: &str) -> bool {
        self.get(value).is_some_and(|option| !option.disabled)
    }

    /// Grouped view of the indexed options.
    pub fn grouped(&self) -> GroupedOptions {
        group(&self.options)
    }

    /// Number of options, duplicates included.
    pub fn len(&self) -> usize {
        self.options.len()
    }

    /// `true` when no options are indexed.
    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }
}
