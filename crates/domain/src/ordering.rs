//! Deterministic display order for actions.
//!
//! Primary key is `display_order` ascending (undeclared sorts last), secondary
//! key is the action key, so re-renders stay stable across refreshes.

use std::cmp::Ordering;

use crate::snapshot::ActionStatus;

/// Sort position for actions that do not declare `display_order`.
pub const DEFAULT_DISPLAY_ORDER: i32 = i32::MAX;

/// An action together with the key it was published under.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActionEntry<'a> {
    pub key: &'a str,
    pub action: &'a ActionStatus,
}

impl<'a> ActionEntry<'a> {
    pub fn new(key: &'a str, action: &'a ActionStatus) -> Self {
        Self { key, action }
    }

    pub fn sort_order(&self) -> i32 {
        self.action.display_order.unwrap_or(DEFAULT_DISPLAY_ORDER)
    }
}

pub fn compare_entries(a: &ActionEntry<'_>, b: &ActionEntry<'_>) -> Ordering {
    a.sort_order()
        .cmp(&b.sort_order())
        .then_with(|| a.key.cmp(b.key))
}

pub fn sort_entries(entries: &mut [ActionEntry<'_>]) {
    entries.sort_by(compare_entries);
}

/// Entries sharing a category, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryGroup<'a> {
    pub category: Option<&'a str>,
    pub entries: Vec<ActionEntry<'a>>,
}

/// Group sorted entries by category. Groups appear in the order of their
/// first member, so the overall ordering rule still holds.
pub fn group_by_category<'a>(mut entries: Vec<ActionEntry<'a>>) -> Vec<CategoryGroup<'a>> {
    sort_entries(&mut entries);

    let mut groups: Vec<CategoryGroup<'a>> = Vec::new();
    for entry in entries {
        let category = entry
            .action
            .category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty());
        match groups.iter_mut().find(|g| g.category == category) {
            Some(group) => group.entries.push(entry),
            None => groups.push(CategoryGroup {
                category,
                entries: vec![entry],
            }),
        }
    }
    groups
}
