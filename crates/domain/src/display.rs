//! Display-field resolution.
//!
//! Each field has a fixed precedence list (server value first, computed default
//! last) evaluated once per render.

use crate::snapshot::{ActionStatus, SlotInfo};

pub const DEFAULT_ACTION_ICON: &str = "bolt.fill";
pub const DEFAULT_SLOT_ICON: &str = "square.grid.2x2";
pub const LOCKED_TEXT: &str = "Locked";

/// First candidate that is present and not blank.
pub fn first_present<'a, I>(candidates: I) -> Option<&'a str>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    candidates
        .into_iter()
        .flatten()
        .map(str::trim)
        .find(|s| !s.is_empty())
}

/// `"patrol_border"` -> `"Patrol Border"`.
pub fn humanize(key: &str) -> String {
    key.split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Icon shown for a category when the action does not name one.
pub fn category_icon(category: &str) -> Option<&'static str> {
    match category {
        "economy" => Some("dollarsign.circle.fill"),
        "military" | "hostile" => Some("shield.lefthalf.filled"),
        "diplomacy" => Some("hand.raised.fill"),
        "training" => Some("figure.strengthtraining.traditional"),
        "crafting" => Some("hammer.fill"),
        _ => None,
    }
}

/// Resolved, render-ready text for one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionDisplay {
    pub title: String,
    pub icon: String,
    pub description: String,
}

impl ActionDisplay {
    pub fn resolve(key: &str, action: &ActionStatus) -> Self {
        let title = first_present([action.title.as_deref()])
            .map(str::to_string)
            .unwrap_or_else(|| humanize(key));
        let icon = first_present([
            action.icon.as_deref(),
            action.category.as_deref().and_then(category_icon),
            Some(DEFAULT_ACTION_ICON),
        ])
        .unwrap_or(DEFAULT_ACTION_ICON)
        .to_string();
        let description = first_present([action.description.as_deref()])
            .unwrap_or_default()
            .to_string();

        Self {
            title,
            icon,
            description,
        }
    }
}

/// Resolved heading for one slot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlotDisplay {
    pub name: String,
    pub icon: String,
    pub description: Option<String>,
}

impl SlotDisplay {
    pub fn resolve(slot: &SlotInfo) -> Self {
        let name = first_present([slot.display_name.as_deref()])
            .map(str::to_string)
            .unwrap_or_else(|| humanize(&slot.id));
        let icon = first_present([slot.icon.as_deref(), Some(DEFAULT_SLOT_ICON)])
            .unwrap_or(DEFAULT_SLOT_ICON)
            .to_string();
        let description = first_present([slot.description.as_deref()]).map(str::to_string);

        Self {
            name,
            icon,
            description,
        }
    }
}

pub fn locked_text(action: &ActionStatus) -> String {
    first_present([action.requirement_description.as_deref()])
        .unwrap_or(LOCKED_TEXT)
        .to_string()
}
