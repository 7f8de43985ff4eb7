//! Slot resolution.
//!
//! Decides which server-defined slots have renderable content. Dispatch is on
//! `SlotContentType` only; no slot id is ever special-cased, so a new slot type
//! needs one new match arm here and nothing per slot.

use crate::ordering::{sort_entries, ActionEntry};
use crate::snapshot::{ActionStatusSnapshot, Contract, SlotContentType, SlotInfo};

/// Renderable content of one slot.
#[derive(Debug, Clone, PartialEq)]
pub enum SlotContent<'a> {
    Empty,
    /// Contracts not yet completed, in server order.
    Contracts(Vec<&'a Contract>),
    /// Present actions, sorted for display.
    Actions(Vec<ActionEntry<'a>>),
}

impl SlotContent<'_> {
    pub fn is_empty(&self) -> bool {
        match self {
            SlotContent::Empty => true,
            SlotContent::Contracts(contracts) => contracts.is_empty(),
            SlotContent::Actions(entries) => entries.is_empty(),
        }
    }
}

pub fn has_content(slot: &SlotInfo, snapshot: &ActionStatusSnapshot) -> bool {
    match slot.content_type {
        SlotContentType::Actions => slot.actions.iter().any(|key| snapshot.action(key).is_some()),
        kind if kind.is_contracts() => snapshot
            .contracts_for(kind)
            .iter()
            .any(|contract| !contract.is_completed()),
        _ => false,
    }
}

pub fn content<'a>(slot: &'a SlotInfo, snapshot: &'a ActionStatusSnapshot) -> SlotContent<'a> {
    match slot.content_type {
        SlotContentType::Actions => {
            let mut entries: Vec<ActionEntry<'a>> = Vec::new();
            for key in &slot.actions {
                // Keys for actions the player cannot see yet are skipped, not errors.
                let Some(action) = snapshot.action(key) else {
                    continue;
                };
                if entries.iter().any(|e| e.key == key.as_str()) {
                    continue;
                }
                entries.push(ActionEntry::new(key, action));
            }
            if entries.is_empty() {
                return SlotContent::Empty;
            }
            sort_entries(&mut entries);
            SlotContent::Actions(entries)
        }
        kind if kind.is_contracts() => {
            let active: Vec<&Contract> = snapshot
                .contracts_for(kind)
                .iter()
                .filter(|contract| !contract.is_completed())
                .collect();
            if active.is_empty() {
                SlotContent::Empty
            } else {
                SlotContent::Contracts(active)
            }
        }
        _ => SlotContent::Empty,
    }
}

/// Slots with content, in server order.
pub fn resolve_slots(snapshot: &ActionStatusSnapshot) -> Vec<(&SlotInfo, SlotContent<'_>)> {
    snapshot
        .slots
        .iter()
        .filter_map(|slot| {
            let content = content(slot, snapshot);
            (!content.is_empty()).then_some((slot, content))
        })
        .collect()
}
