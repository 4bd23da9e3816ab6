//! Checklist state - which weighted-step items are checked, plus the two
//! fixed closing checklists.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Checked/unchecked state of the weighted step checklists.
///
/// Keys are `"{step}-{index}"` composite strings, the same shape the
/// persisted documents have always used. The map only grows: unchecking
/// an item stores `false` rather than removing the key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChecklistState(BTreeMap<String, bool>);

impl ChecklistState {
    /// Empty state.
    pub fn new() -> Self {
        Self::default()
    }

    fn key(step_id: usize, item_index: usize) -> String {
        format!("{step_id}-{item_index}")
    }

    /// Whether an item is checked. Absent keys are unchecked.
    pub fn is_checked(&self, step_id: usize, item_index: usize) -> bool {
        self.0
            .get(&Self::key(step_id, item_index))
            .copied()
            .unwrap_or(false)
    }

    /// Flip an item, returning the new value.
    pub fn toggle(&mut self, step_id: usize, item_index: usize) -> bool {
        let entry = self.0.entry(Self::key(step_id, item_index)).or_insert(false);
        *entry = !*entry;
        *entry
    }

    /// Set an item to an explicit value.
    pub fn set(&mut self, step_id: usize, item_index: usize, checked: bool) {
        self.0.insert(Self::key(step_id, item_index), checked);
    }

    /// How many of the first `item_count` items of a step are checked.
    pub fn checked_in_step(&self, step_id: usize, item_count: usize) -> usize {
        (0..item_count)
            .filter(|&i| self.is_checked(step_id, i))
            .count()
    }

    /// Number of keys ever touched (checked or unchecked).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when no item has ever been toggled.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// One entry of a fixed-length boolean checklist (final walkthrough,
/// moving day). These lists are separate from the weighted step model and
/// do not feed overall progress.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChecklistEntry {
    /// Item label
    pub text: String,

    /// Whether the item is done
    pub checked: bool,
}

impl ChecklistEntry {
    fn unchecked(text: &str) -> Self {
        Self {
            text: text.to_string(),
            checked: false,
        }
    }
}

/// Which fixed checklist a toggle addresses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedChecklist {
    /// Pre-closing walkthrough of the property
    FinalWalkthrough,
    /// Moving-day preparation tasks
    MovingDay,
}

/// Default final-walkthrough checklist for a new buyer dashboard.
pub fn final_walkthrough_defaults() -> Vec<ChecklistEntry> {
    [
        "All agreed-upon repairs completed and satisfactory",
        "All appliances are present and in working order (as per contract)",
        "HVAC (heating & cooling) systems are functioning",
        "Plumbing (faucets, toilets, showers) working, no new leaks",
        "Electrical systems (lights, outlets, fans) working",
        "No new damage to walls, floors, ceilings, windows since last viewing",
        "Property is clean and free of debris/seller's personal items (as agreed)",
        "All included fixtures and personal property are present",
        "Keys, garage door openers, and any relevant codes/manuals provided",
    ]
    .iter()
    .map(|text| ChecklistEntry::unchecked(text))
    .collect()
}

/// Default moving-day checklist for a new buyer dashboard.
pub fn moving_day_defaults() -> Vec<ChecklistEntry> {
    [
        "Confirm moving company/truck rental 2 weeks prior",
        "Start packing non-essential items",
        "Notify relevant parties of address change (banks, subscriptions, etc.)",
        "Arrange for child/pet care for moving day if needed",
        "Pack an 'essentials' box for the first 24 hours",
        "Confirm utility transfer dates",
        "Do a final sweep of old residence before leaving",
    ]
    .iter()
    .map(|text| ChecklistEntry::unchecked(text))
    .collect()
}
