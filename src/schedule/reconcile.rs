use std::collections::{BTreeMap, BTreeSet};

use super::equipment::{EquipmentId, EquipmentItem};

/// The added/removed/unchanged partition between a prior and a new
/// equipment assignment set.
///
/// Feeds only the human-readable change summary: persistence always
/// submits the full selection, never a delta.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssignmentChange {
    pub added: BTreeSet<EquipmentId>,
    pub removed: BTreeSet<EquipmentId>,
    pub unchanged: BTreeSet<EquipmentId>,
}

impl AssignmentChange {
    pub fn diff(previous: &BTreeSet<EquipmentId>, selected: &BTreeSet<EquipmentId>) -> Self {
        Self {
            added: selected.difference(previous).copied().collect(),
            removed: previous.difference(selected).copied().collect(),
            unchanged: selected.intersection(previous).copied().collect(),
        }
    }

    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }

    /// One-line summary naming items by display label where known.
    pub fn summary(&self, inventory: &BTreeMap<EquipmentId, EquipmentItem>) -> String {
        if self.is_noop() {
            return format!("No changes ({} unchanged)", self.unchanged.len());
        }

        let mut parts = Vec::new();

        if !self.added.is_empty() {
            parts.push(format!("added: {}", join_labels(&self.added, inventory)));
        }

        if !self.removed.is_empty() {
            parts.push(format!("removed: {}", join_labels(&self.removed, inventory)));
        }

        parts.push(format!("{} unchanged", self.unchanged.len()));
        parts.join("; ")
    }
}

fn join_labels(
    ids: &BTreeSet<EquipmentId>,
    inventory: &BTreeMap<EquipmentId, EquipmentItem>,
) -> String {
    ids.iter()
        .map(|id| inventory.get(id).map_or_else(|| id.to_string(), EquipmentItem::label))
        .collect::<Vec<_>>()
        .join(", ")
}
