use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;

use super::equipment::{EquipmentId, EquipmentItem};
use super::session::{Session, SessionId};

/// Transient copy of the backend's schedule: sessions and the equipment
/// inventory, indexed for range queries. Replaced wholesale on refetch.
#[derive(Debug, PartialEq, Default)]
pub struct ScheduleMap {
    // Sessions by their id
    sessions: BTreeMap<SessionId, Session>,
    // Session ids by calendar day
    date_index: BTreeMap<NaiveDate, BTreeSet<SessionId>>,
    // Inventory by equipment id
    equipment: BTreeMap<EquipmentId, EquipmentItem>,
}

impl ScheduleMap {
    pub fn add_session(&mut self, session: Session) {
        self.date_index
            .entry(session.date)
            .or_default()
            .insert(session.id);

        self.sessions.insert(session.id, session);
    }

    pub fn add_equipment(&mut self, item: EquipmentItem) {
        self.equipment.insert(item.id, item);
    }

    #[allow(dead_code)]
    pub fn session(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn equipment(&self, id: EquipmentId) -> Option<&EquipmentItem> {
        self.equipment.get(&id)
    }

    pub const fn inventory(&self) -> &BTreeMap<EquipmentId, EquipmentItem> {
        &self.equipment
    }

    pub fn sessions(&self) -> impl Iterator<Item = &Session> {
        self.sessions.values()
    }

    /// Sessions whose date falls within `start..=end`.
    pub fn sessions_between(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> impl Iterator<Item = &Session> {
        self.date_index.range(start..=end).flat_map(move |(_, id_set)| {
            id_set.iter().filter_map(move |id| self.sessions.get(id))
        })
    }

    pub fn len_sessions(&self) -> usize {
        self.sessions.len()
    }

    pub fn len_equipment(&self) -> usize {
        self.equipment.len()
    }
}
