use std::collections::BTreeSet;

use crate::auth::AuthContext;

use super::conflict::{check_conflicts, Conflict};
use super::equipment::EquipmentId;
use super::map::ScheduleMap;
use super::reconcile::AssignmentChange;
use super::session::{Session, SessionId};

/// Why a submission is currently refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitBlocked {
    /// A save is already outstanding.
    Pending,
    /// Unresolved availability conflicts.
    Conflicts(usize),
    /// The authorization context lacks assignment rights.
    NotPermitted,
}

impl core::fmt::Display for SubmitBlocked {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Pending => f.write_str("a save is already in progress"),
            Self::Conflicts(n) => write!(f, "{n} unresolved equipment conflict(s)"),
            Self::NotPermitted => f.write_str("assignment changes require admin rights"),
        }
    }
}

/// The full-replacement write handed to the API on submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitRequest {
    pub session_id: SessionId,
    /// The complete selection: always the whole list, never a delta.
    pub equipment_ids: Vec<EquipmentId>,
    pub change: AssignmentChange,
}

/// Equipment-assignment editing state for one target session.
///
/// Conflicts are recomputed synchronously after every mutation; there is no
/// reactive framework here, so each mutating method calls `recompute`
/// itself. Submission follows a begin/complete/fail cycle mirroring the
/// disabled-while-saving behavior of the portal.
#[derive(Debug)]
pub struct AssignmentEditor {
    target: Session,
    previous: BTreeSet<EquipmentId>,
    selected: BTreeSet<EquipmentId>,
    conflicts: Vec<Conflict>,
    pending: bool,
}

impl AssignmentEditor {
    pub fn new(target: Session, map: &ScheduleMap) -> Self {
        let previous: BTreeSet<_> = target.equipment_ids.iter().copied().collect();

        let mut editor = Self {
            selected: previous.clone(),
            previous,
            target,
            conflicts: Vec::new(),
            pending: false,
        };

        editor.recompute(map);
        editor
    }

    pub const fn target(&self) -> &Session {
        &self.target
    }

    pub const fn selected(&self) -> &BTreeSet<EquipmentId> {
        &self.selected
    }

    pub fn conflicts(&self) -> &[Conflict] {
        &self.conflicts
    }

    #[allow(dead_code)]
    pub const fn is_pending(&self) -> bool {
        self.pending
    }

    #[allow(dead_code)]
    pub fn toggle(&mut self, id: EquipmentId, map: &ScheduleMap) {
        if !self.selected.remove(&id) {
            self.selected.insert(id);
        }

        self.recompute(map);
    }

    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = EquipmentId>, map: &ScheduleMap) {
        self.selected = ids.into_iter().collect();
        self.recompute(map);
    }

    /// Re-derive the conflict list from the current inputs.
    ///
    /// Runs after every mutation. Sessions on other days can never overlap
    /// the target's window, so the date index narrows the comparison set.
    pub fn recompute(&mut self, map: &ScheduleMap) {
        self.conflicts = check_conflicts(
            &self.target,
            &self.selected,
            map.sessions_between(self.target.date, self.target.date),
        );
    }

    pub fn submit_blocked(&self, auth: &AuthContext) -> Option<SubmitBlocked> {
        if self.pending {
            Some(SubmitBlocked::Pending)
        } else if !self.conflicts.is_empty() {
            Some(SubmitBlocked::Conflicts(self.conflicts.len()))
        } else if !auth.can_manage_assignments() {
            Some(SubmitBlocked::NotPermitted)
        } else {
            None
        }
    }

    /// Start a submission: marks the editor pending and returns the
    /// full-replacement request plus the change partition for the summary.
    pub fn begin_submit(&mut self, auth: &AuthContext) -> Result<SubmitRequest, SubmitBlocked> {
        if let Some(blocked) = self.submit_blocked(auth) {
            return Err(blocked);
        }

        self.pending = true;

        Ok(SubmitRequest {
            session_id: self.target.id,
            equipment_ids: self.selected.iter().copied().collect(),
            change: AssignmentChange::diff(&self.previous, &self.selected),
        })
    }

    /// The save landed; the saved record becomes the new baseline.
    pub fn complete_submit(&mut self, saved: &Session) {
        self.previous = saved.equipment_ids.iter().copied().collect();
        self.selected = self.previous.clone();
        self.target = saved.clone();
        self.pending = false;
    }

    /// The save failed; clear the pending flag so the user may retry.
    pub fn fail_submit(&mut self) {
        self.pending = false;
    }
}
