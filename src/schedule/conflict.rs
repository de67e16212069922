use std::collections::BTreeSet;

use super::equipment::EquipmentId;
use super::session::{Session, SessionId, Span};

/// A detected double-booking: one equipment item wanted by the target
/// session while another session's window overlaps it.
///
/// Derived on every input change and discarded; never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    pub equipment_id: EquipmentId,
    pub session_id: SessionId,
    pub session_name: String,
    /// The conflicting session's own window, for display.
    pub span: Span,
}

/// Check whether assigning `candidate_ids` to `target` would collide with
/// any other session's existing use of the same items.
///
/// Emits one record per (equipment id, conflicting session) pair; a single
/// id may collide with several sessions. The result is advisory: callers
/// decide whether it blocks anything.
///
/// Sessions without a valid window are skipped, never treated as
/// conflicting.
pub fn check_conflicts<'a, I>(
    target: &Session,
    candidate_ids: &BTreeSet<EquipmentId>,
    others: I,
) -> Vec<Conflict>
where
    I: IntoIterator<Item = &'a Session>,
{
    let Some(target_span) = target.span() else {
        return Vec::new();
    };

    let comparable: Vec<(&Session, Span)> = others
        .into_iter()
        .filter(|other| other.id != target.id)
        .filter(|other| !other.equipment_ids.is_empty())
        .filter_map(|other| match other.span() {
            Some(span) => Some((other, span)),
            None => {
                log::debug!("Session {} has no valid window, skipping", other.id);
                None
            }
        })
        .collect();

    let mut conflicts = Vec::new();

    for &equipment_id in candidate_ids {
        for (other, span) in &comparable {
            if !other.equipment_ids.contains(&equipment_id) {
                continue;
            }

            if target_span.overlaps(span) {
                conflicts.push(Conflict {
                    equipment_id,
                    session_id: other.id,
                    session_name: other.name.clone(),
                    span: *span,
                });
            }
        }
    }

    conflicts
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn session(id: u32, date: (i32, u32, u32), window: (u32, u32), equipment: &[u32]) -> Session {
        let date = NaiveDate::from_ymd_opt(date.0, date.1, date.2).unwrap();

        Session {
            id: SessionId(id),
            name: format!("Forgatás {id}"),
            date,
            time_from: chrono::NaiveTime::from_hms_opt(window.0, 0, 0),
            time_to: chrono::NaiveTime::from_hms_opt(window.1, 0, 0),
            location: None,
            equipment_ids: equipment.iter().copied().map(EquipmentId).collect(),
            notes: String::new(),
            session_type: None,
        }
    }

    fn candidates(ids: &[u32]) -> BTreeSet<EquipmentId> {
        ids.iter().copied().map(EquipmentId).collect()
    }

    #[test]
    fn overlap_on_shared_equipment_is_one_record() {
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let other = session(2, (2025, 9, 1), (11, 13), &[1]);

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&other]);

        assert_eq!(conflicts.len(), 1);
        assert_eq!(conflicts[0].equipment_id, EquipmentId(1));
        assert_eq!(conflicts[0].session_id, SessionId(2));
        assert_eq!(conflicts[0].span, other.span().unwrap());
    }

    #[test]
    fn touching_windows_do_not_conflict() {
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let before = session(2, (2025, 9, 1), (8, 10), &[1]);
        let after = session(3, (2025, 9, 1), (12, 13), &[1]);

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&before, &after]);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn different_dates_never_conflict() {
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let other = session(2, (2025, 9, 2), (10, 12), &[1]);

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&other]);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn disjoint_equipment_never_conflicts() {
        // E2 is booked by the other session, but the target only wants E3.
        let target = session(1, (2025, 9, 1), (10, 12), &[]);
        let other = session(2, (2025, 9, 1), (10, 12), &[2]);

        let conflicts = check_conflicts(&target, &candidates(&[3]), [&other]);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn target_is_excluded_from_comparison() {
        // Re-saving unchanged equipment must not conflict with itself.
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let all = [target.clone()];

        let conflicts = check_conflicts(&target, &candidates(&[1]), &all);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn one_id_can_collide_with_several_sessions() {
        let target = session(1, (2025, 9, 1), (9, 17), &[1]);
        let morning = session(2, (2025, 9, 1), (10, 11), &[1]);
        let afternoon = session(3, (2025, 9, 1), (14, 15), &[1]);

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&morning, &afternoon]);

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].session_id, SessionId(2));
        assert_eq!(conflicts[1].session_id, SessionId(3));
    }

    #[test]
    fn windowless_sessions_are_skipped() {
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let mut other = session(2, (2025, 9, 1), (10, 12), &[1]);
        other.time_to = None;

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&other]);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn windowless_target_yields_nothing() {
        let mut target = session(1, (2025, 9, 1), (10, 12), &[1]);
        target.time_from = None;
        let other = session(2, (2025, 9, 1), (10, 12), &[1]);

        let conflicts = check_conflicts(&target, &candidates(&[1]), [&other]);

        assert!(conflicts.is_empty());
    }

    #[test]
    fn boundary_shift_clears_conflict() {
        // 10-12 vs 11-13 conflicts; moving the other window to 12-13 clears it.
        let target = session(1, (2025, 9, 1), (10, 12), &[1]);
        let overlapping = session(2, (2025, 9, 1), (11, 13), &[1]);
        let touching = session(2, (2025, 9, 1), (12, 13), &[1]);

        assert_eq!(check_conflicts(&target, &candidates(&[1]), [&overlapping]).len(), 1);
        assert!(check_conflicts(&target, &candidates(&[1]), [&touching]).is_empty());
    }

    #[test]
    fn records_group_by_candidate_id() {
        let target = session(1, (2025, 9, 1), (10, 12), &[]);
        let other = session(2, (2025, 9, 1), (11, 13), &[1, 2]);

        let conflicts = check_conflicts(&target, &candidates(&[1, 2]), [&other]);

        assert_eq!(conflicts.len(), 2);
        assert_eq!(conflicts[0].equipment_id, EquipmentId(1));
        assert_eq!(conflicts[1].equipment_id, EquipmentId(2));
    }
}
