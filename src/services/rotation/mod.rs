//! Round-robin assignment for rotating chores.
//!
//! Rotation phase is never stored. The only persisted input is the chore's
//! current assignee, who owns the reference occurrence (the one nearest to
//! today). Every other occurrence is that many rotation slots away as there
//! are occurrences between it and the reference, so reopening the app on any
//! day reproduces the same assignments.

use chrono::NaiveDate;

use crate::models::member::MemberId;
use crate::models::recurrence::Recurrence;
use crate::services::recurrence::{
    count_occurrence_steps, find_occurrence_on_or_after, find_occurrence_on_or_before,
};

/// Inputs for resolving a chore's assignees across visible occurrences.
#[derive(Debug, Clone, Copy)]
pub struct RotationRequest<'a> {
    /// Occurrence days to resolve, in any order
    pub dates: &'a [NaiveDate],
    /// Roster order to cycle through
    pub rotation_order: &'a [MemberId],
    pub current_assignee: Option<&'a MemberId>,
    pub anchor: NaiveDate,
    pub recurrence: &'a Recurrence,
}

/// One assignee per requested date, `None` when the roster is empty.
pub fn resolve_rotation_assignments(
    request: &RotationRequest<'_>,
    today: NaiveDate,
) -> Vec<Option<MemberId>> {
    let Some(&first_date) = request.dates.first() else {
        return Vec::new();
    };
    if request.rotation_order.is_empty() {
        return vec![None; request.dates.len()];
    }

    let current_index = request
        .current_assignee
        .and_then(|current| request.rotation_order.iter().position(|id| id == current))
        .unwrap_or(0);

    let reference = reference_occurrence(request.anchor, request.recurrence, today)
        .unwrap_or(first_date);

    request
        .dates
        .iter()
        .map(|date| {
            let delta =
                count_occurrence_steps(request.anchor, request.recurrence, reference, *date);
            let index = wrap_rotation_index(current_index as i64 + delta, request.rotation_order.len());
            request.rotation_order.get(index).cloned()
        })
        .collect()
}

/// Occurrence the current assignee owns: the latest one on or before today,
/// otherwise the earliest one after it.
pub fn reference_occurrence(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    today: NaiveDate,
) -> Option<NaiveDate> {
    find_occurrence_on_or_before(anchor, recurrence, today)
        .or_else(|| find_occurrence_on_or_after(anchor, recurrence, today))
}

/// Floor modulo: always in `0..len`, zero for an empty roster.
pub fn wrap_rotation_index(value: i64, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    value.rem_euclid(len as i64) as usize
}

/// Member after `current` in roster order, wrapping. Unassigned or unknown
/// members hand over to the first member.
pub fn next_rotation_assignee(
    rotation_order: &[MemberId],
    current: Option<&MemberId>,
) -> Option<MemberId> {
    let first = rotation_order.first()?;
    let next = current
        .and_then(|current| rotation_order.iter().position(|id| id == current))
        .map(|index| &rotation_order[(index + 1) % rotation_order.len()])
        .unwrap_or(first);
    Some(next.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::date::add_days;
    use pretty_assertions::assert_eq;

    fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn roster() -> Vec<MemberId> {
        vec![MemberId::from("a"), MemberId::from("b"), MemberId::from("c")]
    }

    fn ids(values: &[&str]) -> Vec<Option<MemberId>> {
        values.iter().map(|value| Some(MemberId::from(*value))).collect()
    }

    #[test]
    fn weekly_rotation_steps_back_and_forward_from_today() {
        let today = ymd(2024, 6, 3);
        let order = roster();
        let current = MemberId::from("b");
        let dates = [add_days(today, -7), today, add_days(today, 7)];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &order,
            current_assignee: Some(&current),
            anchor: today,
            recurrence: &Recurrence::Weekly,
        };

        assert_eq!(resolve_rotation_assignments(&request, today), ids(&["a", "b", "c"]));
    }

    #[test]
    fn empty_roster_leaves_everything_unassigned() {
        let today = ymd(2024, 6, 3);
        let dates = [today, add_days(today, 1)];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &[],
            current_assignee: None,
            anchor: today,
            recurrence: &Recurrence::Daily,
        };

        assert_eq!(resolve_rotation_assignments(&request, today), vec![None, None]);
    }

    #[test]
    fn unknown_assignee_starts_at_first_member() {
        let today = ymd(2024, 6, 5);
        let order = roster();
        let removed = MemberId::from("gone");
        let dates = [today, add_days(today, 1)];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &order,
            current_assignee: Some(&removed),
            anchor: ymd(2024, 6, 1),
            recurrence: &Recurrence::Daily,
        };

        assert_eq!(resolve_rotation_assignments(&request, today), ids(&["a", "b"]));
    }

    #[test]
    fn weekday_rotation_skips_weekends() {
        // Thursday reference; Fri, Mon, Tue follow
        let today = ymd(2024, 6, 6);
        let order = roster();
        let current = MemberId::from("a");
        let dates = [
            ymd(2024, 6, 6),
            ymd(2024, 6, 7),
            ymd(2024, 6, 10),
            ymd(2024, 6, 11),
        ];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &order,
            current_assignee: Some(&current),
            anchor: ymd(2024, 6, 3),
            recurrence: &Recurrence::Weekdays,
        };

        assert_eq!(
            resolve_rotation_assignments(&request, today),
            ids(&["a", "b", "c", "a"])
        );
    }

    #[test]
    fn future_only_chore_uses_first_upcoming_occurrence() {
        let today = ymd(2024, 6, 3);
        let order = roster();
        let current = MemberId::from("c");
        let anchor = ymd(2024, 6, 10);
        let dates = [anchor, ymd(2024, 6, 17)];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &order,
            current_assignee: Some(&current),
            anchor,
            recurrence: &Recurrence::Weekly,
        };

        assert_eq!(resolve_rotation_assignments(&request, today), ids(&["c", "a"]));
    }

    #[test]
    fn reference_prefers_latest_past_occurrence() {
        let anchor = ymd(2024, 6, 3);
        assert_eq!(
            reference_occurrence(anchor, &Recurrence::Weekly, ymd(2024, 6, 12)),
            Some(ymd(2024, 6, 10))
        );
        assert_eq!(
            reference_occurrence(anchor, &Recurrence::Weekly, ymd(2024, 5, 1)),
            Some(anchor)
        );
        assert_eq!(
            reference_occurrence(anchor, &Recurrence::Other("x".into()), ymd(2024, 5, 1)),
            None
        );
    }

    #[test]
    fn resolution_is_deterministic() {
        let today = ymd(2024, 6, 3);
        let order = roster();
        let current = MemberId::from("b");
        let dates = [ymd(2024, 6, 4), ymd(2024, 6, 5), ymd(2024, 6, 6)];
        let request = RotationRequest {
            dates: &dates,
            rotation_order: &order,
            current_assignee: Some(&current),
            anchor: ymd(2024, 5, 1),
            recurrence: &Recurrence::Daily,
        };

        let first = resolve_rotation_assignments(&request, today);
        let second = resolve_rotation_assignments(&request, today);
        assert_eq!(first, second);
        assert_eq!(first, ids(&["c", "a", "b"]));
    }

    #[test]
    fn wrap_index_is_never_negative() {
        assert_eq!(wrap_rotation_index(-1, 3), 2);
        assert_eq!(wrap_rotation_index(-4, 3), 2);
        assert_eq!(wrap_rotation_index(7, 3), 1);
        assert_eq!(wrap_rotation_index(5, 0), 0);
    }

    #[test]
    fn next_assignee_wraps_and_defaults() {
        let order = roster();
        assert_eq!(
            next_rotation_assignee(&order, Some(&MemberId::from("a"))),
            Some(MemberId::from("b"))
        );
        assert_eq!(
            next_rotation_assignee(&order, Some(&MemberId::from("c"))),
            Some(MemberId::from("a"))
        );
        assert_eq!(next_rotation_assignee(&order, None), Some(MemberId::from("a")));
        assert_eq!(
            next_rotation_assignee(&order, Some(&MemberId::from("gone"))),
            Some(MemberId::from("a"))
        );
        assert_eq!(next_rotation_assignee(&[], None), None);
    }
}
