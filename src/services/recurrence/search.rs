use chrono::NaiveDate;

use super::predicate::{matches_cadence, occurs_on_date};
use super::MAX_SEARCH_DAYS;
use crate::models::recurrence::Recurrence;
use crate::utils::date::add_days;

/// Latest occurrence on or before `target`, never earlier than the anchor.
pub fn find_occurrence_on_or_before(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    target: NaiveDate,
) -> Option<NaiveDate> {
    let mut cursor = target;
    for _ in 0..=MAX_SEARCH_DAYS {
        if cursor < anchor {
            break;
        }
        if occurs_on_date(anchor, recurrence, cursor) {
            return Some(cursor);
        }
        cursor = add_days(cursor, -1);
    }
    None
}

/// Earliest occurrence on or after `target` within the search horizon.
pub fn find_occurrence_on_or_after(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    target: NaiveDate,
) -> Option<NaiveDate> {
    let mut cursor = target;
    for _ in 0..=MAX_SEARCH_DAYS {
        if occurs_on_date(anchor, recurrence, cursor) {
            return Some(cursor);
        }
        cursor = add_days(cursor, 1);
    }
    None
}

/// First occurrence strictly after `day`.
pub fn next_occurrence_after(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    day: NaiveDate,
) -> Option<NaiveDate> {
    find_occurrence_on_or_after(anchor, recurrence, add_days(day, 1))
}

/// Signed number of pattern days walked from `from` to `to`.
///
/// Each day after `from` up to and including `to` that matches the cadence
/// counts one step, negative when walking backwards. The walk stops after
/// [`MAX_SEARCH_DAYS`] days and returns what it counted so far.
pub fn count_occurrence_steps(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    from: NaiveDate,
    to: NaiveDate,
) -> i64 {
    if from == to {
        return 0;
    }

    let direction: i64 = if to > from { 1 } else { -1 };
    let mut cursor = from;
    let mut steps = 0i64;

    for _ in 0..=MAX_SEARCH_DAYS {
        cursor = add_days(cursor, direction);
        if matches_cadence(anchor, recurrence, cursor) {
            steps += direction;
        }
        if cursor == to {
            return steps;
        }
    }

    steps
}
