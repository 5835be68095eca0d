use chrono::{Datelike, NaiveDate};

use crate::models::recurrence::Recurrence;
use crate::utils::date::{add_months_preserving_day, date_range, days_between, is_weekend};

/// Whether a chore anchored on `anchor` happens on `date`.
///
/// Pure in both arguments: any past or future day can be asked directly.
/// Nothing repeating occurs before the anchor; `none` occurs on the anchor
/// day only; unknown kinds never occur.
pub fn occurs_on_date(anchor: NaiveDate, recurrence: &Recurrence, date: NaiveDate) -> bool {
    match recurrence {
        Recurrence::None => date == anchor,
        Recurrence::Other(_) => false,
        _ if date < anchor => false,
        _ => matches_cadence(anchor, recurrence, date),
    }
}

/// The repeat pattern itself, extended in both directions from the anchor.
///
/// Agrees with [`occurs_on_date`] on and after the anchor. Rotation counts
/// steps against this so that days before the anchor keep the same cadence.
pub fn matches_cadence(anchor: NaiveDate, recurrence: &Recurrence, date: NaiveDate) -> bool {
    match recurrence {
        Recurrence::None => date == anchor,
        Recurrence::Daily => true,
        Recurrence::Weekly => days_between(anchor, date).rem_euclid(7) == 0,
        Recurrence::Weekdays => !is_weekend(date),
        Recurrence::Weekends => is_weekend(date),
        Recurrence::Monthly => {
            let months_apart = (date.year() - anchor.year()) * 12
                + (date.month() as i32 - anchor.month() as i32);
            add_months_preserving_day(anchor, months_apart, Some(anchor.day())) == date
        }
        Recurrence::Other(_) => false,
    }
}

/// Days in `start..=end` on which the chore occurs, in order.
pub fn occurrences_in_range(
    anchor: NaiveDate,
    recurrence: &Recurrence,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<NaiveDate> {
    date_range(start, end)
        .into_iter()
        .filter(|date| occurs_on_date(anchor, recurrence, *date))
        .collect()
}
