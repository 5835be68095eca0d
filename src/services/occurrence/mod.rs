//! Occurrence map for calendar views.
//!
//! Expands every chore into its dated occurrences inside a visible window,
//! applying rotation where enabled, and groups them by date key.

use chrono::{NaiveDate, Weekday};
use std::collections::BTreeMap;

use crate::models::chore::Chore;
use crate::models::household::HouseholdState;
use crate::models::member::MemberId;
use crate::models::occurrence::Occurrence;
use crate::models::ui::CalendarView;
use crate::services::recurrence::occurrences_in_range;
use crate::services::rotation::{resolve_rotation_assignments, RotationRequest};
use crate::utils::date::{
    date_key, date_range, end_of_month, end_of_week, start_of_month, start_of_week,
};

/// Occurrences keyed by `YYYY-MM-DD`, each day sorted by title.
pub type OccurrenceMap = BTreeMap<String, Vec<Occurrence>>;

/// Inclusive window of days shown by a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn days(&self) -> Vec<NaiveDate> {
        date_range(self.start, self.end)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Window for a view around `focus`: the day itself, its week, or the
/// month padded out to whole weeks.
pub fn compute_range(view: CalendarView, focus: NaiveDate, week_start: Weekday) -> DateRange {
    let (start, end) = match view {
        CalendarView::Day => (focus, focus),
        CalendarView::Week => (start_of_week(focus, week_start), end_of_week(focus, week_start)),
        CalendarView::Month => (
            start_of_week(start_of_month(focus), week_start),
            end_of_week(end_of_month(focus), week_start),
        ),
    };

    DateRange::new(start, end)
}

/// Build the occurrence map for `range`.
///
/// Every day in the range gets an entry, empty or not. Chores without an
/// anchor are treated as anchored today.
pub fn build_occurrence_map(state: &HouseholdState, range: &DateRange, today: NaiveDate) -> OccurrenceMap {
    let mut map: OccurrenceMap = range
        .days()
        .into_iter()
        .map(|day| (date_key(day), Vec::new()))
        .collect();

    let rotation_order = state.rotation_order();

    for chore in &state.chores {
        for occurrence in expand_chore(chore, &rotation_order, range, today) {
            if let Some(day) = map.get_mut(&occurrence.date_key) {
                day.push(occurrence);
            }
        }
    }

    for occurrences in map.values_mut() {
        occurrences.sort_by(|a, b| {
            a.title
                .to_lowercase()
                .cmp(&b.title.to_lowercase())
                .then_with(|| a.title.cmp(&b.title))
        });
    }

    map
}

/// All occurrences of one chore inside `range`.
pub fn expand_chore(
    chore: &Chore,
    rotation_order: &[MemberId],
    range: &DateRange,
    today: NaiveDate,
) -> Vec<Occurrence> {
    let anchor = chore.anchor_day(today);
    let dates = occurrences_in_range(anchor, &chore.recurrence, range.start, range.end);
    if dates.is_empty() {
        return Vec::new();
    }

    let assignments: Vec<Vec<MemberId>> = if chore.rotates() {
        let request = RotationRequest {
            dates: &dates,
            rotation_order,
            current_assignee: chore.current_assignee(),
            anchor,
            recurrence: &chore.recurrence,
        };
        resolve_rotation_assignments(&request, today)
            .into_iter()
            .map(|assignee| assignee.into_iter().collect())
            .collect()
    } else {
        vec![chore.assigned_to.clone(); dates.len()]
    };

    dates
        .into_iter()
        .zip(assignments)
        .map(|(date, assigned_to)| Occurrence::new(chore, date, assigned_to, today))
        .collect()
}
