//! Dated chore occurrences.
//!
//! Occurrences are derived on demand for a visible window and never stored.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::chore::{Chore, ChoreId};
use crate::models::member::MemberId;
use crate::models::recurrence::Recurrence;
use crate::utils::date::{date_key, format_timestamp, local_midnight};

/// Host suffix for exported event identifiers.
pub const EVENT_UID_DOMAIN: &str = "famboard.local";

/// One chore on one day.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Occurrence {
    /// `<choreId>-<dateKey>`
    pub id: String,
    pub chore_id: ChoreId,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub date_key: String,
    /// Assignees for this day, after rotation
    pub assigned_to: Vec<MemberId>,
    pub points: u32,
    pub recurrence: Recurrence,
    /// The chore is marked completed and this occurrence is today's
    pub is_completed_today: bool,
    pub calendar_event: CalendarExportEvent,
}

/// Shape handed to calendar systems for interoperability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CalendarExportEvent {
    pub uid: String,
    pub summary: String,
    pub description: String,
    /// Local midnight of the occurrence day, RFC 3339
    pub start: String,
    pub all_day: bool,
    pub recurrence_rule: Option<String>,
}

impl Occurrence {
    pub fn new(chore: &Chore, date: NaiveDate, assigned_to: Vec<MemberId>, today: NaiveDate) -> Self {
        let key = date_key(date);
        Self {
            id: format!("{}-{}", chore.id, key),
            chore_id: chore.id.clone(),
            title: chore.title.clone(),
            description: chore.description.clone(),
            date,
            assigned_to,
            points: chore.points,
            recurrence: chore.recurrence.clone(),
            is_completed_today: chore.completed && date == today,
            calendar_event: CalendarExportEvent {
                uid: format!("{}-{}@{}", chore.id, key, EVENT_UID_DOMAIN),
                summary: chore.title.clone(),
                description: chore.description.clone(),
                start: format_timestamp(local_midnight(date)),
                all_day: true,
                recurrence_rule: chore.recurrence.rrule().map(str::to_string),
            },
            date_key: key,
        }
    }
}
