use chrono::{DateTime, Local};

use super::utils::{escape_text, format_date, format_datetime};
use crate::models::occurrence::Occurrence;
use crate::utils::date::add_days;

/// Render occurrences as an iCalendar document of all-day events.
///
/// Every occurrence is its own single-day event. The recurrence rule is not
/// written out: the occurrences already list each instance, and rotation can
/// give each one a different assignee.
pub fn render(occurrences: &[Occurrence]) -> String {
    render_at(occurrences, Local::now())
}

/// Same as [`render`] with an explicit `DTSTAMP`.
pub fn render_at(occurrences: &[Occurrence], stamp: DateTime<Local>) -> String {
    let mut ics = calendar_header();
    for occurrence in occurrences {
        append_event(&mut ics, occurrence, &stamp);
    }
    ics.push_str("END:VCALENDAR\r\n");
    ics
}

fn calendar_header() -> String {
    let mut ics = String::new();
    ics.push_str("BEGIN:VCALENDAR\r\n");
    ics.push_str("VERSION:2.0\r\n");
    ics.push_str("PRODID:-//Famboard//Chores//EN\r\n");
    ics.push_str("CALSCALE:GREGORIAN\r\n");
    ics
}

fn append_event(buffer: &mut String, occurrence: &Occurrence, stamp: &DateTime<Local>) {
    let event = &occurrence.calendar_event;

    buffer.push_str("BEGIN:VEVENT\r\n");
    buffer.push_str(&format!("UID:{}\r\n", event.uid));
    buffer.push_str(&format!("DTSTAMP:{}\r\n", format_datetime(stamp)));
    buffer.push_str(&format!(
        "DTSTART;VALUE=DATE:{}\r\n",
        format_date(occurrence.date)
    ));
    buffer.push_str(&format!(
        "DTEND;VALUE=DATE:{}\r\n",
        format_date(add_days(occurrence.date, 1))
    ));
    buffer.push_str(&format!("SUMMARY:{}\r\n", escape_text(&event.summary)));

    if !event.description.is_empty() {
        buffer.push_str(&format!("DESCRIPTION:{}\r\n", escape_text(&event.description)));
    }
    buffer.push_str("END:VEVENT\r\n");
}
