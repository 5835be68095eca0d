// Recurrence module
// The six repeat patterns a chore can follow

use serde::{Deserialize, Serialize};
use std::fmt;

/// How often a chore repeats.
///
/// Stored as a lowercase string. Strings that are not one of the six known
/// kinds survive a load/save cycle as [`Recurrence::Other`] and never occur.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Recurrence {
    #[default]
    None,
    Daily,
    Weekly,
    Weekdays,
    Weekends,
    Monthly,
    Other(String),
}

impl Recurrence {
    /// The kinds offered when editing a chore, in display order.
    pub const OPTIONS: [Recurrence; 6] = [
        Recurrence::None,
        Recurrence::Daily,
        Recurrence::Weekly,
        Recurrence::Weekdays,
        Recurrence::Weekends,
        Recurrence::Monthly,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Recurrence::None => "none",
            Recurrence::Daily => "daily",
            Recurrence::Weekly => "weekly",
            Recurrence::Weekdays => "weekdays",
            Recurrence::Weekends => "weekends",
            Recurrence::Monthly => "monthly",
            Recurrence::Other(value) => value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Recurrence::Daily => "Daily",
            Recurrence::Weekly => "Weekly",
            Recurrence::Weekdays => "Every weekday (Mon–Fri)",
            Recurrence::Weekends => "Every weekend (Sat & Sun)",
            Recurrence::Monthly => "Monthly",
            Recurrence::None | Recurrence::Other(_) => "Does not repeat",
        }
    }

    /// True for the five repeating kinds.
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None | Recurrence::Other(_))
    }

    /// RRULE body used by the calendar export shape.
    pub fn rrule(&self) -> Option<&'static str> {
        match self {
            Recurrence::Daily => Some("FREQ=DAILY"),
            Recurrence::Weekly => Some("FREQ=WEEKLY"),
            Recurrence::Weekdays => Some("FREQ=WEEKLY;BYDAY=MO,TU,WE,TH,FR"),
            Recurrence::Weekends => Some("FREQ=WEEKLY;BYDAY=SA,SU"),
            Recurrence::Monthly => Some("FREQ=MONTHLY"),
            Recurrence::None | Recurrence::Other(_) => None,
        }
    }
}

impl From<String> for Recurrence {
    fn from(value: String) -> Self {
        let known = match value.trim() {
            "" | "none" => Some(Recurrence::None),
            "daily" => Some(Recurrence::Daily),
            "weekly" => Some(Recurrence::Weekly),
            "weekdays" => Some(Recurrence::Weekdays),
            "weekends" => Some(Recurrence::Weekends),
            "monthly" => Some(Recurrence::Monthly),
            _ => None,
        };
        known.unwrap_or(Recurrence::Other(value))
    }
}

impl From<&str> for Recurrence {
    fn from(value: &str) -> Self {
        Recurrence::from(value.to_string())
    }
}

impl From<Recurrence> for String {
    fn from(value: Recurrence) -> Self {
        match value {
            Recurrence::Other(raw) => raw,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Recurrence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
