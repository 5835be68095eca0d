// Service module exports

pub mod household;
pub mod icalendar;
pub mod occurrence;
pub mod persistence;
pub mod recurrence;
pub mod reset;
pub mod rotation;
pub mod settings;
