//! RFC 5545 (.ics) export of chore occurrences.

pub mod export;
mod utils;
