//! Chore recurrence engine.
//!
//! `predicate` answers whether a chore occurs on a given day; `search` walks
//! days in either direction to find neighbouring occurrences and count
//! occurrence steps. Walks are bounded by [`MAX_SEARCH_DAYS`], so a
//! combination that never matches yields `None` instead of looping.

mod predicate;
mod search;

pub use predicate::{matches_cadence, occurrences_in_range, occurs_on_date};
pub use search::{
    count_occurrence_steps, find_occurrence_on_or_after, find_occurrence_on_or_before,
    next_occurrence_after,
};

/// Ten years of days; the longest walk any search performs.
pub const MAX_SEARCH_DAYS: i64 = 366 * 10;
