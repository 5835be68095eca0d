//! Automatic reset of completed recurring chores.
//!
//! A completed recurring chore becomes due again at local midnight of its
//! first occurrence day after the day it was completed. Once that moment has
//! passed the chore is reopened and, when it rotates, handed to the next
//! member in roster order.

mod scheduler;
mod task;

pub use scheduler::{AutoResetScheduler, Clock, FixedClock, ResetTickResult, SystemClock};
pub use task::{spawn_reset_task, ResetTaskHandle};

use chrono::{DateTime, Local, NaiveDate};

use crate::models::chore::{Chore, ChoreId};
use crate::models::household::HouseholdState;
use crate::models::member::MemberId;
use crate::services::recurrence::next_occurrence_after;
use crate::services::rotation::next_rotation_assignee;
use crate::utils::date::local_midnight;

/// Result of a reset pass that changed something.
#[derive(Debug, Clone, PartialEq)]
pub struct ResetPass {
    pub state: HouseholdState,
    /// Reset chores, in stored order
    pub reset_chore_ids: Vec<ChoreId>,
}

/// When a completed chore becomes due again.
///
/// `None` for chores that are open, non-repeating, missing a completion
/// timestamp, or whose recurrence never produces another occurrence.
pub fn next_reset_at(chore: &Chore, today: NaiveDate) -> Option<DateTime<Local>> {
    if !chore.completed || !chore.recurrence.is_recurring() {
        return None;
    }
    let completed_at = chore.completed_at?;
    let anchor = chore.anchor_day(today);
    next_occurrence_after(anchor, &chore.recurrence, completed_at.date_naive()).map(local_midnight)
}

/// Reopen every chore whose reset moment is at or before `now`.
///
/// Returns `None` when nothing is due, so callers skip the write.
pub fn apply_recurrence_resets(state: &HouseholdState, now: DateTime<Local>) -> Option<ResetPass> {
    let today = now.date_naive();
    let rotation_order = state.rotation_order();
    let mut reset_chore_ids = Vec::new();

    let chores: Vec<Chore> = state
        .chores
        .iter()
        .map(|chore| match next_reset_at(chore, today) {
            Some(reset_at) if now >= reset_at => {
                reset_chore_ids.push(chore.id.clone());
                reopen(chore, &rotation_order)
            }
            _ => chore.clone(),
        })
        .collect();

    if reset_chore_ids.is_empty() {
        return None;
    }

    let mut next = state.clone();
    next.chores = chores;
    Some(ResetPass {
        state: next,
        reset_chore_ids,
    })
}

/// Earliest reset still pending after `now`.
pub fn next_pending_reset(state: &HouseholdState, now: DateTime<Local>) -> Option<DateTime<Local>> {
    let today = now.date_naive();
    state
        .chores
        .iter()
        .filter_map(|chore| next_reset_at(chore, today))
        .filter(|reset_at| *reset_at > now)
        .min()
}

fn reopen(chore: &Chore, rotation_order: &[MemberId]) -> Chore {
    let mut reopened = chore.clone();
    reopened.completed = false;
    reopened.completed_at = None;
    if chore.rotate_assignment {
        reopened.assigned_to = next_rotation_assignee(rotation_order, chore.current_assignee())
            .into_iter()
            .collect();
    }
    reopened
}
