use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use chrono::{DateTime, Local};

use super::{apply_recurrence_resets, next_pending_reset};
use crate::models::chore::ChoreId;
use crate::models::household::HouseholdState;
use crate::services::persistence::HouseholdStore;

/// Source of the current wall-clock time.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// Clock stuck at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Local>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResetTickResult {
    pub reset_chore_ids: Vec<ChoreId>,
    /// Time until the earliest reset still pending
    pub next_reset_in: Option<StdDuration>,
}

impl ResetTickResult {
    pub fn reset_count(&self) -> usize {
        self.reset_chore_ids.len()
    }
}

/// Runs reset passes against a store. At most one write per tick, and none
/// when nothing was due.
pub struct AutoResetScheduler<C: Clock = SystemClock> {
    clock: C,
}

impl Default for AutoResetScheduler<SystemClock> {
    fn default() -> Self {
        Self::new()
    }
}

impl AutoResetScheduler<SystemClock> {
    pub fn new() -> Self {
        Self::with_clock(SystemClock)
    }
}

impl<C: Clock> AutoResetScheduler<C> {
    pub fn with_clock(clock: C) -> Self {
        Self { clock }
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn tick<S: HouseholdStore + ?Sized>(&self, store: &mut S) -> Result<ResetTickResult> {
        let now = self.clock.now();
        self.tick_at(store, now)
    }

    pub fn tick_at<S: HouseholdStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Local>,
    ) -> Result<ResetTickResult> {
        self.run_pass(store, now).map(|(result, _)| result)
    }

    /// Household state with every due reset applied and saved.
    pub fn current_state<S: HouseholdStore + ?Sized>(&self, store: &mut S) -> Result<HouseholdState> {
        let now = self.clock.now();
        self.run_pass(store, now).map(|(_, state)| state)
    }

    fn run_pass<S: HouseholdStore + ?Sized>(
        &self,
        store: &mut S,
        now: DateTime<Local>,
    ) -> Result<(ResetTickResult, HouseholdState)> {
        let state = store.load().context("Failed to load household state")?;
        let mut result = ResetTickResult::default();

        let current = match apply_recurrence_resets(&state, now) {
            Some(pass) => {
                store
                    .replace(&pass.state)
                    .context("Failed to write reset chores")?;
                log::info!(
                    "Auto-reset {} chore(s): {}",
                    pass.reset_chore_ids.len(),
                    pass.reset_chore_ids
                        .iter()
                        .map(ChoreId::as_str)
                        .collect::<Vec<_>>()
                        .join(", ")
                );
                result.reset_chore_ids = pass.reset_chore_ids;
                pass.state
            }
            None => {
                log::debug!("Auto-reset tick at {}: nothing due", now);
                state
            }
        };

        result.next_reset_in = next_pending_reset(&current, now)
            .and_then(|reset_at| (reset_at - now).to_std().ok());

        Ok((result, current))
    }
}
