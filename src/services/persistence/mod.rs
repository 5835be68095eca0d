//! Household snapshot storage.
//!
//! The scheduling services only see [`HouseholdStore`]: load the whole state,
//! replace the whole state. `JsonFileStore` keeps it in a pretty-printed JSON
//! file; `MemoryStore` keeps it in memory.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use serde_json::Error as SerdeError;

use crate::models::household::HouseholdState;

/// Storage collaborator for household state.
#[cfg_attr(test, mockall::automock)]
pub trait HouseholdStore {
    fn load(&self) -> Result<HouseholdState>;
    fn replace(&mut self, state: &HouseholdState) -> Result<()>;
}

/// Read a snapshot, normalizing every chore. A missing file is an empty
/// household.
pub fn load_snapshot(path: &Path, today: NaiveDate) -> Result<HouseholdState> {
    if !path.exists() {
        return Ok(HouseholdState::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read household from {}", path.display()))?;
    let snapshot: HouseholdState =
        serde_json::from_str(&data).map_err(|err| map_deser_error(err, path))?;
    Ok(hydrate(snapshot, today))
}

pub fn save_snapshot(path: &Path, snapshot: &HouseholdState) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed to create dir {}", parent.display()))?;
        }
    }

    let data = serde_json::to_string_pretty(snapshot)?;
    fs::write(path, data)
        .with_context(|| format!("failed to write household to {}", path.display()))?;
    Ok(())
}

/// Apply chore normalization to freshly loaded state.
pub fn hydrate(mut state: HouseholdState, today: NaiveDate) -> HouseholdState {
    state.chores = state
        .chores
        .into_iter()
        .map(|chore| chore.normalized(today))
        .collect();
    state
}

fn map_deser_error(err: SerdeError, path: &Path) -> anyhow::Error {
    anyhow::Error::new(err).context(format!(
        "failed to deserialize household from {}",
        path.display()
    ))
}

/// File-backed store.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HouseholdStore for JsonFileStore {
    fn load(&self) -> Result<HouseholdState> {
        load_snapshot(&self.path, Local::now().date_naive())
    }

    fn replace(&mut self, state: &HouseholdState) -> Result<()> {
        save_snapshot(&self.path, state)
    }
}

/// In-memory store that counts writes.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub state: HouseholdState,
    pub writes: usize,
}

impl MemoryStore {
    pub fn new(state: HouseholdState) -> Self {
        Self { state, writes: 0 }
    }
}

impl HouseholdStore for MemoryStore {
    fn load(&self) -> Result<HouseholdState> {
        Ok(self.state.clone())
    }

    fn replace(&mut self, state: &HouseholdState) -> Result<()> {
        self.state = state.clone();
        self.writes += 1;
        Ok(())
    }
}
