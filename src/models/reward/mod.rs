//! Reward model.
//!
//! Rewards are bought with chore points. The catalogue lives in the household
//! state next to the roster.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::lenient::{self, null_as_default};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RewardId(pub String);

impl RewardId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh `reward-xxxxxxxx` identifier.
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("reward-{}", &raw[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RewardId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RewardId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reward {
    pub id: RewardId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    /// Points spent on redemption
    #[serde(default, deserialize_with = "lenient::points")]
    pub cost: u32,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Reward {
    pub fn new(id: impl Into<RewardId>, title: impl Into<String>, cost: u32) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            cost,
            image_id: None,
            image_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.as_str().trim().is_empty() {
            return Err("Reward id cannot be empty".to_string());
        }
        if self.title.trim().is_empty() {
            return Err("Reward title cannot be empty".to_string());
        }
        Ok(())
    }

    /// Whether a balance covers the cost.
    pub fn affordable_with(&self, points: u32) -> bool {
        points >= self.cost
    }
}
