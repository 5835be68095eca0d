//! Family member model.
//!
//! Members earn points for completed chores and make up the rotation roster,
//! in the order they appear in the household state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::utils::lenient::{self, null_as_default};

/// Opaque member identifier as stored in the household snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemberId(pub String);

impl MemberId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh `member-xxxxxxxx` identifier.
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("member-{}", &raw[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

impl fmt::Display for MemberId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for MemberId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A person in the household.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FamilyMember {
    pub id: MemberId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Running total, never negative
    #[serde(default, deserialize_with = "lenient::points")]
    pub points: u32,
    /// Avatar stored in the media library
    #[serde(default)]
    pub image_id: Option<String>,
    /// Avatar fetched from a URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl FamilyMember {
    pub fn new(id: impl Into<MemberId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            points: 0,
            image_id: None,
            image_url: None,
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.id.is_empty() {
            return Err("Member id cannot be empty".to_string());
        }
        if self.name.trim().is_empty() {
            return Err("Member name cannot be empty".to_string());
        }
        Ok(())
    }

    /// Add or remove points, clamping the total at zero.
    pub fn adjust_points(&mut self, delta: i64) {
        let next = (self.points as i64 + delta).clamp(0, u32::MAX as i64);
        self.points = next as u32;
    }
}

/// Join names for display: `A`, `A & B`, `A, B, & C`.
pub fn format_member_names<S: AsRef<str>>(names: &[S]) -> String {
    match names {
        [] => String::new(),
        [only] => only.as_ref().to_string(),
        [first, second] => format!("{} & {}", first.as_ref(), second.as_ref()),
        [leading @ .., last] => {
            let leading = leading
                .iter()
                .map(|name| name.as_ref())
                .collect::<Vec<_>>()
                .join(", ");
            format!("{}, & {}", leading, last.as_ref())
        }
    }
}
