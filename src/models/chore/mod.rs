// Chore module
// Stored chore records and the normalization applied on every write

use chrono::{DateTime, Local, NaiveDate};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::models::member::MemberId;
use crate::models::recurrence::Recurrence;
use crate::utils::date::{format_timestamp, local_midnight, parse_timestamp, start_of_day};
use crate::utils::lenient::{self, null_as_default};

/// Opaque chore identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChoreId(pub String);

impl ChoreId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Fresh `chore-xxxxxxxx` identifier.
    pub fn generate() -> Self {
        let raw = uuid::Uuid::new_v4().simple().to_string();
        Self(format!("chore-{}", &raw[..8]))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ChoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ChoreId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// When a chore first happens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schedule {
    /// Local midnight of the first occurrence; absent or unparseable means today
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        serialize_with = "timestamp_string"
    )]
    pub anchor_date: Option<DateTime<Local>>,
    #[serde(default = "default_all_day")]
    pub all_day: bool,
}

fn default_all_day() -> bool {
    true
}

impl Default for Schedule {
    fn default() -> Self {
        Self {
            anchor_date: None,
            all_day: true,
        }
    }
}

impl Schedule {
    pub fn anchored_on(date: NaiveDate) -> Self {
        Self {
            anchor_date: Some(local_midnight(date)),
            all_day: true,
        }
    }
}

/// A household chore as kept in storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chore {
    pub id: ChoreId,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient_assignees")]
    pub assigned_to: Vec<MemberId>,
    #[serde(default, deserialize_with = "lenient::points")]
    pub points: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub completed: bool,
    #[serde(
        default,
        deserialize_with = "lenient_timestamp",
        serialize_with = "timestamp_string"
    )]
    pub completed_at: Option<DateTime<Local>>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub recurrence: Recurrence,
    #[serde(default, deserialize_with = "null_as_default")]
    pub rotate_assignment: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub schedule: Schedule,
    #[serde(default)]
    pub image_id: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Chore {
    pub fn new(id: impl Into<ChoreId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            assigned_to: Vec::new(),
            points: 0,
            completed: false,
            completed_at: None,
            recurrence: Recurrence::None,
            rotate_assignment: false,
            schedule: Schedule::default(),
            image_id: None,
            image_url: None,
        }
    }

    /// Create a builder for constructing chores with optional fields
    pub fn builder() -> ChoreBuilder {
        ChoreBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Chore title cannot be empty".to_string());
        }
        if self.completed != self.completed_at.is_some() {
            return Err("Completion flag and timestamp must be set together".to_string());
        }
        Ok(())
    }

    /// Anchor day of the chore, falling back to `today` when none is stored.
    pub fn anchor_day(&self, today: NaiveDate) -> NaiveDate {
        self.schedule
            .anchor_date
            .map(|anchor| anchor.date_naive())
            .unwrap_or(today)
    }

    /// The single member rotation starts from.
    pub fn current_assignee(&self) -> Option<&MemberId> {
        self.assigned_to.first()
    }

    /// Rotation only applies to repeating chores with at most one assignee.
    pub fn rotates(&self) -> bool {
        self.rotate_assignment && self.recurrence.is_recurring() && self.assigned_to.len() <= 1
    }

    pub fn is_assigned_to(&self, member: &MemberId) -> bool {
        self.assigned_to.contains(member)
    }

    /// Re-apply the stored-record invariants: anchor at local midnight
    /// (today when absent), de-duplicated assignees, no rotation with more
    /// than one assignee.
    pub fn normalized(mut self, today: NaiveDate) -> Self {
        let anchor = self
            .schedule
            .anchor_date
            .map(start_of_day)
            .unwrap_or_else(|| local_midnight(today));
        self.schedule.anchor_date = Some(anchor);
        self.assigned_to = normalize_assignees(self.assigned_to);
        if self.assigned_to.len() > 1 {
            self.rotate_assignment = false;
        }
        self
    }
}

/// Drop blank ids and duplicates, keeping first-seen order.
pub fn normalize_assignees(assignees: Vec<MemberId>) -> Vec<MemberId> {
    let mut unique: Vec<MemberId> = Vec::with_capacity(assignees.len());
    for member in assignees {
        if !member.is_empty() && !unique.contains(&member) {
            unique.push(member);
        }
    }
    unique
}

/// Builder for creating chores with optional fields
pub struct ChoreBuilder {
    id: Option<ChoreId>,
    title: Option<String>,
    description: String,
    assigned_to: Vec<MemberId>,
    points: u32,
    recurrence: Recurrence,
    rotate_assignment: bool,
    anchor: Option<NaiveDate>,
}

impl ChoreBuilder {
    pub fn new() -> Self {
        Self {
            id: None,
            title: None,
            description: String::new(),
            assigned_to: Vec::new(),
            points: 0,
            recurrence: Recurrence::None,
            rotate_assignment: false,
            anchor: None,
        }
    }

    pub fn id(mut self, id: impl Into<ChoreId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn assign(mut self, member: impl Into<MemberId>) -> Self {
        self.assigned_to.push(member.into());
        self
    }

    pub fn points(mut self, points: u32) -> Self {
        self.points = points;
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }

    pub fn rotate(mut self, rotate: bool) -> Self {
        self.rotate_assignment = rotate;
        self
    }

    pub fn anchored_on(mut self, date: NaiveDate) -> Self {
        self.anchor = Some(date);
        self
    }

    /// Build the chore; a missing anchor means `today`.
    pub fn build(self, today: NaiveDate) -> Result<Chore, String> {
        let title = self.title.ok_or("Chore title is required")?;
        let chore = Chore {
            id: self.id.unwrap_or_else(ChoreId::generate),
            title,
            description: self.description,
            assigned_to: self.assigned_to,
            points: self.points,
            completed: false,
            completed_at: None,
            recurrence: self.recurrence,
            rotate_assignment: self.rotate_assignment,
            schedule: Schedule::anchored_on(self.anchor.unwrap_or(today)),
            image_id: None,
            image_url: None,
        }
        .normalized(today);

        chore.validate()?;
        Ok(chore)
    }
}

impl Default for ChoreBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum AssigneeField {
    One(MemberId),
    Many(Vec<Option<MemberId>>),
}

/// `assignedTo` has been stored as a single id, a list, or null.
fn lenient_assignees<'de, D>(deserializer: D) -> Result<Vec<MemberId>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<AssigneeField>::deserialize(deserializer)?;
    let assignees = match raw {
        None => Vec::new(),
        Some(AssigneeField::One(member)) => vec![member],
        Some(AssigneeField::Many(members)) => members.into_iter().flatten().collect(),
    };
    Ok(normalize_assignees(assignees))
}

fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Local>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match parse_timestamp(&value) {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            log::warn!("Discarding stored timestamp: {}", err);
            None
        }
    }))
}

fn timestamp_string<S>(value: &Option<DateTime<Local>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(timestamp) => serializer.serialize_str(&format_timestamp(*timestamp)),
        None => serializer.serialize_none(),
    }
}
