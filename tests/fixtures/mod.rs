// Test fixtures - reusable test data
// Provides a consistent household across the integration tests

#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};

use famboard::models::chore::Chore;
use famboard::models::household::HouseholdState;
use famboard::models::member::FamilyMember;
use famboard::models::recurrence::Recurrence;

/// Sample dates for testing
pub mod dates {
    use super::*;

    pub fn ymd(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    pub fn local(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Local> {
        Local
            .with_ymd_and_hms(year, month, day, hour, minute, 0)
            .single()
            .unwrap()
    }

    /// Monday, June 3 2024
    pub fn monday_june_3() -> NaiveDate {
        ymd(2024, 6, 3)
    }

    /// Feb 29, 2024 (leap year)
    pub fn leap_day_2024() -> NaiveDate {
        ymd(2024, 2, 29)
    }
}

/// Sample household members
pub mod members {
    use super::*;

    pub fn roster() -> Vec<FamilyMember> {
        vec![
            FamilyMember::new("member-alex", "Alex"),
            FamilyMember::new("member-jamie", "Jamie"),
            FamilyMember::new("member-riley", "Riley"),
        ]
    }
}

/// Sample chores for testing
pub mod chores {
    use super::*;

    pub fn anchored(id: &str, title: &str, recurrence: Recurrence, anchor: NaiveDate) -> Chore {
        Chore::builder()
            .id(id)
            .title(title)
            .recurrence(recurrence)
            .anchored_on(anchor)
            .build(anchor)
            .unwrap()
    }

    /// Weekday chore starting Monday June 3 2024
    pub fn school_lunches() -> Chore {
        let mut chore = anchored(
            "chore-lunches",
            "Pack school lunches",
            Recurrence::Weekdays,
            dates::monday_june_3(),
        );
        chore.assigned_to = vec!["member-alex".into()];
        chore
    }

    /// Daily rotating chore currently held by Jamie
    pub fn rotating_dishes() -> Chore {
        let mut chore = anchored(
            "chore-dishes",
            "Dishes",
            Recurrence::Daily,
            dates::monday_june_3(),
        );
        chore.assigned_to = vec!["member-jamie".into()];
        chore.rotate_assignment = true;
        chore.points = 3;
        chore
    }

    pub fn completed(mut chore: Chore, at: DateTime<Local>) -> Chore {
        chore.completed = true;
        chore.completed_at = Some(at);
        chore
    }
}

pub fn household(chores: Vec<Chore>) -> HouseholdState {
    HouseholdState::new(members::roster(), chores)
}
