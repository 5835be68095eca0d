//! Household state transformations.
//!
//! Each operation takes the current state and returns the next one. Unknown
//! ids return an unchanged copy. Member points move with chore completion
//! and reward redemption and are clamped at zero.

use chrono::{DateTime, Local, NaiveDate};
use std::collections::HashSet;

use crate::models::chore::{normalize_assignees, Chore, ChoreId, Schedule};
use crate::models::household::HouseholdState;
use crate::models::member::{FamilyMember, MemberId};
use crate::models::recurrence::Recurrence;
use crate::models::reward::{Reward, RewardId};

/// Input for a new chore.
#[derive(Debug, Clone, Default)]
pub struct NewChore {
    pub title: String,
    pub description: String,
    pub assigned_to: Vec<MemberId>,
    pub points: i64,
    pub recurrence: Recurrence,
    pub rotate_assignment: bool,
    pub anchor_date: Option<DateTime<Local>>,
    pub image_id: Option<String>,
    pub image_url: Option<String>,
}

/// Partial chore edit; `None` keeps the stored value.
#[derive(Debug, Clone, Default)]
pub struct ChoreUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub assigned_to: Option<Vec<MemberId>>,
    pub points: Option<i64>,
    pub recurrence: Option<Recurrence>,
    pub rotate_assignment: Option<bool>,
    pub anchor_date: Option<DateTime<Local>>,
    pub image_id: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewFamilyMember {
    pub name: String,
    pub image_id: Option<String>,
    pub image_url: Option<String>,
}

/// Partial member edit; points only move through chores and rewards.
#[derive(Debug, Clone, Default)]
pub struct MemberUpdate {
    pub name: Option<String>,
    pub image_id: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Default)]
pub struct NewReward {
    pub title: String,
    pub description: String,
    pub cost: i64,
    pub image_id: Option<String>,
    pub image_url: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct RewardUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub cost: Option<i64>,
    pub image_id: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

fn clamp_points(points: i64) -> u32 {
    points.clamp(0, u32::MAX as i64) as u32
}

/// A rotating chore with nobody assigned starts with the first member.
fn seed_rotation(state: &HouseholdState, assigned: Vec<MemberId>, rotate: bool) -> Vec<MemberId> {
    if rotate && assigned.is_empty() {
        return state.rotation_order().into_iter().take(1).collect();
    }
    assigned
}

pub fn add_chore(state: &HouseholdState, input: NewChore, today: NaiveDate) -> (HouseholdState, ChoreId) {
    let assigned = seed_rotation(
        state,
        normalize_assignees(input.assigned_to),
        input.rotate_assignment,
    );
    let rotate_assignment = input.rotate_assignment && assigned.len() <= 1;

    let id = ChoreId::generate();
    let chore = Chore {
        id: id.clone(),
        title: input.title,
        description: input.description,
        assigned_to: assigned,
        points: clamp_points(input.points),
        completed: false,
        completed_at: None,
        recurrence: input.recurrence,
        rotate_assignment,
        schedule: Schedule {
            anchor_date: input.anchor_date,
            all_day: true,
        },
        image_id: input.image_id,
        image_url: input.image_url,
    }
    .normalized(today);

    let mut next = state.clone();
    next.chores.push(chore);
    (next, id)
}

pub fn update_chore(
    state: &HouseholdState,
    id: &ChoreId,
    update: ChoreUpdate,
    today: NaiveDate,
) -> HouseholdState {
    let Some(existing) = state.chore(id) else {
        return state.clone();
    };

    let previous_points = existing.points;
    let next_points = update.points.map(clamp_points).unwrap_or(previous_points);
    let mut assigned = update
        .assigned_to
        .map(normalize_assignees)
        .unwrap_or_else(|| existing.assigned_to.clone());
    let mut rotate = update
        .rotate_assignment
        .unwrap_or(existing.rotate_assignment);
    if assigned.len() > 1 {
        rotate = false;
    }
    assigned = seed_rotation(state, assigned, rotate);

    let mut updated = existing.clone();
    if let Some(title) = update.title {
        updated.title = title;
    }
    if let Some(description) = update.description {
        updated.description = description;
    }
    if let Some(recurrence) = update.recurrence {
        updated.recurrence = recurrence;
    }
    if let Some(anchor) = update.anchor_date {
        updated.schedule.anchor_date = Some(anchor);
    }
    if let Some(image_id) = update.image_id {
        updated.image_id = image_id;
    }
    if let Some(image_url) = update.image_url {
        updated.image_url = image_url;
    }
    updated.assigned_to = assigned;
    updated.points = next_points;
    updated.rotate_assignment = rotate;
    let updated = updated.normalized(today);

    let mut next = state.clone();
    if existing.completed {
        let before: HashSet<&MemberId> = existing.assigned_to.iter().collect();
        let after: HashSet<&MemberId> = updated.assigned_to.iter().collect();
        for member in &mut next.family_members {
            match (before.contains(&member.id), after.contains(&member.id)) {
                (true, false) => member.adjust_points(-(previous_points as i64)),
                (false, true) => member.adjust_points(next_points as i64),
                (true, true) => member.adjust_points(next_points as i64 - previous_points as i64),
                (false, false) => {}
            }
        }
    }

    replace_chore(&mut next, updated);
    next
}

pub fn remove_chore(state: &HouseholdState, id: &ChoreId) -> HouseholdState {
    let Some(target) = state.chore(id) else {
        return state.clone();
    };

    let mut next = state.clone();
    if target.completed {
        award(&mut next.family_members, &target.assigned_to, -(target.points as i64));
    }
    next.chores.retain(|chore| &chore.id != id);
    next
}

/// Flip completion, stamping `completedAt` with `now` when completing.
pub fn toggle_chore_complete(state: &HouseholdState, id: &ChoreId, now: DateTime<Local>) -> HouseholdState {
    let Some(target) = state.chore(id) else {
        return state.clone();
    };

    let mut toggled = target.clone();
    toggled.completed = !target.completed;
    toggled.completed_at = toggled.completed.then_some(now);

    let delta = if toggled.completed {
        target.points as i64
    } else {
        -(target.points as i64)
    };

    let mut next = state.clone();
    award(&mut next.family_members, &target.assigned_to, delta);
    replace_chore(&mut next, toggled);
    next
}

pub fn add_family_member(state: &HouseholdState, input: NewFamilyMember) -> (HouseholdState, MemberId) {
    let id = MemberId::generate();
    let mut member = FamilyMember::new(id.clone(), input.name);
    member.image_id = input.image_id;
    member.image_url = input.image_url;

    let mut next = state.clone();
    next.family_members.push(member);
    (next, id)
}

pub fn update_family_member(state: &HouseholdState, id: &MemberId, update: MemberUpdate) -> HouseholdState {
    let mut next = state.clone();
    let Some(member) = next.family_members.iter_mut().find(|member| &member.id == id) else {
        return next;
    };

    if let Some(name) = update.name {
        member.name = name;
    }
    if let Some(image_id) = update.image_id {
        member.image_id = image_id;
    }
    if let Some(image_url) = update.image_url {
        member.image_url = image_url;
    }
    next
}

/// Drop a member and unassign them from every chore.
pub fn remove_family_member(state: &HouseholdState, id: &MemberId) -> HouseholdState {
    let mut next = state.clone();
    next.family_members.retain(|member| &member.id != id);
    for chore in &mut next.chores {
        if !chore.is_assigned_to(id) {
            continue;
        }
        chore.assigned_to.retain(|member| member != id);
        if chore.assigned_to.len() > 1 {
            chore.rotate_assignment = false;
        }
    }
    next
}

pub fn add_reward(state: &HouseholdState, input: NewReward) -> (HouseholdState, RewardId) {
    let id = RewardId::generate();
    let mut reward = Reward::new(id.clone(), input.title, clamp_points(input.cost));
    reward.description = input.description;
    reward.image_id = input.image_id;
    reward.image_url = input.image_url;

    let mut next = state.clone();
    next.rewards.push(reward);
    (next, id)
}

pub fn update_reward(state: &HouseholdState, id: &RewardId, update: RewardUpdate) -> HouseholdState {
    let mut next = state.clone();
    let Some(reward) = next.rewards.iter_mut().find(|reward| &reward.id == id) else {
        return next;
    };

    if let Some(title) = update.title {
        reward.title = title;
    }
    if let Some(description) = update.description {
        reward.description = description;
    }
    if let Some(cost) = update.cost {
        reward.cost = clamp_points(cost);
    }
    if let Some(image_id) = update.image_id {
        reward.image_id = image_id;
    }
    if let Some(image_url) = update.image_url {
        reward.image_url = image_url;
    }
    next
}

pub fn remove_reward(state: &HouseholdState, id: &RewardId) -> HouseholdState {
    let mut next = state.clone();
    next.rewards.retain(|reward| &reward.id != id);
    next
}

/// Spend a member's points on a reward.
///
/// Unknown member or reward, or a balance below the cost, leaves the state
/// unchanged.
pub fn redeem_reward(state: &HouseholdState, member_id: &MemberId, reward_id: &RewardId) -> HouseholdState {
    let Some(cost) = state.reward(reward_id).map(|reward| reward.cost) else {
        return state.clone();
    };

    let mut next = state.clone();
    match next.family_members.iter_mut().find(|member| &member.id == member_id) {
        Some(member) if member.points >= cost => member.adjust_points(-(cost as i64)),
        Some(member) => log::debug!(
            "{} cannot afford reward {} ({} < {})",
            member.id,
            reward_id,
            member.points,
            cost
        ),
        None => {}
    }
    next
}

fn award(members: &mut [FamilyMember], assignees: &[MemberId], delta: i64) {
    for member in members.iter_mut().filter(|member| assignees.contains(&member.id)) {
        member.adjust_points(delta);
    }
}

fn replace_chore(state: &mut HouseholdState, chore: Chore) {
    if let Some(slot) = state.chores.iter_mut().find(|slot| slot.id == chore.id) {
        *slot = chore;
    }
}
