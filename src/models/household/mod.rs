//! Household state container.
//!
//! Holds the roster, chore list and reward catalogue that the scheduling
//! services read and the household transformations replace as a whole.

use serde::{Deserialize, Serialize};

use crate::models::chore::{Chore, ChoreId};
use crate::models::member::{FamilyMember, MemberId};
use crate::models::reward::{Reward, RewardId};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HouseholdState {
    #[serde(default)]
    pub family_members: Vec<FamilyMember>,
    #[serde(default)]
    pub chores: Vec<Chore>,
    #[serde(default)]
    pub rewards: Vec<Reward>,
}

impl HouseholdState {
    pub fn new(family_members: Vec<FamilyMember>, chores: Vec<Chore>) -> Self {
        Self {
            family_members,
            chores,
            rewards: Vec::new(),
        }
    }

    pub fn with_rewards(mut self, rewards: Vec<Reward>) -> Self {
        self.rewards = rewards;
        self
    }

    pub fn chore(&self, id: &ChoreId) -> Option<&Chore> {
        self.chores.iter().find(|chore| &chore.id == id)
    }

    pub fn member(&self, id: &MemberId) -> Option<&FamilyMember> {
        self.family_members.iter().find(|member| &member.id == id)
    }

    pub fn reward(&self, id: &RewardId) -> Option<&Reward> {
        self.rewards.iter().find(|reward| &reward.id == id)
    }

    /// Member ids in roster order with blank ids removed.
    pub fn rotation_order(&self) -> Vec<MemberId> {
        self.family_members
            .iter()
            .filter(|member| !member.id.is_empty())
            .map(|member| member.id.clone())
            .collect()
    }
}
