//! Read-only summaries returned by the view instructions.

use anchor_lang::prelude::*;

use crate::logic::errors::PoolResult;
use crate::state::{PoolStatus, StakerAccount, StakerClass, StakingPool};

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct StakerSnapshot {
    pub class: StakerClass,
    pub principal: u64,
    pub removed_principal: u64,
    pub base_reward: u64,
    pub delegation_reward: u64,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolRewardSnapshot {
    pub status: PoolStatus,
    pub total_staked: u64,
    pub earned_base: u64,
    pub earned_delegation: u64,
    pub available: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub rate: u64,
}

impl StakingPool {
    pub fn staker_snapshot(&self, staker: &StakerAccount, now: i64) -> PoolResult<StakerSnapshot> {
        Ok(StakerSnapshot {
            class: staker.class,
            principal: staker.principal,
            removed_principal: staker.removed_principal,
            base_reward: self.reward.base_reward(
                staker,
                now,
                self.params.delegation_rate_denominator,
            )?,
            delegation_reward: self.reward.delegation_reward(staker, now)?,
        })
    }

    pub fn reward_snapshot(&self, now: i64) -> PoolResult<PoolRewardSnapshot> {
        Ok(PoolRewardSnapshot {
            status: self.status(now),
            total_staked: self.total_staked(),
            earned_base: self.reward.earned_base(now)?,
            earned_delegation: self.reward.earned_delegation(now)?,
            available: self.reward.available,
            start_time: self.reward.start_time,
            end_time: self.reward.end_time,
            rate: self.reward.rate,
        })
    }
}
