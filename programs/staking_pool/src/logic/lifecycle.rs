//! Pool lifecycle, capacity configuration and the operator registry.
//!
//! Pool status is derived from the reward window: `Unstarted` until `start`, then
//! `Open` until the owner concludes it or `end_time` passes. Owner-only checks live
//! in the instruction account constraints; everything here assumes an authorized caller.

use anchor_lang::prelude::Pubkey;

use crate::constants::{MAX_FEED_OPERATORS, REWARD_PRECISION};
use crate::logic::access::EMPTY_ROOT;
use crate::logic::errors::{PoolError, PoolResult};
use crate::state::{InitializeParams, PoolStatus, StakerAccount, StakerClass, StakingPool};

/// Operator taken out of the pool along with its now-locked principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RemovedOperator {
    pub operator: Pubkey,
    pub principal: u64,
}

/// Rejects a batch naming the same operator twice.
pub fn ensure_distinct_operators(operators: &[Pubkey]) -> PoolResult<()> {
    for (i, operator) in operators.iter().enumerate() {
        if operators[..i].contains(operator) {
            return Err(PoolError::OperatorAlreadyExists(*operator));
        }
    }
    Ok(())
}

impl StakingPool {
    pub fn status(&self, now: i64) -> PoolStatus {
        if !self.reward.is_started() {
            PoolStatus::Unstarted
        } else if self.concluded {
            PoolStatus::Concluded
        } else if now >= self.reward.end_time {
            PoolStatus::Expired
        } else {
            PoolStatus::Open
        }
    }

    pub fn is_active(&self, now: i64) -> bool {
        self.status(now) == PoolStatus::Open
    }

    pub fn ensure_active(&self, now: i64) -> PoolResult<()> {
        if !self.is_active(now) {
            return Err(PoolError::InvalidPoolStatus(false, true));
        }
        Ok(())
    }

    pub fn ensure_inactive(&self, now: i64) -> PoolResult<()> {
        if self.is_active(now) {
            return Err(PoolError::InvalidPoolStatus(true, false));
        }
        Ok(())
    }

    pub fn ensure_not_paused(&self) -> PoolResult<()> {
        if self.paused {
            return Err(PoolError::Paused);
        }
        Ok(())
    }

    /// Validates and stores the construction parameters.
    pub fn configure(&mut self, init: &InitializeParams) -> PoolResult<()> {
        let limits = &init.limits;
        let params = &init.params;

        if init.monitored_feed == Pubkey::default() {
            return Err(PoolError::InvalidZeroAddress);
        }
        if params.delegation_rate_denominator == 0
            || REWARD_PRECISION % params.delegation_rate_denominator as u128 != 0
        {
            return Err(PoolError::InvalidDelegationRate);
        }
        if params.regular_period_threshold <= params.priority_period_threshold {
            return Err(PoolError::InvalidRegularPeriodThreshold);
        }
        if limits.min_operator_stake == 0 || limits.min_operator_stake > limits.max_operator_stake {
            return Err(PoolError::InvalidMinOperatorStakeAmount);
        }
        if limits.min_community_stake > limits.max_community_stake {
            return Err(PoolError::InvalidMinCommunityStakeAmount);
        }
        if params.max_alerting_reward > limits.max_operator_stake {
            return Err(PoolError::InvalidMaxAlertingRewardAmount);
        }
        if (limits.max_pool_size as u128) < REWARD_PRECISION {
            return Err(PoolError::InvalidPoolSize(limits.max_pool_size));
        }
        if limits.max_community_stake > limits.max_pool_size {
            return Err(PoolError::InvalidMaxStakeAmount(limits.max_community_stake));
        }
        if limits.max_operator_stake > limits.max_pool_size {
            return Err(PoolError::InvalidMaxStakeAmount(limits.max_operator_stake));
        }
        for duration in [params.priority_period_threshold, params.min_reward_duration] {
            if duration < 0 {
                return Err(PoolError::InvalidDuration(duration));
            }
        }
        if params.slashable_duration <= 0 {
            return Err(PoolError::InvalidDuration(params.slashable_duration));
        }

        self.monitored_feed = init.monitored_feed;
        self.limits = *limits;
        self.params = *params;
        Ok(())
    }

    /// Pool space not taken by community principal or reserved for operators.
    pub fn remaining_pool_space(&self) -> PoolResult<u64> {
        let reserved = (self.operators_count as u64)
            .checked_mul(self.limits.max_operator_stake)
            .and_then(|r| r.checked_add(self.total_community_staked))
            .ok_or(PoolError::MathOverflow)?;
        Ok(self.limits.max_pool_size.saturating_sub(reserved))
    }

    /// Opens the pool and funds the first reward window.
    pub fn start(&mut self, reward_amount: u64, reward_rate: u64, now: i64) -> PoolResult<()> {
        self.ensure_not_paused()?;
        if self.reward.is_started() {
            return Err(PoolError::PoolAlreadyStarted);
        }
        if self.merkle_root == EMPTY_ROOT {
            return Err(PoolError::MerkleRootNotSet);
        }
        if self.operators_count < self.params.min_initial_operator_count {
            return Err(PoolError::InadequateInitialOperatorsCount(
                self.operators_count,
                self.params.min_initial_operator_count,
            ));
        }
        if reward_rate == 0 {
            return Err(PoolError::InvalidRewardRate);
        }

        let mut reward = self.reward;
        reward.rate = reward_rate;
        reward.available = reward
            .available
            .checked_add(reward_amount)
            .ok_or(PoolError::MathOverflow)?;
        reward.start_time = now;
        reward.last_accrual_time = now;
        reward.end_time = now;
        reward.reschedule(
            now,
            self.limits.max_pool_size,
            Some(self.params.min_reward_duration),
        )?;

        self.reward = reward;
        Ok(())
    }

    /// Ends the pool early; accrual stops at `now`.
    pub fn conclude(&mut self, now: i64) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;
        self.reward.accrue(now)?;
        self.reward.end_time = now;
        self.concluded = true;
        Ok(())
    }

    /// Raises the pool and per-staker maximums and stretches the reward window.
    pub fn set_pool_config(
        &mut self,
        max_pool_size: u64,
        max_community_stake: u64,
        max_operator_stake: u64,
        now: i64,
    ) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;

        let limits = self.limits;
        if max_operator_stake < limits.max_operator_stake {
            return Err(PoolError::InvalidMaxStakeAmount(max_operator_stake));
        }
        if max_community_stake < limits.max_community_stake {
            return Err(PoolError::InvalidMaxStakeAmount(max_community_stake));
        }
        if max_pool_size < limits.max_pool_size {
            return Err(PoolError::InvalidPoolSize(max_pool_size));
        }
        if max_community_stake > max_pool_size {
            return Err(PoolError::InvalidMaxStakeAmount(max_community_stake));
        }
        if max_operator_stake > max_pool_size {
            return Err(PoolError::InvalidMaxStakeAmount(max_operator_stake));
        }
        let reserved = (self.operators_count as u64)
            .checked_mul(max_operator_stake)
            .ok_or(PoolError::MathOverflow)?;
        if reserved > max_pool_size.saturating_sub(self.total_community_staked) {
            return Err(PoolError::InvalidMaxStakeAmount(max_operator_stake));
        }

        let mut reward = self.reward;
        reward.accrue(now)?;
        reward.reschedule(now, max_pool_size, Some(self.params.min_reward_duration))?;

        self.limits.max_pool_size = max_pool_size;
        self.limits.max_community_stake = max_community_stake;
        self.limits.max_operator_stake = max_operator_stake;
        self.reward = reward;
        Ok(())
    }

    /// Registers operators and reserves `max_operator_stake` of pool space for each.
    pub fn add_operators(&mut self, stakers: &mut [StakerAccount], now: i64) -> PoolResult<()> {
        self.ensure_not_paused()?;
        if self.reward.is_started() {
            self.ensure_active(now)?;
        }

        for (i, staker) in stakers.iter().enumerate() {
            let duplicate = stakers[..i].iter().any(|s| s.staker == staker.staker);
            match staker.class {
                _ if duplicate => return Err(PoolError::OperatorAlreadyExists(staker.staker)),
                StakerClass::Operator => return Err(PoolError::OperatorAlreadyExists(staker.staker)),
                StakerClass::Removed => return Err(PoolError::OperatorIsLocked(staker.staker)),
                StakerClass::Community if staker.principal > 0 => {
                    return Err(PoolError::ExistingStakeFound(staker.staker))
                }
                _ => {}
            }
        }

        let remaining = self.remaining_pool_space()?;
        let required = (stakers.len() as u64)
            .checked_mul(self.limits.max_operator_stake)
            .ok_or(PoolError::MathOverflow)?;
        if remaining < required {
            return Err(PoolError::InsufficientRemainingPoolSpace(remaining, required));
        }

        let denominator = self.params.delegation_rate_denominator;
        self.reward.accrue(now)?;
        for staker in stakers.iter_mut() {
            self.reward.settle(staker, denominator)?;
            self.reward
                .update_stake(staker, StakerClass::Operator, 0, denominator)?;
        }
        self.operators_count = self
            .operators_count
            .checked_add(stakers.len() as u32)
            .ok_or(PoolError::MathOverflow)?;
        Ok(())
    }

    /// Removes operators, forfeiting their rewards and locking their principal
    /// until the pool closes.
    pub fn remove_operators(
        &mut self,
        stakers: &mut [StakerAccount],
        now: i64,
    ) -> PoolResult<Vec<RemovedOperator>> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;

        for (i, staker) in stakers.iter().enumerate() {
            let duplicate = stakers[..i].iter().any(|s| s.staker == staker.staker);
            if duplicate || !staker.is_operator() {
                return Err(PoolError::OperatorDoesNotExist(staker.staker));
            }
            if self.is_feed_operator(&staker.staker) {
                return Err(PoolError::OperatorIsAssignedToFeed(staker.staker));
            }
        }

        let denominator = self.params.delegation_rate_denominator;
        self.reward.accrue(now)?;

        let mut removed = Vec::with_capacity(stakers.len());
        for staker in stakers.iter_mut() {
            self.reward.settle(staker, denominator)?;
            self.reward.forfeit_rewards(staker)?;

            let principal = staker.principal;
            self.reward
                .update_stake(staker, StakerClass::Removed, 0, denominator)?;
            staker.removed_principal = staker
                .removed_principal
                .checked_add(principal)
                .ok_or(PoolError::MathOverflow)?;

            self.total_operator_staked = self
                .total_operator_staked
                .checked_sub(principal)
                .ok_or(PoolError::MathOverflow)?;
            self.total_removed_principal = self
                .total_removed_principal
                .checked_add(principal)
                .ok_or(PoolError::MathOverflow)?;
            self.operators_count = self
                .operators_count
                .checked_sub(1)
                .ok_or(PoolError::MathOverflow)?;

            removed.push(RemovedOperator {
                operator: staker.staker,
                principal,
            });
        }

        Ok(removed)
    }

    /// Replaces the on-feed operator set.
    pub fn set_feed_operators(&mut self, operators: &[StakerAccount]) -> PoolResult<()> {
        self.ensure_not_paused()?;
        if operators.len() > MAX_FEED_OPERATORS {
            return Err(PoolError::TooManyFeedOperators(MAX_FEED_OPERATORS));
        }
        for (i, operator) in operators.iter().enumerate() {
            if !operator.is_operator() {
                return Err(PoolError::OperatorDoesNotExist(operator.staker));
            }
            if operators[..i].iter().any(|o| o.staker == operator.staker) {
                return Err(PoolError::OperatorAlreadyExists(operator.staker));
            }
        }

        self.feed_operators = operators.iter().map(|o| o.staker).collect();
        Ok(())
    }

    pub fn set_merkle_root(&mut self, root: [u8; 32]) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.merkle_root = root;
        Ok(())
    }

    /// Funds more reward and extends the window at the current rate.
    pub fn add_reward(&mut self, amount: u64, now: i64) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;

        let mut reward = self.reward;
        reward.accrue(now)?;
        reward.available = reward
            .available
            .checked_add(amount)
            .ok_or(PoolError::MathOverflow)?;
        reward.reschedule(
            now,
            self.limits.max_pool_size,
            Some(self.params.min_reward_duration),
        )?;

        self.reward = reward;
        Ok(())
    }

    pub fn change_reward_rate(&mut self, rate: u64, now: i64) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;
        if rate == 0 {
            return Err(PoolError::InvalidRewardRate);
        }

        let mut reward = self.reward;
        reward.accrue(now)?;
        reward.rate = rate;
        reward.reschedule(
            now,
            self.limits.max_pool_size,
            Some(self.params.min_reward_duration),
        )?;

        self.reward = reward;
        Ok(())
    }

    /// Releases reward nobody has earned; what remains covers outstanding claims.
    pub fn withdraw_unused_reward(&mut self, now: i64) -> PoolResult<u64> {
        self.ensure_not_paused()?;
        self.ensure_inactive(now)?;
        self.reward.accrue(now)?;
        let unused = self.reward.unearned(now)?;
        self.reward.available -= unused;
        Ok(unused)
    }

    pub fn transfer_ownership(&mut self, to: Pubkey) -> PoolResult<()> {
        if to == self.owner {
            return Err(PoolError::CannotTransferToSelf);
        }
        self.pending_owner = to;
        Ok(())
    }

    /// Completes a handoff; returns the previous owner.
    pub fn accept_ownership(&mut self, caller: Pubkey) -> PoolResult<Pubkey> {
        if self.pending_owner == Pubkey::default() || caller != self.pending_owner {
            return Err(PoolError::MustBeProposedOwner);
        }
        let previous = self.owner;
        self.owner = caller;
        self.pending_owner = Pubkey::default();
        Ok(previous)
    }

    pub fn pause(&mut self) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.paused = true;
        Ok(())
    }

    pub fn unpause(&mut self) -> PoolResult<()> {
        if !self.paused {
            return Err(PoolError::NotPaused);
        }
        self.paused = false;
        Ok(())
    }
}
