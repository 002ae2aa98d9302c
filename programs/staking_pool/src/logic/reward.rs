//! Reward accrual for the base and delegation streams.
//!
//! Both streams settle lazily. [`RewardState::accrue`] moves the global indices up to
//! `min(now, end_time)`, and [`RewardState::settle`] credits one staker against them.
//! Every mutation of a staker's principal or class must run both first.

use crate::constants::REWARD_PRECISION;
use crate::logic::errors::{PoolError, PoolResult};
use crate::state::{RewardState, StakerAccount, StakerClass};

fn to_u64(value: u128) -> PoolResult<u64> {
    u64::try_from(value).map_err(|_| PoolError::MathOverflow)
}

fn mul(a: u128, b: u128) -> PoolResult<u128> {
    a.checked_mul(b).ok_or(PoolError::MathOverflow)
}

fn add_u64(a: u64, b: u64) -> PoolResult<u64> {
    a.checked_add(b).ok_or(PoolError::MathOverflow)
}

fn sub_u64(a: u64, b: u64) -> PoolResult<u64> {
    a.checked_sub(b).ok_or(PoolError::MathOverflow)
}

/// Reward earned by `amount` over `seconds` at `rate`.
pub fn reward_for(amount: u64, rate: u64, seconds: u64) -> PoolResult<u64> {
    let scaled = mul(mul(amount as u128, rate as u128)?, seconds as u128)?;
    to_u64(scaled / REWARD_PRECISION)
}

/// Snapshot of both indices at some instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct Indices {
    base: u128,
    delegation: u128,
}

/// Base and delegation rewards released from a staker account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardSplit {
    pub base: u64,
    pub delegation: u64,
}

impl RewardSplit {
    pub fn total(&self) -> PoolResult<u64> {
        add_u64(self.base, self.delegation)
    }
}

impl RewardState {
    fn indices_at(&self, now: i64) -> PoolResult<Indices> {
        let mut indices = Indices {
            base: self.base_index,
            delegation: self.delegation_index,
        };
        if !self.is_started() {
            return Ok(indices);
        }

        let until = now.min(self.end_time);
        if until <= self.last_accrual_time {
            return Ok(indices);
        }

        let elapsed = (until - self.last_accrual_time) as u128;
        let rate_elapsed = mul(self.rate as u128, elapsed)?;
        indices.base = indices
            .base
            .checked_add(rate_elapsed)
            .ok_or(PoolError::MathOverflow)?;

        // With no delegates the delegated share stays unearned.
        if self.delegates_count > 0 {
            let per_delegate =
                mul(self.total_delegated as u128, rate_elapsed)? / self.delegates_count as u128;
            indices.delegation = indices
                .delegation
                .checked_add(per_delegate)
                .ok_or(PoolError::MathOverflow)?;
        }

        Ok(indices)
    }

    /// Advances both indices to `min(now, end_time)`.
    pub fn accrue(&mut self, now: i64) -> PoolResult<()> {
        let indices = self.indices_at(now)?;
        self.base_index = indices.base;
        self.delegation_index = indices.delegation;
        if self.is_started() {
            self.last_accrual_time = self.last_accrual_time.max(now.min(self.end_time));
        }
        Ok(())
    }

    fn pending_base(staker: &StakerAccount, index: u128, denominator: u64) -> PoolResult<u64> {
        let eligible = staker.base_eligible_principal(denominator) as u128;
        let delta = index
            .checked_sub(staker.base_checkpoint)
            .ok_or(PoolError::MathOverflow)?;
        to_u64(mul(eligible, delta)? / REWARD_PRECISION)
    }

    fn pending_delegation(staker: &StakerAccount, index: u128) -> PoolResult<u64> {
        if !staker.is_delegate() {
            return Ok(0);
        }
        let delta = index
            .checked_sub(staker.delegation_checkpoint)
            .ok_or(PoolError::MathOverflow)?;
        to_u64(delta / REWARD_PRECISION)
    }

    /// Base reward of `staker` at `now`, settled or not.
    pub fn base_reward(
        &self,
        staker: &StakerAccount,
        now: i64,
        denominator: u64,
    ) -> PoolResult<u64> {
        let indices = self.indices_at(now)?;
        add_u64(
            staker.accrued_base_reward,
            Self::pending_base(staker, indices.base, denominator)?,
        )
    }

    /// Delegation reward of `staker` at `now`, settled or not.
    pub fn delegation_reward(&self, staker: &StakerAccount, now: i64) -> PoolResult<u64> {
        let indices = self.indices_at(now)?;
        add_u64(
            staker.accrued_delegation_reward,
            Self::pending_delegation(staker, indices.delegation)?,
        )
    }

    /// Base reward earned by all stakers and not yet paid out.
    pub fn earned_base(&self, now: i64) -> PoolResult<u64> {
        let indices = self.indices_at(now)?;
        let gross = mul(self.total_base_eligible as u128, indices.base)?;
        let unsettled = gross
            .checked_sub(self.base_checkpoint_weight)
            .ok_or(PoolError::MathOverflow)?
            / REWARD_PRECISION;
        add_u64(self.settled_base, to_u64(unsettled)?)
    }

    /// Delegation reward earned by all operators and not yet paid out.
    pub fn earned_delegation(&self, now: i64) -> PoolResult<u64> {
        let indices = self.indices_at(now)?;
        let gross = mul(self.delegates_count as u128, indices.delegation)?;
        let unsettled = gross
            .checked_sub(self.delegation_checkpoint_sum)
            .ok_or(PoolError::MathOverflow)?
            / REWARD_PRECISION;
        add_u64(self.settled_delegation, to_u64(unsettled)?)
    }

    /// Available reward not yet owed to anyone.
    pub fn unearned(&self, now: i64) -> PoolResult<u64> {
        let earned = add_u64(self.earned_base(now)?, self.earned_delegation(now)?)?;
        sub_u64(self.available, earned)
    }

    /// Credits pending rewards to `staker` and moves its checkpoints to the
    /// current indices. Call after [`RewardState::accrue`].
    pub fn settle(&mut self, staker: &mut StakerAccount, denominator: u64) -> PoolResult<()> {
        let base = Self::pending_base(staker, self.base_index, denominator)?;
        let eligible = staker.base_eligible_principal(denominator) as u128;
        self.base_checkpoint_weight = self
            .base_checkpoint_weight
            .checked_sub(mul(eligible, staker.base_checkpoint)?)
            .and_then(|w| w.checked_add(eligible.checked_mul(self.base_index)?))
            .ok_or(PoolError::MathOverflow)?;
        staker.base_checkpoint = self.base_index;
        staker.accrued_base_reward = add_u64(staker.accrued_base_reward, base)?;
        self.settled_base = add_u64(self.settled_base, base)?;

        if staker.is_delegate() {
            let delegation = Self::pending_delegation(staker, self.delegation_index)?;
            self.delegation_checkpoint_sum = self
                .delegation_checkpoint_sum
                .checked_sub(staker.delegation_checkpoint)
                .and_then(|s| s.checked_add(self.delegation_index))
                .ok_or(PoolError::MathOverflow)?;
            staker.delegation_checkpoint = self.delegation_index;
            staker.accrued_delegation_reward =
                add_u64(staker.accrued_delegation_reward, delegation)?;
            self.settled_delegation = add_u64(self.settled_delegation, delegation)?;
        }

        Ok(())
    }

    /// Applies a new class and principal to a settled staker, keeping the pool
    /// totals, checkpoint weights and delegate set consistent.
    pub fn update_stake(
        &mut self,
        staker: &mut StakerAccount,
        class: StakerClass,
        principal: u64,
        denominator: u64,
    ) -> PoolResult<()> {
        let old_eligible = staker.base_eligible_principal(denominator);
        let old_delegated = staker.delegated_principal(denominator);
        let was_delegate = staker.is_delegate();

        staker.class = class;
        staker.principal = principal;

        let new_eligible = staker.base_eligible_principal(denominator);
        let new_delegated = staker.delegated_principal(denominator);
        let is_delegate = staker.is_delegate();

        self.total_base_eligible = add_u64(
            sub_u64(self.total_base_eligible, old_eligible)?,
            new_eligible,
        )?;
        self.base_checkpoint_weight = self
            .base_checkpoint_weight
            .checked_sub(mul(old_eligible as u128, staker.base_checkpoint)?)
            .and_then(|w| w.checked_add((new_eligible as u128).checked_mul(staker.base_checkpoint)?))
            .ok_or(PoolError::MathOverflow)?;
        self.total_delegated = add_u64(
            sub_u64(self.total_delegated, old_delegated)?,
            new_delegated,
        )?;

        match (was_delegate, is_delegate) {
            (false, true) => {
                self.delegates_count = self
                    .delegates_count
                    .checked_add(1)
                    .ok_or(PoolError::MathOverflow)?;
                staker.delegation_checkpoint = self.delegation_index;
                self.delegation_checkpoint_sum = self
                    .delegation_checkpoint_sum
                    .checked_add(self.delegation_index)
                    .ok_or(PoolError::MathOverflow)?;
            }
            (true, false) => {
                self.delegates_count = self
                    .delegates_count
                    .checked_sub(1)
                    .ok_or(PoolError::MathOverflow)?;
                self.delegation_checkpoint_sum = self
                    .delegation_checkpoint_sum
                    .checked_sub(staker.delegation_checkpoint)
                    .ok_or(PoolError::MathOverflow)?;
            }
            _ => {}
        }

        Ok(())
    }

    /// Releases a settled staker's rewards for payout, deducting them from
    /// `available`.
    pub fn withdraw_rewards(&mut self, staker: &mut StakerAccount) -> PoolResult<RewardSplit> {
        let split = self.release(staker)?;
        self.available = sub_u64(self.available, split.total()?)?;
        Ok(split)
    }

    /// Drops a settled staker's rewards back into the unearned balance.
    pub fn forfeit_rewards(&mut self, staker: &mut StakerAccount) -> PoolResult<RewardSplit> {
        self.release(staker)
    }

    fn release(&mut self, staker: &mut StakerAccount) -> PoolResult<RewardSplit> {
        let split = RewardSplit {
            base: staker.accrued_base_reward,
            delegation: staker.accrued_delegation_reward,
        };
        self.settled_base = sub_u64(self.settled_base, split.base)?;
        self.settled_delegation = sub_u64(self.settled_delegation, split.delegation)?;
        staker.accrued_base_reward = 0;
        staker.accrued_delegation_reward = 0;
        Ok(split)
    }

    /// Claws back what a settled operator would have earned over `seconds`,
    /// never more than it has accrued.
    pub fn slash(&mut self, staker: &mut StakerAccount, seconds: u64) -> PoolResult<RewardSplit> {
        let base_penalty = reward_for(staker.principal, self.rate, seconds)?;
        let base = base_penalty.min(staker.accrued_base_reward);

        let delegation = if self.delegates_count > 0 {
            let scaled = mul(
                mul(self.total_delegated as u128, self.rate as u128)?,
                seconds as u128,
            )?;
            let penalty = to_u64(scaled / mul(REWARD_PRECISION, self.delegates_count as u128)?)?;
            penalty.min(staker.accrued_delegation_reward)
        } else {
            0
        };

        staker.accrued_base_reward -= base;
        staker.accrued_delegation_reward -= delegation;
        self.settled_base = sub_u64(self.settled_base, base)?;
        self.settled_delegation = sub_u64(self.settled_delegation, delegation)?;

        Ok(RewardSplit { base, delegation })
    }

    /// Recomputes `end_time` so the unearned balance lasts at the current rate
    /// with the whole pool staked. Call after [`RewardState::accrue`].
    pub fn reschedule(
        &mut self,
        now: i64,
        max_pool_size: u64,
        min_duration: Option<i64>,
    ) -> PoolResult<()> {
        if self.rate == 0 {
            return Err(PoolError::InvalidRewardRate);
        }
        let pool_units = max_pool_size as u128 / REWARD_PRECISION;
        if pool_units == 0 {
            return Err(PoolError::InvalidPoolSize(max_pool_size));
        }

        let unearned = self.unearned(now)? as u128;
        let duration = unearned / self.rate as u128 / pool_units;
        let duration = i64::try_from(duration).map_err(|_| PoolError::MathOverflow)?;

        if let Some(min) = min_duration {
            if duration < min {
                return Err(PoolError::RewardDurationTooShort);
            }
        }

        self.end_time = now.checked_add(duration).ok_or(PoolError::MathOverflow)?;
        Ok(())
    }
}
