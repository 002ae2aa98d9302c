//! Principal ledger: deposits, full withdrawals and removed-stake payouts.

use crate::constants::REWARD_PRECISION;
use crate::logic::access;
use crate::logic::errors::{PoolError, PoolResult};
use crate::state::{StakerAccount, StakerClass, StakingPool};

/// Tokens owed to a staker closing its position.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Payout {
    pub principal: u64,
    pub base_reward: u64,
    pub delegation_reward: u64,
}

impl Payout {
    pub fn rewards(&self) -> PoolResult<u64> {
        self.base_reward
            .checked_add(self.delegation_reward)
            .ok_or(PoolError::MathOverflow)
    }

    pub fn total(&self) -> PoolResult<u64> {
        self.principal
            .checked_add(self.rewards()?)
            .ok_or(PoolError::MathOverflow)
    }
}

impl StakingPool {
    /// Admits `amount` into `staker`'s position and returns the consumed part.
    ///
    /// Only whole multiples of the reward precision are consumed; the caller keeps
    /// the remainder.
    pub fn deposit(
        &mut self,
        staker: &mut StakerAccount,
        amount: u64,
        proof: &[[u8; 32]],
        now: i64,
    ) -> PoolResult<u64> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;

        let class = match staker.class {
            StakerClass::Removed => return Err(PoolError::AccessForbidden),
            StakerClass::Operator => StakerClass::Operator,
            StakerClass::Unset | StakerClass::Community => {
                if !access::has_access(&self.merkle_root, &staker.staker, proof) {
                    return Err(PoolError::AccessForbidden);
                }
                StakerClass::Community
            }
        };

        let precision = REWARD_PRECISION as u64;
        let consumed = amount - amount % precision;
        if consumed < precision {
            return Err(PoolError::InsufficientStakeAmount(precision));
        }

        let (min, max) = match class {
            StakerClass::Operator => (self.limits.min_operator_stake, self.limits.max_operator_stake),
            _ => (self.limits.min_community_stake, self.limits.max_community_stake),
        };
        let principal = staker
            .principal
            .checked_add(consumed)
            .ok_or(PoolError::MathOverflow)?;
        if principal < min {
            return Err(PoolError::InsufficientStakeAmount(min));
        }
        if principal > max {
            return Err(PoolError::ExcessiveStakeAmount(
                max.saturating_sub(staker.principal),
            ));
        }
        if class == StakerClass::Community {
            let remaining = self.remaining_pool_space()?;
            if consumed > remaining {
                return Err(PoolError::ExcessiveStakeAmount(remaining));
            }
        }

        let denominator = self.params.delegation_rate_denominator;
        self.reward.accrue(now)?;
        self.reward.settle(staker, denominator)?;
        if staker.principal == 0 {
            staker.staked_at = now;
        }
        self.reward
            .update_stake(staker, class, principal, denominator)?;

        match class {
            StakerClass::Operator => {
                self.total_operator_staked = self
                    .total_operator_staked
                    .checked_add(consumed)
                    .ok_or(PoolError::MathOverflow)?
            }
            _ => {
                self.total_community_staked = self
                    .total_community_staked
                    .checked_add(consumed)
                    .ok_or(PoolError::MathOverflow)?
            }
        }

        Ok(consumed)
    }

    /// Withdraws principal and all rewards once the pool has closed.
    pub fn unstake(&mut self, staker: &mut StakerAccount, now: i64) -> PoolResult<Payout> {
        self.ensure_not_paused()?;
        self.ensure_inactive(now)?;
        self.close_position(staker, now)
    }

    /// Pays out the principal frozen by an operator removal.
    pub fn withdraw_removed_stake(
        &mut self,
        staker: &mut StakerAccount,
        now: i64,
    ) -> PoolResult<u64> {
        self.ensure_not_paused()?;
        self.ensure_inactive(now)?;
        let amount = staker.removed_principal;
        if amount == 0 {
            return Err(PoolError::StakeNotFound(staker.staker));
        }

        staker.removed_principal = 0;
        self.total_removed_principal = self
            .total_removed_principal
            .checked_sub(amount)
            .ok_or(PoolError::MathOverflow)?;
        Ok(amount)
    }

    /// Settles and zeroes a staker's position, releasing its rewards from
    /// `available`. The class is kept so operators stay registered.
    pub(crate) fn close_position(
        &mut self,
        staker: &mut StakerAccount,
        now: i64,
    ) -> PoolResult<Payout> {
        let principal = staker.principal;
        if principal == 0 {
            return Err(PoolError::StakeNotFound(staker.staker));
        }

        let denominator = self.params.delegation_rate_denominator;
        self.reward.accrue(now)?;
        self.reward.settle(staker, denominator)?;
        let rewards = self.reward.withdraw_rewards(staker)?;

        let class = staker.class;
        self.reward.update_stake(staker, class, 0, denominator)?;
        staker.staked_at = 0;

        if class == StakerClass::Operator {
            self.total_operator_staked = self
                .total_operator_staked
                .checked_sub(principal)
                .ok_or(PoolError::MathOverflow)?;
        } else {
            self.total_community_staked = self
                .total_community_staked
                .checked_sub(principal)
                .ok_or(PoolError::MathOverflow)?;
        }

        Ok(Payout {
            principal,
            base_reward: rewards.base,
            delegation_reward: rewards.delegation,
        })
    }
}
