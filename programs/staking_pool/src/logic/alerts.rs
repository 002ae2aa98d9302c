//! Feed downtime alerts and operator slashing.
//!
//! Once the feed has been stale for `priority_period_threshold`, on-feed operators
//! may alert for a fixed reward. After `regular_period_threshold` any staker may
//! alert for a fifth of their principal, capped at the same maximum. A valid alert
//! claws back up to `slashable_duration` worth of rewards from every staked
//! on-feed operator.

use anchor_lang::prelude::Pubkey;

use crate::constants::ALERTING_REWARD_STAKED_AMOUNT_DENOMINATOR;
use crate::logic::errors::{PoolError, PoolResult};
use crate::logic::feed::RoundData;
use crate::state::{StakerAccount, StakingPool};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlashedOperator {
    pub operator: Pubkey,
    pub base_reward: u64,
    pub delegation_reward: u64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AlertOutcome {
    pub round_id: u64,
    pub alerter_reward: u64,
    pub priority_period: bool,
    pub slashed: Vec<SlashedOperator>,
}

impl StakingPool {
    /// Validates an alert and reports whether it falls in the priority window.
    fn check_alert(&self, alerter: &StakerAccount, round: &RoundData, now: i64) -> PoolResult<bool> {
        self.ensure_not_paused()?;
        self.ensure_active(now)?;

        let staleness = round.staleness(now);
        if staleness < self.params.priority_period_threshold {
            return Err(PoolError::AlertInvalid);
        }
        if round.round_id <= self.last_alerted_round_id {
            return Err(PoolError::AlertAlreadyExists(round.round_id));
        }
        if alerter.principal == 0 {
            return Err(PoolError::AccessForbidden);
        }

        let priority_period = staleness < self.params.regular_period_threshold;
        if priority_period && !(alerter.is_operator() && self.is_feed_operator(&alerter.staker)) {
            return Err(PoolError::AlertInvalid);
        }
        Ok(priority_period)
    }

    pub fn can_alert(&self, alerter: &StakerAccount, round: &RoundData, now: i64) -> bool {
        self.check_alert(alerter, round, now).is_ok()
    }

    pub fn alerting_reward(&self, alerter: &StakerAccount, priority_period: bool) -> u64 {
        let max = self.params.max_alerting_reward;
        if priority_period {
            max
        } else {
            (alerter.principal / ALERTING_REWARD_STAKED_AMOUNT_DENOMINATOR).min(max)
        }
    }

    /// Records the alert, slashes the on-feed operators and releases the
    /// alerter's reward from `available`.
    ///
    /// `feed_operators` must hold the accounts of `self.feed_operators`.
    pub fn raise_alert(
        &mut self,
        alerter: &StakerAccount,
        feed_operators: &mut [StakerAccount],
        round: &RoundData,
        now: i64,
    ) -> PoolResult<AlertOutcome> {
        let priority_period = self.check_alert(alerter, round, now)?;
        self.last_alerted_round_id = round.round_id;

        let denominator = self.params.delegation_rate_denominator;
        let slashable = self.params.slashable_duration;
        self.reward.accrue(now)?;

        let mut slashed = Vec::with_capacity(feed_operators.len());
        for operator in feed_operators.iter_mut() {
            if operator.principal == 0 {
                continue;
            }
            self.reward.settle(operator, denominator)?;
            let staked_for = now.saturating_sub(operator.staked_at).max(0).min(slashable);
            let penalty = self.reward.slash(operator, staked_for as u64)?;
            slashed.push(SlashedOperator {
                operator: operator.staker,
                base_reward: penalty.base,
                delegation_reward: penalty.delegation,
            });
        }

        // Never dips into rewards already owed to stakers.
        let alerter_reward = self
            .alerting_reward(alerter, priority_period)
            .min(self.reward.unearned(now)?);
        self.reward.available -= alerter_reward;
        self.reward
            .reschedule(now, self.limits.max_pool_size, None)?;

        Ok(AlertOutcome {
            round_id: round.round_id,
            alerter_reward,
            priority_period,
            slashed,
        })
    }
}
