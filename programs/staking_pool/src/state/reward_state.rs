use anchor_lang::prelude::*;

/// Global accumulator for the base and delegation reward streams.
///
/// Indices are scaled by `REWARD_PRECISION`. Checkpoint weights let aggregate
/// earned rewards be read without visiting individual stakers:
/// `earned = settled + (total * index - weight) / REWARD_PRECISION`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RewardState {
    /// Reward units per stake unit per second, scaled by `REWARD_PRECISION`.
    pub rate: u64,
    /// Reward tokens held for stakers, earned or not.
    pub available: u64,
    pub start_time: i64,
    pub end_time: i64,
    pub last_accrual_time: i64,

    /// Sum of `rate * dt`.
    pub base_index: u128,
    pub total_base_eligible: u64,
    /// Sum of `eligible * base_checkpoint` over all stakers.
    pub base_checkpoint_weight: u128,
    /// Base reward already credited to staker accounts.
    pub settled_base: u64,

    /// Sum of `total_delegated * rate * dt / delegates_count`.
    pub delegation_index: u128,
    pub total_delegated: u64,
    pub delegates_count: u32,
    /// Sum of `delegation_checkpoint` over all delegates.
    pub delegation_checkpoint_sum: u128,
    pub settled_delegation: u64,
}

impl RewardState {
    pub const LEN: usize = (8 * 5) + (16 + 8 + 16 + 8) + (16 + 8 + 4 + 16 + 8);

    pub fn is_started(&self) -> bool {
        self.start_time != 0
    }
}
