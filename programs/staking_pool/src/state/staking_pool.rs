use anchor_lang::prelude::*;

use crate::constants::{defaults, MAX_FEED_OPERATORS};
use crate::state::RewardState;

/// Per-class and pool-wide principal bounds.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolLimits {
    pub max_pool_size: u64,
    pub min_community_stake: u64,
    pub max_community_stake: u64,
    pub min_operator_stake: u64,
    pub max_operator_stake: u64,
}

impl PoolLimits {
    pub const LEN: usize = 8 * 5;
}

/// Parameters fixed at initialization.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolParams {
    pub priority_period_threshold: i64,
    pub regular_period_threshold: i64,
    pub max_alerting_reward: u64,
    pub min_initial_operator_count: u32,
    pub min_reward_duration: i64,
    pub slashable_duration: i64,
    pub delegation_rate_denominator: u64,
}

impl PoolParams {
    pub const LEN: usize = 8 + 8 + 8 + 4 + 8 + 8 + 8;
}

/// Timelocked successor proposal.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MigrationState {
    pub proposed_target: Pubkey,
    pub proposed_at: i64,
    /// Accepted target, `Pubkey::default()` when unset.
    pub target: Pubkey,
}

impl MigrationState {
    pub const LEN: usize = 32 + 8 + 32;
}

/// Arguments of `initialize`.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct InitializeParams {
    pub monitored_feed: Pubkey,
    pub limits: PoolLimits,
    pub params: PoolParams,
}

impl InitializeParams {
    /// Default thresholds and durations with the given feed and bounds.
    pub fn default_for(monitored_feed: Pubkey, limits: PoolLimits, max_alerting_reward: u64) -> Self {
        Self {
            monitored_feed,
            limits,
            params: PoolParams {
                priority_period_threshold: defaults::PRIORITY_PERIOD_THRESHOLD,
                regular_period_threshold: defaults::REGULAR_PERIOD_THRESHOLD,
                max_alerting_reward,
                min_initial_operator_count: defaults::MIN_INITIAL_OPERATOR_COUNT,
                min_reward_duration: defaults::MIN_REWARD_DURATION,
                slashable_duration: defaults::SLASHABLE_DURATION,
                delegation_rate_denominator: defaults::DELEGATION_RATE_DENOMINATOR,
            },
        }
    }
}

/// Lifecycle stage derived from the reward window and the concluded flag.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PoolStatus {
    Unstarted,
    Open,
    Concluded,
    Expired,
}

#[account]
#[derive(Debug, Default)]
pub struct StakingPool {
    pub owner: Pubkey,
    pub pending_owner: Pubkey,
    pub stake_mint: Pubkey,
    pub stake_vault: Pubkey,
    pub reward_vault: Pubkey,
    pub monitored_feed: Pubkey,

    /// Allowlist root for community stakers; all zeroes admits everyone.
    pub merkle_root: [u8; 32],
    pub paused: bool,

    pub limits: PoolLimits,
    pub params: PoolParams,
    pub reward: RewardState,

    pub concluded: bool,
    pub total_community_staked: u64,
    pub total_operator_staked: u64,
    pub total_removed_principal: u64,
    pub operators_count: u32,

    pub last_alerted_round_id: u64,
    pub feed_operators: Vec<Pubkey>,

    pub migration: MigrationState,

    pub stake_vault_bump: u8,
    pub reward_vault_bump: u8,
    pub bump: u8,
}

impl StakingPool {
    pub const LEN: usize = 8
        + (32 * 6)
        + 32
        + 1
        + PoolLimits::LEN
        + PoolParams::LEN
        + RewardState::LEN
        + 1
        + (8 * 3)
        + 4
        + 8
        + (4 + 32 * MAX_FEED_OPERATORS)
        + MigrationState::LEN
        + 3;

    pub fn total_staked(&self) -> u64 {
        self.total_community_staked
            .saturating_add(self.total_operator_staked)
    }

    pub fn is_feed_operator(&self, staker: &Pubkey) -> bool {
        self.feed_operators.contains(staker)
    }

    pub fn migration_target(&self) -> Pubkey {
        self.migration.target
    }
}
