//! # Staking Pool Program
//!
//! A single-token staking pool backing a price feed's node operators.
//!
//! - **Operators** are registered by the owner, stake within their own bounds and
//!   receive a share of every community staker's reward (the delegation reward).
//! - **Community stakers** join through a Merkle allowlist and earn the base reward
//!   on the part of their stake that is not delegated.
//! - **Alerts** let stakers report a stale feed. The alerter is paid from the
//!   reward budget and the operators serving the feed lose recently earned reward.
//!
//! ## Features
//! - Fixed-budget reward window, stretched or shortened as the budget changes
//! - Lazy O(1) reward settlement for any number of stakers
//! - Two-step ownership transfer and emergency pause
//! - Timelocked migration of stakes to a successor program
//! - Safe math with overflow protection

use anchor_lang::prelude::*;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod logic;
pub mod state;

#[cfg(test)]
mod tests;

use instructions::*;
use logic::{PoolRewardSnapshot, StakerSnapshot};
use state::InitializeParams;

#[program]
pub mod staking_pool {
    use super::*;

    /// Creates the pool and its vaults for the given stake mint.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for initialization
    /// * `params` - Monitored feed, stake bounds and alerting/reward parameters
    ///
    /// # Errors
    /// Returns an error if any bound or threshold is inconsistent.
    pub fn initialize(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
        instructions::initialize::handler(ctx, params)
    }

    /// Opens the pool and funds the first reward window.
    ///
    /// # Arguments
    /// * `ctx` - The context containing reward funding accounts
    /// * `reward_amount` - Reward tokens deposited
    /// * `reward_rate` - Reward per staked token per second, scaled by the precision
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool was already started
    /// - The Merkle root is not set
    /// - Fewer operators than required are registered
    /// - The budget does not cover the minimum reward duration
    pub fn start(ctx: Context<ManageRewards>, reward_amount: u64, reward_rate: u64) -> Result<()> {
        instructions::rewards::start_handler(ctx, reward_amount, reward_rate)
    }

    /// Ends the reward window early.
    ///
    /// # Errors
    /// Returns an error if the pool is not open.
    pub fn conclude(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::conclude_handler(ctx)
    }

    /// Raises the pool and per-staker maximums.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is not open
    /// - Any limit would decrease
    /// - A per-staker maximum exceeds the pool size
    pub fn set_pool_config(
        ctx: Context<AdminControl>,
        max_pool_size: u64,
        max_community_stake: u64,
        max_operator_stake: u64,
    ) -> Result<()> {
        instructions::admin::set_pool_config_handler(
            ctx,
            max_pool_size,
            max_community_stake,
            max_operator_stake,
        )
    }

    /// Registers operators. Remaining accounts are their staker PDAs.
    ///
    /// # Errors
    /// Returns an error if:
    /// - An address is already an operator, was removed, or holds community stake
    /// - The pool lacks space to reserve for the new operators
    pub fn add_operators<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
        operators: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::operators::add_operators_handler(ctx, operators)
    }

    /// Removes operators, forfeiting their rewards and locking their principal.
    ///
    /// # Errors
    /// Returns an error if an address is not an operator or serves the feed.
    pub fn remove_operators<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
        operators: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::operators::remove_operators_handler(ctx, operators)
    }

    /// Replaces the set of operators serving the monitored feed.
    ///
    /// # Errors
    /// Returns an error if an address is not an operator, is repeated, or the set
    /// is too large.
    pub fn set_feed_operators<'info>(
        ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
        operators: Vec<Pubkey>,
    ) -> Result<()> {
        instructions::operators::set_feed_operators_handler(ctx, operators)
    }

    /// Replaces the community allowlist root.
    pub fn set_merkle_root(ctx: Context<AdminControl>, merkle_root: [u8; 32]) -> Result<()> {
        instructions::admin::set_merkle_root_handler(ctx, merkle_root)
    }

    /// Stakes tokens. Community stakers pass a Merkle proof of access.
    ///
    /// # Arguments
    /// * `ctx` - The context containing all accounts needed for staking
    /// * `amount` - Tokens offered; only whole precision units are taken
    /// * `proof` - Merkle proof for the staker's address
    ///
    /// # Errors
    /// Returns an error if:
    /// - Staking is paused or the pool is not open
    /// - The proof does not verify
    /// - The resulting stake is outside the staker's bounds
    /// - The pool has no room left
    pub fn stake(ctx: Context<Stake>, amount: u64, proof: Vec<[u8; 32]>) -> Result<()> {
        instructions::stake::handler(ctx, amount, proof)
    }

    /// Withdraws all principal and rewards after the pool closes.
    ///
    /// # Errors
    /// Returns an error if the pool is still open or nothing is staked.
    pub fn unstake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::handler(ctx)
    }

    /// Withdraws principal locked by an operator removal.
    ///
    /// # Errors
    /// Returns an error if the pool is still open or nothing is locked.
    pub fn withdraw_removed_stake(ctx: Context<Unstake>) -> Result<()> {
        instructions::unstake::withdraw_removed_stake_handler(ctx)
    }

    /// Sets a new reward rate.
    ///
    /// # Errors
    /// Returns an error if the rate is zero, the pool is not open, or the
    /// remaining budget no longer covers the minimum duration.
    pub fn change_reward_rate(ctx: Context<AdminControl>, reward_rate: u64) -> Result<()> {
        instructions::admin::change_reward_rate_handler(ctx, reward_rate)
    }

    /// Adds to the reward budget.
    ///
    /// # Errors
    /// Returns an error if the pool is not open.
    pub fn add_reward(ctx: Context<ManageRewards>, amount: u64) -> Result<()> {
        instructions::rewards::add_reward_handler(ctx, amount)
    }

    /// Returns unearned reward to the owner after the pool closes.
    ///
    /// # Errors
    /// Returns an error if the pool is still open.
    pub fn withdraw_unused_reward(ctx: Context<ManageRewards>) -> Result<()> {
        instructions::rewards::withdraw_unused_reward_handler(ctx)
    }

    /// Reports a stale feed round. Remaining accounts are the staker PDAs of the
    /// feed operators.
    ///
    /// # Errors
    /// Returns an error if:
    /// - The pool is not open
    /// - The feed is fresh or the round was already alerted
    /// - The caller has no stake, or is off-feed during the priority window
    pub fn raise_alert<'info>(ctx: Context<'_, '_, 'info, 'info, RaiseAlert<'info>>) -> Result<()> {
        instructions::alert::handler(ctx)
    }

    /// Proposes a successor program for migrations.
    ///
    /// # Errors
    /// Returns an error if the target cannot receive migrations or is already
    /// proposed or accepted.
    pub fn propose_migration_target(ctx: Context<ProposeMigrationTarget>) -> Result<()> {
        instructions::migration::propose_migration_target_handler(ctx)
    }

    /// Accepts the proposed successor after the timelock.
    ///
    /// # Errors
    /// Returns an error if nothing is proposed or the timelock has not passed.
    pub fn accept_migration_target(ctx: Context<AdminControl>) -> Result<()> {
        instructions::migration::accept_migration_target_handler(ctx)
    }

    /// Moves the caller's stake and rewards to the accepted successor.
    ///
    /// # Errors
    /// Returns an error if the pool is still open, no target is accepted, or
    /// nothing is staked.
    pub fn migrate(ctx: Context<Migrate>, payload: Vec<u8>) -> Result<()> {
        instructions::migration::migrate_handler(ctx, payload)
    }

    /// Proposes a new owner.
    pub fn transfer_ownership(ctx: Context<AdminControl>, new_owner: Pubkey) -> Result<()> {
        instructions::admin::transfer_ownership_handler(ctx, new_owner)
    }

    /// Completes an ownership transfer; must be signed by the proposed owner.
    pub fn accept_ownership(ctx: Context<AcceptOwnership>) -> Result<()> {
        instructions::admin::accept_ownership_handler(ctx)
    }

    /// Halts staking, alerting and reward management.
    pub fn emergency_pause(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::emergency_pause_handler(ctx)
    }

    pub fn emergency_unpause(ctx: Context<AdminControl>) -> Result<()> {
        instructions::admin::emergency_unpause_handler(ctx)
    }

    /// Returns a staker's principal and rewards as of now.
    pub fn get_staker_rewards(ctx: Context<StakerView>) -> Result<StakerSnapshot> {
        instructions::views::get_staker_rewards_handler(ctx)
    }

    /// Returns the pool's reward totals as of now.
    pub fn get_pool_rewards(ctx: Context<PoolView>) -> Result<PoolRewardSnapshot> {
        instructions::views::get_pool_rewards_handler(ctx)
    }

    pub fn get_migration_target(ctx: Context<PoolView>) -> Result<Pubkey> {
        instructions::views::get_migration_target_handler(ctx)
    }

    /// Reports whether the staker could raise an alert right now.
    pub fn can_alert(ctx: Context<AlertView>) -> Result<bool> {
        instructions::views::can_alert_handler(ctx)
    }
}
