//! Read-only instructions. Results are returned through the transaction's
//! return data and can be fetched with a simulated transaction.

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::logic::{FeedAccount, FeedReader, PoolRewardSnapshot, StakerSnapshot};
use crate::state::{StakerAccount, StakingPool};

#[derive(Accounts)]
pub struct PoolView<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

#[derive(Accounts)]
pub struct StakerView<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        constraint = staker_account.pool == staking_pool.key() @ StakingError::StakerAccountMismatch
    )]
    pub staker_account: Account<'info, StakerAccount>,
}

#[derive(Accounts)]
pub struct AlertView<'info> {
    #[account(
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        constraint = alerter_account.pool == staking_pool.key() @ StakingError::StakerAccountMismatch
    )]
    pub alerter_account: Account<'info, StakerAccount>,

    /// CHECK: Address pinned to the pool's monitored feed; decoded by FeedAccount.
    #[account(address = staking_pool.monitored_feed @ StakingError::FeedMismatch)]
    pub monitored_feed: UncheckedAccount<'info>,
}

pub fn get_staker_rewards_handler(ctx: Context<StakerView>) -> Result<StakerSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    let snapshot = ctx
        .accounts
        .staking_pool
        .staker_snapshot(&ctx.accounts.staker_account, now)?;
    Ok(snapshot)
}

pub fn get_pool_rewards_handler(ctx: Context<PoolView>) -> Result<PoolRewardSnapshot> {
    let now = Clock::get()?.unix_timestamp;
    Ok(ctx.accounts.staking_pool.reward_snapshot(now)?)
}

pub fn get_migration_target_handler(ctx: Context<PoolView>) -> Result<Pubkey> {
    Ok(ctx.accounts.staking_pool.migration_target())
}

pub fn can_alert_handler(ctx: Context<AlertView>) -> Result<bool> {
    let now = Clock::get()?.unix_timestamp;
    let round = FeedAccount::new(&ctx.accounts.monitored_feed).latest_round_data()?;
    Ok(ctx
        .accounts
        .staking_pool
        .can_alert(&ctx.accounts.alerter_account, &round, now))
}
