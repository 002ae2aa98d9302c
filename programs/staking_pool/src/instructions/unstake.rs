//! Unstake instruction handlers.
//!
//! Handles withdrawing principal and rewards once the pool is no longer open,
//! and paying out principal locked by an operator removal.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{RemovedStakeWithdrawn, Unstaked};
use crate::instructions::vault::transfer_from_vault;
use crate::state::{StakerAccount, StakingPool};

/// Accounts required for withdrawing from the pool.
#[derive(Accounts)]
pub struct Unstake<'info> {
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = stake_vault @ StakingError::VaultMismatch,
        has_one = reward_vault @ StakingError::VaultMismatch
    )]
    pub staking_pool: Account<'info, StakingPool>,

    #[account(
        mut,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), staker.key().as_ref()],
        bump = staker_account.bump,
        constraint = staker_account.pool == staking_pool.key() @ StakingError::StakerAccountMismatch
    )]
    pub staker_account: Account<'info, StakerAccount>,

    /// Staker's token account for receiving principal and rewards.
    #[account(
        mut,
        constraint = staker_token_account.mint == staking_pool.stake_mint @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key() @ StakingError::AccessForbidden
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Withdraw all principal and rewards.
///
/// # Security
/// - Pool must be concluded or expired
/// - Principal comes from the stake vault, rewards from the reward vault
///
/// # Returns
/// Result indicating success or error
pub fn handler(mut ctx: Context<Unstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut ctx.accounts;
    let payout = accounts
        .staking_pool
        .unstake(&mut accounts.staker_account, now)?;

    transfer_from_vault(
        &accounts.staking_pool,
        accounts.stake_vault.to_account_info(),
        accounts.staker_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
        payout.principal,
    )?;
    transfer_from_vault(
        &accounts.staking_pool,
        accounts.reward_vault.to_account_info(),
        accounts.staker_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
        payout.rewards()?,
    )?;

    msg!("Unstaked {} tokens", payout.principal);
    msg!(
        "Rewards paid - base: {}, delegation: {}",
        payout.base_reward,
        payout.delegation_reward
    );
    msg!("Pool total staked: {}", accounts.staking_pool.total_staked());

    emit!(Unstaked {
        staker: accounts.staker.key(),
        principal: payout.principal,
        base_reward: payout.base_reward,
        delegation_reward: payout.delegation_reward,
    });

    Ok(())
}

/// Withdraw principal frozen when the staker was removed as an operator.
pub fn withdraw_removed_stake_handler(mut ctx: Context<Unstake>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let accounts = &mut ctx.accounts;
    let amount = accounts
        .staking_pool
        .withdraw_removed_stake(&mut accounts.staker_account, now)?;

    transfer_from_vault(
        &accounts.staking_pool,
        accounts.stake_vault.to_account_info(),
        accounts.staker_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
        amount,
    )?;

    msg!("Removed stake withdrawn: {}", amount);
    msg!("Locked principal left: {}", accounts.staking_pool.total_removed_principal);

    emit!(RemovedStakeWithdrawn {
        staker: accounts.staker.key(),
        principal: amount,
    });

    Ok(())
}
