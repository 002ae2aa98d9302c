/// Initialize instruction handler.
///
/// Creates the staking pool for a mint together with its principal and reward
/// vaults, and validates the construction parameters.
///
/// ## Security Guarantees
/// - Both vaults are PDAs whose token authority is the pool PDA
/// - The mint is locked to pool state permanently
/// - All bounds and thresholds are validated before storage

use anchor_lang::prelude::*;
use anchor_spl::token::{Mint, Token, TokenAccount};

use crate::constants::*;
use crate::events::PoolInitialized;
use crate::state::{InitializeParams, StakingPool};

/// Accounts required for pool initialization.
#[derive(Accounts)]
pub struct Initialize<'info> {
    /// The deployer; becomes the pool owner.
    #[account(mut)]
    pub owner: Signer<'info>,

    /// The pool account, one per stake mint.
    #[account(
        init,
        payer = owner,
        space = StakingPool::LEN,
        seeds = [STAKING_POOL_SEED, stake_mint.key().as_ref()],
        bump
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// The token staked and paid out as reward.
    pub stake_mint: Account<'info, Mint>,

    /// Vault holding staker principal.
    #[account(
        init,
        payer = owner,
        seeds = [STAKE_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub stake_vault: Account<'info, TokenAccount>,

    /// Vault holding the reward budget.
    #[account(
        init,
        payer = owner,
        seeds = [REWARD_VAULT_SEED, staking_pool.key().as_ref()],
        bump,
        token::mint = stake_mint,
        token::authority = staking_pool
    )]
    pub reward_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,

    pub rent: Sysvar<'info, Rent>,
}

/// Initialize a new staking pool.
///
/// # Arguments
/// * `ctx` - Initialize accounts context
/// * `params` - Monitored feed, stake bounds and alerting/reward parameters
///
/// # Returns
/// Result indicating success or error
pub fn handler(ctx: Context<Initialize>, params: InitializeParams) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();
    let pool = &mut ctx.accounts.staking_pool;

    pool.configure(&params)?;

    pool.owner = ctx.accounts.owner.key();
    pool.pending_owner = Pubkey::default();
    pool.stake_mint = ctx.accounts.stake_mint.key();
    pool.stake_vault = ctx.accounts.stake_vault.key();
    pool.reward_vault = ctx.accounts.reward_vault.key();
    pool.merkle_root = [0u8; 32];
    pool.paused = false;
    pool.concluded = false;
    pool.feed_operators = Vec::new();

    pool.bump = ctx.bumps.staking_pool;
    pool.stake_vault_bump = ctx.bumps.stake_vault;
    pool.reward_vault_bump = ctx.bumps.reward_vault;

    msg!("Staking pool initialized");
    msg!("Owner: {}", pool.owner);
    msg!("Mint: {}", pool.stake_mint);
    msg!("Feed: {}", pool.monitored_feed);
    msg!(
        "Limits - pool: {}, community: {}..{}, operator: {}..{}",
        pool.limits.max_pool_size,
        pool.limits.min_community_stake,
        pool.limits.max_community_stake,
        pool.limits.min_operator_stake,
        pool.limits.max_operator_stake
    );

    emit!(PoolInitialized {
        pool: pool_key,
        owner: pool.owner,
        stake_mint: pool.stake_mint,
        monitored_feed: pool.monitored_feed,
        max_pool_size: pool.limits.max_pool_size,
    });

    Ok(())
}
