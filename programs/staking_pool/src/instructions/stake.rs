//! Stake instruction handler.
//!
//! Handles depositing tokens into the pool. Operators deposit against their
//! reserved space; everyone else needs a Merkle proof of access.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::Staked;
use crate::instructions::vault::transfer_to_vault;
use crate::state::{StakerAccount, StakingPool};

/// Accounts required for staking.
#[derive(Accounts)]
pub struct Stake<'info> {
    /// The address staking tokens.
    #[account(mut)]
    pub staker: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = stake_vault @ StakingError::VaultMismatch
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Staker's record (created on first deposit).
    #[account(
        init_if_needed,
        payer = staker,
        space = StakerAccount::LEN,
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), staker.key().as_ref()],
        bump
    )]
    pub staker_account: Account<'info, StakerAccount>,

    /// Staker's token account for the staked mint.
    #[account(
        mut,
        constraint = staker_token_account.mint == staking_pool.stake_mint @ StakingError::MintMismatch,
        constraint = staker_token_account.owner == staker.key() @ StakingError::AccessForbidden
    )]
    pub staker_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    pub system_program: Program<'info, System>,

    pub token_program: Program<'info, Token>,
}

/// Stake tokens into the pool.
///
/// Only whole precision units of `amount` are taken; the remainder stays with
/// the staker.
///
/// # Arguments
/// * `ctx` - Stake accounts context
/// * `amount` - Amount of tokens offered
/// * `proof` - Merkle proof of access; ignored for operators
///
/// # Returns
/// Result indicating success or error
pub fn handler(mut ctx: Context<Stake>, amount: u64, proof: Vec<[u8; 32]>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    if ctx.accounts.staker_account.pool == Pubkey::default() {
        *ctx.accounts.staker_account = StakerAccount::new(
            ctx.accounts.staking_pool.key(),
            ctx.accounts.staker.key(),
            ctx.bumps.staker_account,
        );
    }

    let accounts = &mut ctx.accounts;
    let consumed = accounts
        .staking_pool
        .deposit(&mut accounts.staker_account, amount, &proof, now)?;

    transfer_to_vault(
        accounts.staker_token_account.to_account_info(),
        accounts.stake_vault.to_account_info(),
        accounts.staker.to_account_info(),
        accounts.token_program.to_account_info(),
        consumed,
    )?;

    let staker_account = &accounts.staker_account;
    msg!("Staked {} tokens (offered {})", consumed, amount);
    msg!("Total staked by staker: {}", staker_account.principal);
    msg!("Pool total staked: {}", accounts.staking_pool.total_staked());

    emit!(Staked {
        staker: staker_account.staker,
        amount: consumed,
        principal: staker_account.principal,
        is_operator: staker_account.is_operator(),
    });

    Ok(())
}
