/// Reward budget instruction handlers.
///
/// Opens the pool with its first reward deposit, tops the budget up, and
/// returns unearned reward to the owner once the pool has closed.
///
/// ## Security Guarantees
/// - Only pool.owner can move reward tokens in or out
/// - Reward vault validation ensures correct PDA
/// - Mint validation prevents wrong token deposits
/// - Withdrawal never touches reward already earned by stakers

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::instructions::vault::{transfer_from_vault, transfer_to_vault};
use crate::state::StakingPool;

/// Accounts required for moving reward tokens.
///
/// ## Security Notes
/// - Reward vault must match pool's reward vault
/// - Owner token account must be for the staked mint
#[derive(Accounts)]
pub struct ManageRewards<'info> {
    pub owner: Signer<'info>,

    /// SECURITY: PDA + has_one validations.
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = owner @ StakingError::AccessForbidden,
        has_one = reward_vault @ StakingError::VaultMismatch
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Owner's token account; source of deposits and destination of withdrawals.
    #[account(
        mut,
        constraint = owner_token_account.mint == staking_pool.stake_mint @ StakingError::MintMismatch,
        constraint = owner_token_account.owner == owner.key() @ StakingError::AccessForbidden
    )]
    pub owner_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Open the pool and fund its first reward window.
///
/// # Arguments
/// * `ctx` - ManageRewards accounts context
/// * `reward_amount` - Reward tokens moved into the reward vault
/// * `reward_rate` - Reward per staked token per second, scaled by the precision
///
/// # Returns
/// Result indicating success or error
pub fn start_handler(ctx: Context<ManageRewards>, reward_amount: u64, reward_rate: u64) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    pool.start(reward_amount, reward_rate, now)?;

    transfer_to_vault(
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        reward_amount,
    )?;

    let pool = &ctx.accounts.staking_pool;
    msg!("Pool opened with {} reward tokens at rate {}", reward_amount, reward_rate);
    msg!(
        "Reward window: {} -> {}",
        pool.reward.start_time,
        pool.reward.end_time
    );

    emit!(PoolOpened {
        reward_rate,
        reward_amount,
        start_time: pool.reward.start_time,
        end_time: pool.reward.end_time,
    });

    Ok(())
}

/// Top up the reward budget, extending the window at the current rate.
pub fn add_reward_handler(ctx: Context<ManageRewards>, amount: u64) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    pool.add_reward(amount, now)?;

    transfer_to_vault(
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
    )?;

    let pool = &ctx.accounts.staking_pool;
    msg!("Reward funded with {} tokens", amount);
    msg!("Available reward: {}", pool.reward.available);
    msg!("Reward window ends at {}", pool.reward.end_time);

    emit!(RewardAdded {
        amount,
        end_time: pool.reward.end_time,
    });

    Ok(())
}

/// Return reward nobody has earned to the owner.
///
/// # Security
/// - Pool must not be active
/// - Earned but unclaimed reward stays in the vault
pub fn withdraw_unused_reward_handler(ctx: Context<ManageRewards>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    let amount = pool.withdraw_unused_reward(now)?;

    transfer_from_vault(
        &ctx.accounts.staking_pool,
        ctx.accounts.reward_vault.to_account_info(),
        ctx.accounts.owner_token_account.to_account_info(),
        ctx.accounts.token_program.to_account_info(),
        amount,
    )?;

    msg!("Unused reward withdrawn: {}", amount);
    msg!(
        "Outstanding reward liability: {}",
        ctx.accounts.staking_pool.reward.available
    );

    emit!(RewardWithdrawn { amount });

    Ok(())
}
