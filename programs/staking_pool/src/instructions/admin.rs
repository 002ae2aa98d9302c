/// Admin instruction handlers.
///
/// Handles owner-only configuration of the staking pool: access list, pool
/// capacity, reward rate, early conclusion, pausing and ownership handoff.
///
/// ## Security Guarantees
/// - All owner functions require signer == pool.owner
/// - PDA validation ensures correct pool
/// - Ownership moves in two steps; the new owner must accept

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::state::StakingPool;

/// Accounts required for owner operations.
///
/// ## Security Notes
/// - Owner must be signer
/// - Owner must match staking_pool.owner (has_one constraint)
/// - Pool PDA validated via seeds
#[derive(Accounts)]
pub struct AdminControl<'info> {
    /// The pool owner.
    pub owner: Signer<'info>,

    /// The staking pool to modify.
    /// SECURITY: PDA validation + has_one owner.
    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = owner @ StakingError::AccessForbidden
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

/// Accounts required to complete an ownership transfer.
#[derive(Accounts)]
pub struct AcceptOwnership<'info> {
    /// The proposed owner.
    pub new_owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump
    )]
    pub staking_pool: Account<'info, StakingPool>,
}

/// Replace the Merkle root gating community deposits.
///
/// A zero root opens the pool to every address. Applies to later deposits only.
pub fn set_merkle_root_handler(ctx: Context<AdminControl>, merkle_root: [u8; 32]) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;

    pool.set_merkle_root(merkle_root)?;

    msg!("Merkle root updated");
    msg!("Owner: {}", ctx.accounts.owner.key());

    emit!(MerkleRootChanged { root: merkle_root });

    Ok(())
}

/// Close the pool before its reward window ends.
///
/// # Security
/// - Only pool.owner can call this
/// - Accrual stops immediately; stakers may then unstake
pub fn conclude_handler(ctx: Context<AdminControl>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    pool.conclude(now)?;

    msg!("Pool concluded at {}", now);
    msg!("Total staked: {}", pool.total_staked());

    emit!(PoolConcluded { concluded_at: now });

    Ok(())
}

/// Raise the pool and per-staker maximums.
///
/// # Security
/// - Only pool.owner can call this
/// - Limits may only grow
/// - Reserved operator space must still fit next to community principal
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `max_pool_size` - New pool capacity
/// * `max_community_stake` - New per-community-staker maximum
/// * `max_operator_stake` - New per-operator maximum
pub fn set_pool_config_handler(
    ctx: Context<AdminControl>,
    max_pool_size: u64,
    max_community_stake: u64,
    max_operator_stake: u64,
) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    msg!(
        "Adjusting pool limits - Old: pool={}, community={}, operator={}",
        pool.limits.max_pool_size,
        pool.limits.max_community_stake,
        pool.limits.max_operator_stake
    );

    pool.set_pool_config(max_pool_size, max_community_stake, max_operator_stake, now)?;

    msg!(
        "New pool limits - pool={}, community={}, operator={}",
        max_pool_size,
        max_community_stake,
        max_operator_stake
    );
    msg!("Reward window ends at {}", pool.reward.end_time);

    emit!(PoolConfigUpdated {
        max_pool_size,
        max_community_stake,
        max_operator_stake,
        end_time: pool.reward.end_time,
    });

    Ok(())
}

/// Change the per-token reward rate.
///
/// # Security
/// - Only pool.owner can call this
/// - Rewards earned so far are accrued at the old rate first
/// - The remaining budget must still cover the minimum reward duration
pub fn change_reward_rate_handler(ctx: Context<AdminControl>, reward_rate: u64) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let now = Clock::get()?.unix_timestamp;

    let old_rate = pool.reward.rate;
    pool.change_reward_rate(reward_rate, now)?;

    msg!("Reward rate updated: {} -> {}", old_rate, reward_rate);
    msg!("Reward window ends at {}", pool.reward.end_time);

    emit!(RewardRateChanged {
        rate: reward_rate,
        end_time: pool.reward.end_time,
    });

    Ok(())
}

/// Halt every state-changing instruction except ownership management.
pub fn emergency_pause_handler(ctx: Context<AdminControl>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    pool.pause()?;

    msg!("Staking PAUSED");
    msg!("Owner: {}", ctx.accounts.owner.key());

    emit!(PauseChanged { is_paused: true });

    Ok(())
}

pub fn emergency_unpause_handler(ctx: Context<AdminControl>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    pool.unpause()?;

    msg!("Staking RESUMED");
    msg!("Owner: {}", ctx.accounts.owner.key());

    emit!(PauseChanged { is_paused: false });

    Ok(())
}

/// Propose a new owner.
///
/// # Security
/// - Only current owner can call this
/// - Nothing changes until the proposed owner accepts
///
/// # Arguments
/// * `ctx` - AdminControl accounts context
/// * `new_owner` - Proposed owner pubkey
pub fn transfer_ownership_handler(ctx: Context<AdminControl>, new_owner: Pubkey) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    pool.transfer_ownership(new_owner)?;

    msg!("Ownership transfer requested: {} -> {}", pool.owner, new_owner);

    emit!(OwnershipTransferRequested {
        from: pool.owner,
        to: new_owner,
    });

    Ok(())
}

pub fn accept_ownership_handler(ctx: Context<AcceptOwnership>) -> Result<()> {
    let pool = &mut ctx.accounts.staking_pool;
    let previous = pool.accept_ownership(ctx.accounts.new_owner.key())?;

    msg!("Ownership transferred: {} -> {}", previous, pool.owner);

    emit!(OwnershipTransferred {
        from: previous,
        to: pool.owner,
    });

    Ok(())
}
