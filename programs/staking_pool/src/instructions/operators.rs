/// Operator registry instruction handlers.
///
/// Operators are passed as a list of addresses plus, in `remaining_accounts`,
/// their staker PDAs in the same order.
///
/// ## Security Guarantees
/// - Only pool.owner can manage operators
/// - Every remaining account is checked against its derived staker PDA
/// - Removed operators keep their principal locked until the pool closes

use anchor_lang::prelude::*;

use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::instructions::staker_accounts::{load_stakers, store_stakers, MissingStaker};
use crate::logic::ensure_distinct_operators;
use crate::state::StakingPool;

/// Accounts required for operator management.
#[derive(Accounts)]
pub struct ManageOperators<'info> {
    /// The pool owner; pays for newly created operator records.
    #[account(mut)]
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = owner @ StakingError::AccessForbidden
    )]
    pub staking_pool: Account<'info, StakingPool>,

    pub system_program: Program<'info, System>,
}

/// Register operators, reserving pool space for each.
///
/// # Arguments
/// * `ctx` - ManageOperators accounts context; remaining accounts are the
///   operators' staker PDAs
/// * `operators` - Operator addresses
pub fn add_operators_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
    operators: Vec<Pubkey>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.staking_pool.key();

    // Duplicates must fail before any PDA is created.
    ensure_distinct_operators(&operators)?;
    let payer = ctx.accounts.owner.to_account_info();
    let system_program = ctx.accounts.system_program.to_account_info();
    let mut stakers = load_stakers(
        &pool_key,
        &operators,
        ctx.remaining_accounts,
        MissingStaker::Create {
            payer: &payer,
            system_program: &system_program,
        },
    )?;

    let pool = &mut ctx.accounts.staking_pool;
    pool.add_operators(&mut stakers, now)?;
    store_stakers(ctx.remaining_accounts, &stakers)?;

    msg!("Added {} operators", operators.len());
    msg!("Operator count: {}", pool.operators_count);

    emit!(OperatorsAdded { operators });

    Ok(())
}

/// Remove operators, forfeiting their rewards.
///
/// # Security
/// - Pool must be active
/// - Operators on the monitored feed cannot be removed
pub fn remove_operators_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
    operators: Vec<Pubkey>,
) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let pool_key = ctx.accounts.staking_pool.key();

    let mut stakers = load_stakers(
        &pool_key,
        &operators,
        ctx.remaining_accounts,
        MissingStaker::Reject,
    )?;

    let pool = &mut ctx.accounts.staking_pool;
    let removed = pool.remove_operators(&mut stakers, now)?;
    store_stakers(ctx.remaining_accounts, &stakers)?;

    msg!("Removed {} operators", removed.len());
    msg!("Locked principal: {}", pool.total_removed_principal);

    for entry in removed {
        emit!(OperatorRemoved {
            operator: entry.operator,
            principal: entry.principal,
        });
    }

    Ok(())
}

/// Replace the set of operators serving the monitored feed.
pub fn set_feed_operators_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, ManageOperators<'info>>,
    operators: Vec<Pubkey>,
) -> Result<()> {
    let pool_key = ctx.accounts.staking_pool.key();

    let stakers = load_stakers(
        &pool_key,
        &operators,
        ctx.remaining_accounts,
        MissingStaker::Reject,
    )?;

    let pool = &mut ctx.accounts.staking_pool;
    pool.set_feed_operators(&stakers)?;

    msg!("Feed operators set: {}", pool.feed_operators.len());

    emit!(FeedOperatorsSet { operators });

    Ok(())
}
