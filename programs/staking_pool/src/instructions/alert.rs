//! Raise alert instruction handler.
//!
//! Any staker may report a stale monitored feed. The alerter is paid from the
//! reward vault and every staked on-feed operator is slashed.

use anchor_lang::prelude::*;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::{AlertRaised, RewardSlashed};
use crate::instructions::staker_accounts::{load_stakers, store_stakers, MissingStaker};
use crate::instructions::vault::transfer_from_vault;
use crate::logic::{FeedAccount, FeedReader};
use crate::state::{StakerAccount, StakingPool};

/// Accounts required for raising an alert.
///
/// Remaining accounts are the staker PDAs of `staking_pool.feed_operators`, in
/// the same order.
#[derive(Accounts)]
pub struct RaiseAlert<'info> {
    pub alerter: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = reward_vault @ StakingError::VaultMismatch
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// Alerter's record. Read only: an alerter on the feed is slashed through
    /// its remaining-account entry.
    #[account(
        seeds = [STAKER_SEED, staking_pool.key().as_ref(), alerter.key().as_ref()],
        bump = alerter_account.bump
    )]
    pub alerter_account: Account<'info, StakerAccount>,

    /// CHECK: Address pinned to the pool's monitored feed; decoded by FeedAccount.
    #[account(address = staking_pool.monitored_feed @ StakingError::FeedMismatch)]
    pub monitored_feed: UncheckedAccount<'info>,

    #[account(
        mut,
        constraint = alerter_token_account.mint == staking_pool.stake_mint @ StakingError::MintMismatch,
        constraint = alerter_token_account.owner == alerter.key() @ StakingError::AccessForbidden
    )]
    pub alerter_token_account: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Raise an alert for the latest round of the monitored feed.
///
/// # Security
/// - Within the priority window only on-feed operators may alert
/// - Each round can be alerted at most once
/// - Slashing only claws back reward, never principal
pub fn handler<'info>(mut ctx: Context<'_, '_, 'info, 'info, RaiseAlert<'info>>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;
    let round = FeedAccount::new(&ctx.accounts.monitored_feed).latest_round_data()?;

    let pool_key = ctx.accounts.staking_pool.key();
    let feed_operators = ctx.accounts.staking_pool.feed_operators.clone();
    let mut operators = load_stakers(
        &pool_key,
        &feed_operators,
        ctx.remaining_accounts,
        MissingStaker::Reject,
    )?;

    let accounts = &mut ctx.accounts;
    let outcome =
        accounts
            .staking_pool
            .raise_alert(&accounts.alerter_account, &mut operators, &round, now)?;
    store_stakers(ctx.remaining_accounts, &operators)?;

    let accounts = &ctx.accounts;
    transfer_from_vault(
        &accounts.staking_pool,
        accounts.reward_vault.to_account_info(),
        accounts.alerter_token_account.to_account_info(),
        accounts.token_program.to_account_info(),
        outcome.alerter_reward,
    )?;

    msg!(
        "Alert raised for round {} by {}",
        outcome.round_id,
        accounts.alerter.key()
    );
    msg!(
        "Alerter reward: {} ({} window)",
        outcome.alerter_reward,
        if outcome.priority_period { "priority" } else { "regular" }
    );
    msg!("Slashed operators: {}", outcome.slashed.len());
    msg!("Reward window ends at {}", accounts.staking_pool.reward.end_time);

    emit!(AlertRaised {
        alerter: accounts.alerter.key(),
        round_id: outcome.round_id,
        reward_amount: outcome.alerter_reward,
    });
    emit!(RewardSlashed {
        operators: outcome.slashed.iter().map(|s| s.operator).collect(),
        base_rewards: outcome.slashed.iter().map(|s| s.base_reward).collect(),
        delegation_rewards: outcome.slashed.iter().map(|s| s.delegation_reward).collect(),
    });

    Ok(())
}
