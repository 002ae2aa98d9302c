//! Migration instruction handlers.
//!
//! The owner proposes a successor program, waits out the timelock and accepts
//! it. Once the pool has closed, stakers may move their principal and rewards
//! to the successor instead of withdrawing them.
//!
//! A successor advertises support through a receiver account it owns whose
//! data starts with [`MIGRATION_RECEIVER_TAG`]. Migrated tokens go to a vault
//! controlled by that receiver, and the successor is notified through a CPI
//! signed by this pool.

use anchor_lang::prelude::*;
use anchor_lang::solana_program::instruction::{AccountMeta, Instruction};
use anchor_lang::solana_program::program::invoke_signed;
use anchor_spl::token::{Token, TokenAccount};

use crate::constants::*;
use crate::error::StakingError;
use crate::events::*;
use crate::instructions::admin::AdminControl;
use crate::instructions::vault::transfer_from_vault;
use crate::logic::MigrationCandidate;
use crate::state::{StakerAccount, StakingPool};

/// Accounts required for proposing a migration target.
#[derive(Accounts)]
pub struct ProposeMigrationTarget<'info> {
    pub owner: Signer<'info>,

    #[account(
        mut,
        seeds = [STAKING_POOL_SEED, staking_pool.stake_mint.as_ref()],
        bump = staking_pool.bump,
        has_one = owner @ StakingError::AccessForbidden
    )]
    pub staking_pool: Account<'info, StakingPool>,

    /// CHECK: Inspected by MigrationCandidate::resolve.
    pub target_program: UncheckedAccount<'info>,

    /// CHECK: Must be owned by the target program and carry the receiver tag.
    pub target_receiver: UncheckedAccount<'info>,
}

/// Accounts required for migrating a stake.
#[derive(Accounts)]
pub struct Migrate<'info> {
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

    #[account(mut)]
    pub stake_vault: Account<'info, TokenAccount>,

    #[account(mut)]
    pub reward_vault: Account<'info, TokenAccount>,

    /// CHECK: Must be the accepted migration target.
    #[account(
        executable,
        constraint = target_program.key() == staking_pool.migration_target() @ StakingError::InvalidMigrationTarget
    )]
    pub target_program: UncheckedAccount<'info>,

    /// CHECK: Receiver capability account of the target, validated in the handler.
    #[account(mut)]
    pub target_receiver: UncheckedAccount<'info>,

    /// Vault of the successor receiving the migrated tokens.
    #[account(
        mut,
        constraint = target_vault.mint == staking_pool.stake_mint @ StakingError::MintMismatch,
        constraint = target_vault.owner == target_receiver.key() @ StakingError::InvalidMigrationTarget
    )]
    pub target_vault: Account<'info, TokenAccount>,

    pub token_program: Program<'info, Token>,
}

/// Notification sent to the successor after the tokens have moved.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug, PartialEq, Eq)]
pub struct MigrationNotice {
    pub staker: Pubkey,
    pub amount: u64,
    pub payload: Vec<u8>,
}

impl MigrationNotice {
    pub fn instruction_data(&self) -> Result<Vec<u8>> {
        let mut data = MIGRATION_NOTIFY_DISCRIMINATOR.to_vec();
        self.serialize(&mut data)
            .map_err(|_| error!(anchor_lang::error::ErrorCode::AccountDidNotSerialize))?;
        Ok(data)
    }
}

/// Propose a successor program. Restarts the timelock and clears any
/// previously accepted target.
pub fn propose_migration_target_handler(ctx: Context<ProposeMigrationTarget>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let candidate = MigrationCandidate::resolve(
        &ctx.accounts.target_program,
        &ctx.accounts.target_receiver,
    )?;
    let pool = &mut ctx.accounts.staking_pool;
    pool.propose_migration_target(&candidate, &crate::ID, now)?;

    msg!("Migration target proposed: {}", candidate.program);
    msg!(
        "Acceptable after {}",
        now.saturating_add(MIGRATION_PROPOSAL_DELAY)
    );

    emit!(MigrationTargetProposed {
        target: candidate.program,
    });

    Ok(())
}

/// Accept the proposed successor once the timelock has passed.
pub fn accept_migration_target_handler(ctx: Context<AdminControl>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let target = ctx.accounts.staking_pool.accept_migration_target(now)?;

    msg!("Migration target accepted: {}", target);

    emit!(MigrationTargetAccepted { target });

    Ok(())
}

/// Move the caller's principal and rewards to the accepted successor.
///
/// # Arguments
/// * `ctx` - Migrate accounts context
/// * `payload` - Opaque data forwarded to the successor
pub fn migrate_handler(mut ctx: Context<Migrate>, payload: Vec<u8>) -> Result<()> {
    let now = Clock::get()?.unix_timestamp;

    let receiver = MigrationCandidate::resolve(
        &ctx.accounts.target_program,
        &ctx.accounts.target_receiver,
    )?;
    require!(
        receiver.accepts_migrations,
        StakingError::InvalidMigrationTarget
    );

    let accounts = &mut ctx.accounts;
    let (target, payout) = accounts
        .staking_pool
        .migrate(&mut accounts.staker_account, now)?;

    transfer_from_vault(
        &accounts.staking_pool,
        accounts.stake_vault.to_account_info(),
        accounts.target_vault.to_account_info(),
        accounts.token_program.to_account_info(),
        payout.principal,
    )?;
    transfer_from_vault(
        &accounts.staking_pool,
        accounts.reward_vault.to_account_info(),
        accounts.target_vault.to_account_info(),
        accounts.token_program.to_account_info(),
        payout.rewards()?,
    )?;

    let amount = payout.total()?;
    let notice = MigrationNotice {
        staker: accounts.staker.key(),
        amount,
        payload,
    };
    let instruction = Instruction {
        program_id: target,
        accounts: vec![
            AccountMeta::new(accounts.target_receiver.key(), false),
            AccountMeta::new_readonly(accounts.staking_pool.key(), true),
            AccountMeta::new_readonly(accounts.target_vault.key(), false),
        ],
        data: notice.instruction_data()?,
    };
    let stake_mint = accounts.staking_pool.stake_mint;
    let seeds = &[
        STAKING_POOL_SEED,
        stake_mint.as_ref(),
        &[accounts.staking_pool.bump],
    ];
    invoke_signed(
        &instruction,
        &[
            accounts.target_receiver.to_account_info(),
            accounts.staking_pool.to_account_info(),
            accounts.target_vault.to_account_info(),
            accounts.target_program.to_account_info(),
        ],
        &[&seeds[..]],
    )?;

    msg!("Migrated {} tokens to {}", amount, target);
    msg!(
        "Principal: {}, base reward: {}, delegation reward: {}",
        payout.principal,
        payout.base_reward,
        payout.delegation_reward
    );

    emit!(Migrated {
        staker: notice.staker,
        principal: payout.principal,
        base_reward: payout.base_reward,
        delegation_reward: payout.delegation_reward,
        payload: notice.payload,
    });

    Ok(())
}
