//! Token movements in and out of the pool vaults.

use anchor_lang::prelude::*;
use anchor_spl::token::{self, Transfer};

use crate::constants::STAKING_POOL_SEED;
use crate::state::StakingPool;

/// Moves `amount` from a pool vault, signing as the pool PDA.
pub fn transfer_from_vault<'info>(
    pool: &Account<'info, StakingPool>,
    vault: AccountInfo<'info>,
    to: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let stake_mint = pool.stake_mint;
    let seeds = &[STAKING_POOL_SEED, stake_mint.as_ref(), &[pool.bump]];
    let signer_seeds = &[&seeds[..]];

    let cpi_accounts = Transfer {
        from: vault,
        to,
        authority: pool.to_account_info(),
    };
    let cpi_ctx = CpiContext::new_with_signer(token_program, cpi_accounts, signer_seeds);
    token::transfer(cpi_ctx, amount)
}

/// Moves `amount` into a pool vault on behalf of a signer.
pub fn transfer_to_vault<'info>(
    from: AccountInfo<'info>,
    vault: AccountInfo<'info>,
    authority: AccountInfo<'info>,
    token_program: AccountInfo<'info>,
    amount: u64,
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    let cpi_accounts = Transfer {
        from,
        to: vault,
        authority,
    };
    let cpi_ctx = CpiContext::new(token_program, cpi_accounts);
    token::transfer(cpi_ctx, amount)
}
