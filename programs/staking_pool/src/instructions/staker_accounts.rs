//! Batch access to staker PDAs passed as remaining accounts.
//!
//! Operator management and alerting touch a variable number of staker records.
//! They arrive as `remaining_accounts` in the same order as the pubkeys they
//! belong to, are decoded into plain [`StakerAccount`] values for the pool
//! engine, and are written back once the engine is done.

use anchor_lang::prelude::*;
use anchor_lang::system_program::{self, CreateAccount};

use crate::constants::STAKER_SEED;
use crate::error::StakingError;
use crate::logic::PoolError;
use crate::state::StakerAccount;

/// What to do when a staker PDA has not been created yet.
#[derive(Clone, Copy)]
pub enum MissingStaker<'a, 'info> {
    /// Create it, funded by `payer`.
    Create {
        payer: &'a AccountInfo<'info>,
        system_program: &'a AccountInfo<'info>,
    },
    /// Reject the batch; the address is not a known operator.
    Reject,
}

pub fn staker_address(pool: &Pubkey, staker: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKER_SEED, pool.as_ref(), staker.as_ref()], &crate::ID)
}

pub fn load_stakers<'info>(
    pool: &Pubkey,
    stakers: &[Pubkey],
    infos: &'info [AccountInfo<'info>],
    missing: MissingStaker<'_, 'info>,
) -> Result<Vec<StakerAccount>> {
    require!(
        stakers.len() == infos.len(),
        StakingError::RemainingAccountsMismatch
    );

    let mut loaded = Vec::with_capacity(stakers.len());
    for (staker, info) in stakers.iter().zip(infos.iter()) {
        let (address, bump) = staker_address(pool, staker);
        require_keys_eq!(
            info.key(),
            address,
            StakingError::RemainingAccountsMismatch
        );

        if info.owner == &crate::ID {
            let account = Account::<StakerAccount>::try_from(info)?;
            require_keys_eq!(account.pool, *pool, StakingError::StakerAccountMismatch);
            loaded.push(account.into_inner());
            continue;
        }

        match missing {
            MissingStaker::Create {
                payer,
                system_program,
            } => {
                let bump_seed = [bump];
                let seeds: &[&[u8]] = &[STAKER_SEED, pool.as_ref(), staker.as_ref(), &bump_seed];
                let lamports = Rent::get()?.minimum_balance(StakerAccount::LEN);
                system_program::create_account(
                    CpiContext::new_with_signer(
                        system_program.clone(),
                        CreateAccount {
                            from: payer.clone(),
                            to: info.clone(),
                        },
                        &[seeds],
                    ),
                    lamports,
                    StakerAccount::LEN as u64,
                    &crate::ID,
                )?;
                loaded.push(StakerAccount::new(*pool, *staker, bump));
            }
            MissingStaker::Reject => return Err(PoolError::OperatorDoesNotExist(*staker).into()),
        }
    }

    Ok(loaded)
}

pub fn store_stakers(infos: &[AccountInfo], stakers: &[StakerAccount]) -> Result<()> {
    for (info, staker) in infos.iter().zip(stakers.iter()) {
        let mut data = info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        staker.try_serialize(&mut writer)?;
    }
    Ok(())
}
