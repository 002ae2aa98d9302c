//! Timelocked handoff to a successor pool.

use anchor_lang::prelude::*;

use crate::constants::{MIGRATION_PROPOSAL_DELAY, MIGRATION_RECEIVER_TAG};
use crate::logic::errors::{PoolError, PoolResult};
use crate::logic::ledger::Payout;
use crate::state::{MigrationState, StakerAccount, StakingPool};

/// Capabilities of a proposed successor, resolved once from its accounts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MigrationCandidate {
    pub program: Pubkey,
    pub executable: bool,
    pub accepts_migrations: bool,
}

impl MigrationCandidate {
    /// Inspects the target program and its receiver capability account. The
    /// capability account must be owned by the target and start with
    /// [`MIGRATION_RECEIVER_TAG`].
    pub fn resolve(program: &AccountInfo, capability: &AccountInfo) -> Result<Self> {
        let accepts_migrations = capability.owner == program.key && {
            let data = capability.try_borrow_data()?;
            data.len() >= MIGRATION_RECEIVER_TAG.len()
                && data[..MIGRATION_RECEIVER_TAG.len()] == MIGRATION_RECEIVER_TAG
        };
        Ok(Self {
            program: program.key(),
            executable: program.executable,
            accepts_migrations,
        })
    }
}

impl MigrationState {
    pub fn propose(
        &mut self,
        candidate: &MigrationCandidate,
        self_program: &Pubkey,
        now: i64,
    ) -> PoolResult<()> {
        let target = candidate.program;
        if target == Pubkey::default()
            || target == *self_program
            || !candidate.executable
            || !candidate.accepts_migrations
            || target == self.proposed_target
            || target == self.target
        {
            return Err(PoolError::InvalidMigrationTarget);
        }

        self.target = Pubkey::default();
        self.proposed_target = target;
        self.proposed_at = now;
        Ok(())
    }

    /// Locks in the proposed target once the timelock has passed.
    pub fn accept(&mut self, now: i64) -> PoolResult<Pubkey> {
        if self.proposed_target == Pubkey::default() {
            return Err(PoolError::InvalidMigrationTarget);
        }
        let unlocks_at = self
            .proposed_at
            .checked_add(MIGRATION_PROPOSAL_DELAY)
            .ok_or(PoolError::MathOverflow)?;
        if now < unlocks_at {
            return Err(PoolError::AccessForbidden);
        }

        self.target = self.proposed_target;
        self.proposed_target = Pubkey::default();
        self.proposed_at = 0;
        Ok(self.target)
    }
}

impl StakingPool {
    pub fn propose_migration_target(
        &mut self,
        candidate: &MigrationCandidate,
        self_program: &Pubkey,
        now: i64,
    ) -> PoolResult<()> {
        self.ensure_not_paused()?;
        self.migration.propose(candidate, self_program, now)
    }

    pub fn accept_migration_target(&mut self, now: i64) -> PoolResult<Pubkey> {
        self.ensure_not_paused()?;
        self.migration.accept(now)
    }

    /// Closes `staker`'s position for transfer to the accepted migration target.
    pub fn migrate(&mut self, staker: &mut StakerAccount, now: i64) -> PoolResult<(Pubkey, Payout)> {
        self.ensure_not_paused()?;
        self.ensure_inactive(now)?;
        let target = self.migration.target;
        if target == Pubkey::default() {
            return Err(PoolError::InvalidMigrationTarget);
        }
        let payout = self.close_position(staker, now)?;
        Ok((target, payout))
    }
}
