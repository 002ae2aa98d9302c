//! Program constants for the staking pool.
//!
//! Seeds, fixed-point precision and the default deployment parameters.

/// Seed for deriving the staking pool PDA
pub const STAKING_POOL_SEED: &[u8] = b"staking_pool";

/// Seed for deriving per-staker account PDAs
pub const STAKER_SEED: &[u8] = b"staker";

/// Seed for deriving the principal vault PDA
pub const STAKE_VAULT_SEED: &[u8] = b"stake_vault";

/// Seed for deriving the reward vault PDA
pub const REWARD_VAULT_SEED: &[u8] = b"reward_vault";

/// Number of seconds in a day
pub const SECONDS_PER_DAY: i64 = 86_400;

/// Fixed-point precision of reward rates and indices (10^12).
///
/// Deposits are also consumed in whole multiples of this value.
pub const REWARD_PRECISION: u128 = 1_000_000_000_000;

/// Divisor applied to the alerter's principal outside the priority window.
pub const ALERTING_REWARD_STAKED_AMOUNT_DENOMINATOR: u64 = 5;

/// Timelock between proposing and accepting a migration target (7 days).
pub const MIGRATION_PROPOSAL_DELAY: i64 = 7 * SECONDS_PER_DAY;

/// Upper bound on the on-feed operator set, sized for a single transaction.
pub const MAX_FEED_OPERATORS: usize = 32;

/// First eight bytes of a migration receiver's capability account.
pub const MIGRATION_RECEIVER_TAG: [u8; 8] = *b"MIGRRECV";

/// Instruction discriminator sent to the migration target with each migrated stake.
pub const MIGRATION_NOTIFY_DISCRIMINATOR: [u8; 8] = *b"onmigrat";

/// Default parameters of a fresh deployment.
pub mod defaults {
    use super::SECONDS_PER_DAY;

    /// 1% APR at 10^12 precision.
    pub const REWARD_RATE: u64 = 317;

    /// Feed considered down after three hours without an update.
    pub const PRIORITY_PERIOD_THRESHOLD: i64 = 3 * 60 * 60;

    /// Length of the operator-only priority window.
    pub const PRIORITY_WINDOW: i64 = 20 * 60;

    pub const REGULAR_PERIOD_THRESHOLD: i64 = PRIORITY_PERIOD_THRESHOLD + PRIORITY_WINDOW;

    pub const MIN_INITIAL_OPERATOR_COUNT: u32 = 31;

    pub const MIN_REWARD_DURATION: i64 = 30 * SECONDS_PER_DAY;

    /// Lookback used when clawing back rewards from on-feed operators.
    pub const SLASHABLE_DURATION: i64 = 90 * SECONDS_PER_DAY;

    /// One percent of community principal is delegated to operators.
    pub const DELEGATION_RATE_DENOMINATOR: u64 = 100;
}
