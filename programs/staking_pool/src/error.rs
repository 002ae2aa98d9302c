//! Error codes for the staking pool program.
//!
//! Codes are assigned sequentially from Anchor's custom error offset (6000).
//! Errors raised by the pool engine carry their diagnostic payload in
//! [`crate::logic::PoolError`] and are logged before being mapped onto these codes.
//!
//! ## Error Groups
//! - Authorization
//! - Pool state
//! - Bounds and configuration
//! - Uniqueness and lookup
//! - Math
//! - Account validation

use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    // ========== Authorization (6000-6002) ==========

    /// [6000] Caller is not the owner or not eligible for this operation.
    #[msg("Access forbidden")]
    AccessForbidden,

    /// [6001] Only the proposed owner may accept ownership.
    #[msg("Must be proposed owner")]
    MustBeProposedOwner,

    /// [6002] Ownership cannot be transferred to the current owner.
    #[msg("Cannot transfer ownership to self")]
    CannotTransferToSelf,

    // ========== Pool State (6003-6009) ==========

    /// [6003] Operation requires the pool to be active (or inactive).
    #[msg("Invalid pool status")]
    InvalidPoolStatus,

    /// [6004] The pool can only be started once.
    #[msg("Pool has already been started")]
    PoolAlreadyStarted,

    /// [6005] The pool is paused.
    #[msg("Pool is paused")]
    Paused,

    /// [6006] The pool is not paused.
    #[msg("Pool is not paused")]
    NotPaused,

    /// [6007] An allowlist root is required before starting.
    #[msg("Merkle root not set")]
    MerkleRootNotSet,

    /// [6008] Not enough operators registered to start the pool.
    #[msg("Inadequate initial operators count")]
    InadequateInitialOperatorsCount,

    /// [6009] Feed is not stale enough or caller may not alert yet.
    #[msg("Alert invalid")]
    AlertInvalid,

    // ========== Bounds and Configuration (6010-6024) ==========

    /// [6010] Deposit falls below the class minimum.
    #[msg("Insufficient stake amount")]
    InsufficientStakeAmount,

    /// [6011] Deposit exceeds the class maximum or remaining pool space.
    #[msg("Excessive stake amount")]
    ExcessiveStakeAmount,

    /// [6012] Not enough unreserved pool space for new operators.
    #[msg("Insufficient remaining pool space")]
    InsufficientRemainingPoolSpace,

    /// [6013] Pool size may not decrease and must cover the precision unit.
    #[msg("Invalid pool size")]
    InvalidPoolSize,

    /// [6014] Per-staker maximum is out of bounds.
    #[msg("Invalid max stake amount")]
    InvalidMaxStakeAmount,

    /// [6015] Available reward does not cover the minimum reward duration.
    #[msg("Reward duration too short")]
    RewardDurationTooShort,

    /// [6016] Reward rate must be non-zero.
    #[msg("Invalid reward rate")]
    InvalidRewardRate,

    /// [6017] A required address was the zero address.
    #[msg("Zero address not allowed")]
    InvalidZeroAddress,

    /// [6018] Delegation denominator must be non-zero and divide the precision.
    #[msg("Invalid delegation rate")]
    InvalidDelegationRate,

    /// [6019] Regular threshold must exceed the priority threshold.
    #[msg("Invalid regular period threshold")]
    InvalidRegularPeriodThreshold,

    /// [6020] Minimum operator stake is zero or above the maximum.
    #[msg("Invalid min operator stake amount")]
    InvalidMinOperatorStakeAmount,

    /// [6021] Minimum community stake is above the maximum.
    #[msg("Invalid min community stake amount")]
    InvalidMinCommunityStakeAmount,

    /// [6022] Alerting reward cap exceeds the operator maximum.
    #[msg("Invalid max alerting reward amount")]
    InvalidMaxAlertingRewardAmount,

    /// [6023] Feed operator list is longer than the supported maximum.
    #[msg("Too many feed operators")]
    TooManyFeedOperators,

    /// [6024] A duration parameter is negative, or the slashable window is empty.
    #[msg("Invalid duration")]
    InvalidDuration,

    // ========== Uniqueness and Lookup (6025-6032) ==========

    /// [6025] Operator is already registered.
    #[msg("Operator already exists")]
    OperatorAlreadyExists,

    /// [6026] Address is not a registered operator.
    #[msg("Operator does not exist")]
    OperatorDoesNotExist,

    /// [6027] Removed operators cannot be added again.
    #[msg("Operator is locked")]
    OperatorIsLocked,

    /// [6028] Operator must be taken off the feed before removal.
    #[msg("Operator is assigned to feed")]
    OperatorIsAssignedToFeed,

    /// [6029] Address already holds a community stake.
    #[msg("Existing stake found")]
    ExistingStakeFound,

    /// [6030] Nothing staked or pending withdrawal.
    #[msg("Stake not found")]
    StakeNotFound,

    /// [6031] The feed round has already been alerted.
    #[msg("Alert already exists")]
    AlertAlreadyExists,

    /// [6032] Migration target missing, repeated or lacking the receiver capability.
    #[msg("Invalid migration target")]
    InvalidMigrationTarget,

    // ========== Math (6033) ==========

    /// [6033] Arithmetic overflow occurred during calculation.
    #[msg("Arithmetic overflow occurred during calculation")]
    MathOverflow,

    // ========== Account Validation (6034-6039) ==========

    /// [6034] The provided mint does not match the pool's stake mint.
    #[msg("Token mint mismatch - wrong token for this pool")]
    MintMismatch,

    /// [6035] The provided vault does not belong to this pool.
    #[msg("Vault address mismatch")]
    VaultMismatch,

    /// [6036] Staker account does not belong to this pool or signer.
    #[msg("Staker account mismatch")]
    StakerAccountMismatch,

    /// [6037] Feed account does not match the monitored feed.
    #[msg("Feed account mismatch")]
    FeedMismatch,

    /// [6038] Feed account data could not be decoded.
    #[msg("Invalid feed data")]
    InvalidFeedData,

    /// [6039] Remaining accounts do not line up with the instruction arguments.
    #[msg("Remaining accounts mismatch")]
    RemainingAccountsMismatch,
}
