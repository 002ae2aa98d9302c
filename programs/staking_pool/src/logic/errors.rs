//! # Engine Error Types
//!
//! Errors raised by the pure pool engine. Variants carry the violated limit or the
//! offending address so callers can act on the diagnostic; the instruction layer
//! logs the payload and maps each variant onto its on-chain [`StakingError`] code.

use anchor_lang::prelude::*;
use thiserror::Error;

use crate::error::StakingError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PoolError {
    // ========================================================================
    // Authorization
    // ========================================================================
    #[error("Access forbidden")]
    AccessForbidden,

    #[error("Caller must be the proposed owner")]
    MustBeProposedOwner,

    #[error("Cannot transfer ownership to self")]
    CannotTransferToSelf,

    // ========================================================================
    // Pool state
    // ========================================================================
    #[error("Invalid pool status: active={0}, required active={1}")]
    InvalidPoolStatus(bool, bool),

    #[error("Pool has already been started")]
    PoolAlreadyStarted,

    #[error("Pool is paused")]
    Paused,

    #[error("Pool is not paused")]
    NotPaused,

    #[error("Merkle root not set")]
    MerkleRootNotSet,

    #[error("Inadequate initial operators: {0} (min {1})")]
    InadequateInitialOperatorsCount(u32, u32),

    #[error("Alert is invalid")]
    AlertInvalid,

    // ========================================================================
    // Bounds and configuration
    // ========================================================================
    #[error("Insufficient stake amount, minimum {0}")]
    InsufficientStakeAmount(u64),

    #[error("Excessive stake amount, remaining allowance {0}")]
    ExcessiveStakeAmount(u64),

    #[error("Insufficient remaining pool space: {0} remaining, {1} required")]
    InsufficientRemainingPoolSpace(u64, u64),

    #[error("Invalid pool size {0}")]
    InvalidPoolSize(u64),

    #[error("Invalid max stake amount {0}")]
    InvalidMaxStakeAmount(u64),

    #[error("Reward duration too short")]
    RewardDurationTooShort,

    #[error("Invalid reward rate")]
    InvalidRewardRate,

    #[error("Zero address not allowed")]
    InvalidZeroAddress,

    #[error("Invalid delegation rate denominator")]
    InvalidDelegationRate,

    #[error("Regular period threshold must exceed priority period threshold")]
    InvalidRegularPeriodThreshold,

    #[error("Invalid min operator stake amount")]
    InvalidMinOperatorStakeAmount,

    #[error("Invalid min community stake amount")]
    InvalidMinCommunityStakeAmount,

    #[error("Invalid max alerting reward amount")]
    InvalidMaxAlertingRewardAmount,

    #[error("Too many feed operators (max {0})")]
    TooManyFeedOperators(usize),

    #[error("Invalid duration {0}")]
    InvalidDuration(i64),

    // ========================================================================
    // Uniqueness and lookup
    // ========================================================================
    #[error("Operator {0} already exists")]
    OperatorAlreadyExists(Pubkey),

    #[error("Operator {0} does not exist")]
    OperatorDoesNotExist(Pubkey),

    #[error("Operator {0} is locked")]
    OperatorIsLocked(Pubkey),

    #[error("Operator {0} is assigned to the feed")]
    OperatorIsAssignedToFeed(Pubkey),

    #[error("Existing stake found for {0}")]
    ExistingStakeFound(Pubkey),

    #[error("Stake not found for {0}")]
    StakeNotFound(Pubkey),

    #[error("Alert already exists for round {0}")]
    AlertAlreadyExists(u64),

    #[error("Invalid migration target")]
    InvalidMigrationTarget,

    // ========================================================================
    // Math
    // ========================================================================
    #[error("Math overflow")]
    MathOverflow,
}

pub type PoolResult<T> = std::result::Result<T, PoolError>;

impl PoolError {
    /// On-chain error code for this variant.
    pub fn code(&self) -> StakingError {
        match self {
            Self::AccessForbidden => StakingError::AccessForbidden,
            Self::MustBeProposedOwner => StakingError::MustBeProposedOwner,
            Self::CannotTransferToSelf => StakingError::CannotTransferToSelf,
            Self::InvalidPoolStatus(..) => StakingError::InvalidPoolStatus,
            Self::PoolAlreadyStarted => StakingError::PoolAlreadyStarted,
            Self::Paused => StakingError::Paused,
            Self::NotPaused => StakingError::NotPaused,
            Self::MerkleRootNotSet => StakingError::MerkleRootNotSet,
            Self::InadequateInitialOperatorsCount(..) => {
                StakingError::InadequateInitialOperatorsCount
            }
            Self::AlertInvalid => StakingError::AlertInvalid,
            Self::InsufficientStakeAmount(_) => StakingError::InsufficientStakeAmount,
            Self::ExcessiveStakeAmount(_) => StakingError::ExcessiveStakeAmount,
            Self::InsufficientRemainingPoolSpace(..) => StakingError::InsufficientRemainingPoolSpace,
            Self::InvalidPoolSize(_) => StakingError::InvalidPoolSize,
            Self::InvalidMaxStakeAmount(_) => StakingError::InvalidMaxStakeAmount,
            Self::RewardDurationTooShort => StakingError::RewardDurationTooShort,
            Self::InvalidRewardRate => StakingError::InvalidRewardRate,
            Self::InvalidZeroAddress => StakingError::InvalidZeroAddress,
            Self::InvalidDelegationRate => StakingError::InvalidDelegationRate,
            Self::InvalidRegularPeriodThreshold => StakingError::InvalidRegularPeriodThreshold,
            Self::InvalidMinOperatorStakeAmount => StakingError::InvalidMinOperatorStakeAmount,
            Self::InvalidMinCommunityStakeAmount => StakingError::InvalidMinCommunityStakeAmount,
            Self::InvalidMaxAlertingRewardAmount => StakingError::InvalidMaxAlertingRewardAmount,
            Self::TooManyFeedOperators(_) => StakingError::TooManyFeedOperators,
            Self::InvalidDuration(_) => StakingError::InvalidDuration,
            Self::OperatorAlreadyExists(_) => StakingError::OperatorAlreadyExists,
            Self::OperatorDoesNotExist(_) => StakingError::OperatorDoesNotExist,
            Self::OperatorIsLocked(_) => StakingError::OperatorIsLocked,
            Self::OperatorIsAssignedToFeed(_) => StakingError::OperatorIsAssignedToFeed,
            Self::ExistingStakeFound(_) => StakingError::ExistingStakeFound,
            Self::StakeNotFound(_) => StakingError::StakeNotFound,
            Self::AlertAlreadyExists(_) => StakingError::AlertAlreadyExists,
            Self::InvalidMigrationTarget => StakingError::InvalidMigrationTarget,
            Self::MathOverflow => StakingError::MathOverflow,
        }
    }
}

impl From<PoolError> for anchor_lang::error::Error {
    fn from(err: PoolError) -> Self {
        msg!("Pool error: {}", err);
        err.code().into()
    }
}
