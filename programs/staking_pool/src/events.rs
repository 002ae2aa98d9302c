use anchor_lang::prelude::*;

#[event]
pub struct PoolInitialized {
    pub pool: Pubkey,
    pub owner: Pubkey,
    pub stake_mint: Pubkey,
    pub monitored_feed: Pubkey,
    pub max_pool_size: u64,
}

#[event]
pub struct PoolOpened {
    pub reward_rate: u64,
    pub reward_amount: u64,
    pub start_time: i64,
    pub end_time: i64,
}

#[event]
pub struct PoolConcluded {
    pub concluded_at: i64,
}

#[event]
pub struct PoolConfigUpdated {
    pub max_pool_size: u64,
    pub max_community_stake: u64,
    pub max_operator_stake: u64,
    pub end_time: i64,
}

#[event]
pub struct OperatorsAdded {
    pub operators: Vec<Pubkey>,
}

#[event]
pub struct OperatorRemoved {
    pub operator: Pubkey,
    pub principal: u64,
}

#[event]
pub struct FeedOperatorsSet {
    pub operators: Vec<Pubkey>,
}

#[event]
pub struct MerkleRootChanged {
    pub root: [u8; 32],
}

#[event]
pub struct Staked {
    pub staker: Pubkey,
    pub amount: u64,
    pub principal: u64,
    pub is_operator: bool,
}

#[event]
pub struct Unstaked {
    pub staker: Pubkey,
    pub principal: u64,
    pub base_reward: u64,
    pub delegation_reward: u64,
}

#[event]
pub struct RemovedStakeWithdrawn {
    pub staker: Pubkey,
    pub principal: u64,
}

#[event]
pub struct RewardRateChanged {
    pub rate: u64,
    pub end_time: i64,
}

#[event]
pub struct RewardAdded {
    pub amount: u64,
    pub end_time: i64,
}

#[event]
pub struct RewardWithdrawn {
    pub amount: u64,
}

#[event]
pub struct AlertRaised {
    pub alerter: Pubkey,
    pub round_id: u64,
    pub reward_amount: u64,
}

#[event]
pub struct RewardSlashed {
    pub operators: Vec<Pubkey>,
    pub base_rewards: Vec<u64>,
    pub delegation_rewards: Vec<u64>,
}

#[event]
pub struct MigrationTargetProposed {
    pub target: Pubkey,
}

#[event]
pub struct MigrationTargetAccepted {
    pub target: Pubkey,
}

#[event]
pub struct Migrated {
    pub staker: Pubkey,
    pub principal: u64,
    pub base_reward: u64,
    pub delegation_reward: u64,
    pub payload: Vec<u8>,
}

#[event]
pub struct OwnershipTransferRequested {
    pub from: Pubkey,
    pub to: Pubkey,
}

#[event]
pub struct OwnershipTransferred {
    pub from: Pubkey,
    pub to: Pubkey,
}

#[event]
pub struct PauseChanged {
    pub is_paused: bool,
}
