pub mod lifecycle;

use anchor_lang::prelude::Pubkey;

use crate::constants::{defaults, REWARD_PRECISION};
use crate::logic::access::{hash_pair, leaf};
use crate::state::{InitializeParams, PoolLimits, StakerAccount, StakerClass, StakingPool};

pub const TOKEN: u64 = REWARD_PRECISION as u64;
pub const T0: i64 = 1_700_000_000;
pub const RATE: u64 = defaults::REWARD_RATE;
pub const REWARD_AMOUNT: u64 = 10_000 * TOKEN;
pub const MAX_ALERTING_REWARD: u64 = 7_000 * TOKEN;
pub const OPERATOR_COUNT: usize = defaults::MIN_INITIAL_OPERATOR_COUNT as usize;

pub fn limits() -> PoolLimits {
    PoolLimits {
        max_pool_size: 10_000_000 * TOKEN,
        min_community_stake: 10 * TOKEN,
        max_community_stake: 7_000 * TOKEN,
        min_operator_stake: 1_000 * TOKEN,
        max_operator_stake: 50_000 * TOKEN,
    }
}

pub fn configured_pool() -> StakingPool {
    let mut pool = StakingPool {
        owner: Pubkey::new_unique(),
        ..StakingPool::default()
    };
    pool.configure(&InitializeParams::default_for(
        Pubkey::new_unique(),
        limits(),
        MAX_ALERTING_REWARD,
    ))
    .unwrap();
    pool
}

/// Two-leaf allowlist of community stakers.
pub struct Allowlist {
    pub members: [Pubkey; 2],
    pub root: [u8; 32],
}

impl Allowlist {
    pub fn new() -> Self {
        let members = [Pubkey::new_unique(), Pubkey::new_unique()];
        let root = hash_pair(&leaf(&members[0]), &leaf(&members[1]));
        Self { members, root }
    }

    pub fn proof(&self, member: usize) -> Vec<[u8; 32]> {
        vec![leaf(&self.members[1 - member])]
    }
}

pub struct Fixture {
    pub pool: StakingPool,
    pub pool_key: Pubkey,
    pub operators: Vec<StakerAccount>,
    pub allowlist: Allowlist,
    pub community: Vec<StakerAccount>,
}

impl Fixture {
    /// Configured pool with the minimum operator set and an allowlist, not yet started.
    pub fn unstarted() -> Self {
        let mut pool = configured_pool();
        let pool_key = Pubkey::new_unique();
        let mut operators: Vec<StakerAccount> = (0..OPERATOR_COUNT)
            .map(|_| StakerAccount::new(pool_key, Pubkey::new_unique(), 255))
            .collect();
        pool.add_operators(&mut operators, T0 - 100).unwrap();

        let allowlist = Allowlist::new();
        pool.set_merkle_root(allowlist.root).unwrap();
        let community = allowlist
            .members
            .iter()
            .map(|member| StakerAccount::new(pool_key, *member, 254))
            .collect();

        Self {
            pool,
            pool_key,
            operators,
            allowlist,
            community,
        }
    }

    /// Pool opened at `T0` with [`REWARD_AMOUNT`] at [`RATE`].
    pub fn started() -> Self {
        let mut fixture = Self::unstarted();
        fixture.pool.start(REWARD_AMOUNT, RATE, T0).unwrap();
        fixture
    }

    pub fn stake_operator(&mut self, index: usize, amount: u64, now: i64) {
        self.pool
            .deposit(&mut self.operators[index], amount, &[], now)
            .unwrap();
    }

    pub fn stake_community(&mut self, index: usize, amount: u64, now: i64) {
        let proof = self.allowlist.proof(index);
        self.pool
            .deposit(&mut self.community[index], amount, &proof, now)
            .unwrap();
    }

    /// Sum of principal across every account the fixture tracks.
    pub fn total_principal(&self) -> u64 {
        self.operators
            .iter()
            .chain(self.community.iter())
            .map(|s| s.principal)
            .sum()
    }

    pub fn community_principal(&self) -> u64 {
        self.community
            .iter()
            .filter(|s| s.class == StakerClass::Community)
            .map(|s| s.principal)
            .sum()
    }
}
