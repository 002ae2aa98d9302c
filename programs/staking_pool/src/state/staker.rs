use anchor_lang::prelude::*;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum StakerClass {
    Unset,
    Community,
    Operator,
    /// Operator forcibly removed by the owner; may never stake or rejoin.
    Removed,
}

impl Default for StakerClass {
    fn default() -> Self {
        Self::Unset
    }
}

#[account]
#[derive(Debug, Default, PartialEq, Eq)]
pub struct StakerAccount {
    pub pool: Pubkey,
    pub staker: Pubkey,
    pub class: StakerClass,

    pub principal: u64,
    /// Principal of a removed operator awaiting withdrawal.
    pub removed_principal: u64,
    /// Time of the deposit that took principal from zero.
    pub staked_at: i64,

    pub base_checkpoint: u128,
    pub accrued_base_reward: u64,
    pub delegation_checkpoint: u128,
    pub accrued_delegation_reward: u64,

    pub bump: u8,
}

impl StakerAccount {
    pub const LEN: usize = 8 + 32 + 32 + 1 + 8 + 8 + 8 + 16 + 8 + 16 + 8 + 1;

    pub fn new(pool: Pubkey, staker: Pubkey, bump: u8) -> Self {
        Self {
            pool,
            staker,
            bump,
            ..Self::default()
        }
    }

    pub fn is_operator(&self) -> bool {
        self.class == StakerClass::Operator
    }

    /// Operators with principal share the delegation stream.
    pub fn is_delegate(&self) -> bool {
        self.is_operator() && self.principal > 0
    }

    /// Portion of a community principal diverted to operators.
    pub fn delegated_principal(&self, delegation_rate_denominator: u64) -> u64 {
        match self.class {
            StakerClass::Community => self.principal / delegation_rate_denominator,
            _ => 0,
        }
    }

    /// Principal that earns base reward for this account.
    pub fn base_eligible_principal(&self, delegation_rate_denominator: u64) -> u64 {
        match self.class {
            StakerClass::Operator => self.principal,
            StakerClass::Community => {
                self.principal - self.delegated_principal(delegation_rate_denominator)
            }
            StakerClass::Unset | StakerClass::Removed => 0,
        }
    }
}
