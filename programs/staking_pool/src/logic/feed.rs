//! Monitored feed access.
//!
//! The feed account's data starts with a Borsh-encoded [`RoundData`]. Alerting only
//! needs the round id and the last update time, read through [`FeedReader`] so the
//! alert logic never touches raw account data.

use anchor_lang::prelude::*;

use crate::error::StakingError;

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RoundData {
    pub round_id: u64,
    pub answer: i128,
    pub started_at: i64,
    pub updated_at: i64,
    pub answered_in_round: u64,
}

impl RoundData {
    pub fn staleness(&self, now: i64) -> i64 {
        now.saturating_sub(self.updated_at)
    }
}

pub trait FeedReader {
    fn latest_round_data(&self) -> Result<RoundData>;
}

/// Reads rounds straight out of the monitored feed account.
pub struct FeedAccount<'a, 'info> {
    info: &'a AccountInfo<'info>,
}

impl<'a, 'info> FeedAccount<'a, 'info> {
    pub fn new(info: &'a AccountInfo<'info>) -> Self {
        Self { info }
    }
}

impl FeedReader for FeedAccount<'_, '_> {
    fn latest_round_data(&self) -> Result<RoundData> {
        let data = self.info.try_borrow_data()?;
        let mut slice: &[u8] = &data;
        RoundData::deserialize(&mut slice).map_err(|_| error!(StakingError::InvalidFeedData))
    }
}
