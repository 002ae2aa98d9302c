//! Account structures for the staking pool program.
//!
//! The pool singleton embeds its configuration, reward accumulator and migration
//! proposal; each staker gets a PDA record keyed by pool and wallet.

pub mod reward_state;
pub mod staker;
pub mod staking_pool;

pub use reward_state::*;
pub use staker::*;
pub use staking_pool::*;
