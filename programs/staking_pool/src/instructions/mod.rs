//! Instruction handlers for the staking pool program.
//!
//! Each handler validates accounts, reads the clock once, runs the pool engine
//! in [`crate::logic`] and then moves tokens and logs the outcome.

pub mod admin;
pub mod alert;
pub mod initialize;
pub mod migration;
pub mod operators;
pub mod rewards;
pub mod stake;
pub mod staker_accounts;
pub mod unstake;
pub mod vault;
pub mod views;

pub use admin::*;
pub use alert::*;
pub use initialize::*;
pub use migration::*;
pub use operators::*;
pub use rewards::*;
pub use stake::*;
pub use unstake::*;
pub use views::*;
