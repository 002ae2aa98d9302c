//! Pool engine.
//!
//! Pure state transitions over [`crate::state`] accounts. Every operation takes
//! the current time explicitly and returns a [`PoolError`] on rejection; the
//! instruction layer handles accounts, token movement and logging.

pub mod access;
pub mod alerts;
pub mod errors;
pub mod feed;
pub mod ledger;
pub mod lifecycle;
pub mod migration;
pub mod reward;
pub mod views;

pub use alerts::*;
pub use errors::*;
pub use feed::*;
pub use ledger::*;
pub use lifecycle::*;
pub use migration::*;
pub use reward::*;
pub use views::*;
