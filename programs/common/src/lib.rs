//! Shared types for the market-maker incentive program
//!
//! Addresses, coin arithmetic and the program-wide error type. Everything here is
//! pure data; state access lives in `mm-program`.

pub mod address;
pub mod coins;
pub mod error;

pub use address::*;
pub use coins::*;
pub use error::*;

/// Identifier of a tradable pair
pub type PairId = u64;
