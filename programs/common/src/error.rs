//! Program error type

use crate::{Address, PairId};
use thiserror::Error;

/// Errors surfaced by the market-maker program.
///
/// Every variant is terminal: the calling message or proposal fails and the
/// staged writes of its unit of work are discarded.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketMakerError {
    #[error("market maker {address} already registered for pair {pair_id}")]
    AlreadyExists { address: Address, pair_id: PairId },

    #[error("pair {0} is not an incentive pair")]
    UnregisteredPair(PairId),

    #[error("market maker {address} not found for pair {pair_id}")]
    NotFound { address: Address, pair_id: PairId },

    #[error("market maker {address} is already eligible for pair {pair_id}")]
    AlreadyEligible { address: Address, pair_id: PairId },

    #[error("market maker {address} is not eligible for pair {pair_id}")]
    NotEligible { address: Address, pair_id: PairId },

    #[error("market maker {address} is still pending for pair {pair_id}")]
    StillPending { address: Address, pair_id: PairId },

    #[error("no deposit record for market maker {address} on pair {pair_id}")]
    InvalidDeposit { address: Address, pair_id: PairId },

    #[error("no claimable incentive for {0}")]
    EmptyClaimable(Address),

    #[error("insufficient funds: {address} holds {available}, needs {required}")]
    InsufficientFunds {
        address: Address,
        available: String,
        required: String,
    },

    #[error("arithmetic overflow")]
    Overflow,

    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("pair id must not be zero")]
    InvalidPairId,

    #[error("pair id list must not be empty")]
    EmptyPairIds,

    #[error("duplicate pair id {0}")]
    DuplicatePairId(PairId),

    #[error("invalid coins: {0}")]
    InvalidCoins(String),

    #[error("incentive amount must not be empty")]
    EmptyIncentive,

    #[error("market maker {address} for pair {pair_id} appears more than once")]
    DuplicateHandle { address: Address, pair_id: PairId },

    #[error("proposal contains no operations")]
    EmptyProposal,

    #[error("invalid proposal: {0}")]
    InvalidProposal(String),

    #[error("invalid params: {0}")]
    InvalidParams(String),

    #[error("invalid genesis: {0}")]
    InvalidGenesis(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("codec error: {0}")]
    Codec(String),

    #[error("invariant broken: {0}")]
    InvariantBroken(String),
}

pub type Result<T> = core::result::Result<T, MarketMakerError>;
