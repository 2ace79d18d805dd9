//! # error
//!
//! why: report invalid membership changes and malformed membership configs
//! relations: returned by majority.rs mutation and parsing, never by the calculator
//! what: QuorumError

use thiserror::Error;

use crate::VoterId;

/// Errors raised while building or mutating a voter set
#[derive(Debug, Error)]
pub enum QuorumError {
    /// the voter id is already a member
    #[error("voter {0} is already a member of the configuration")]
    DuplicateVoter(VoterId),

    /// the voter id is not a member
    #[error("voter {0} is not a member of the configuration")]
    UnknownVoter(VoterId),

    /// the membership json could not be parsed
    #[error("invalid membership config: {0}")]
    Config(#[from] serde_json::Error),
}
