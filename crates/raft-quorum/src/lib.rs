//! # raft-quorum
//!
//! why: decide how far a raft leader may advance its commit index from partial acks
//! relations: consumed by the replication engine, which owns the per-voter ack table
//! what: majority voter set, commit index calculator, brute-force reference oracle

pub mod error;
pub mod index;
pub mod majority;
pub mod reference;

pub use error::QuorumError;
pub use index::{index_to_string, AckedIndexer, Index, VoterId};
pub use majority::{CommitResult, MajorityConfig};
pub use reference::{reference_committed_index, ReferenceCommit};
