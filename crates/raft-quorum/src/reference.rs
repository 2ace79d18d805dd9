//! # reference
//!
//! why: an independent quadratic answer to the same question majority.rs answers in n log n
//! relations: only used to cross-check MajorityConfig::committed_index in tests
//! what: reference_committed_index, ReferenceCommit

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::{AckedIndexer, Index, MajorityConfig};

/// Result of the reference computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceCommit {
    /// Largest reported index that a majority of reported voters has reached
    pub index: Index,
    /// Whether some higher reported index could still gather a majority once
    /// every silent voter votes for it
    pub malleable: bool,
}

/// Count votes per reported index and pick the largest with a majority.
///
/// Only indexes some voter actually reported are candidates. Silent voters
/// contribute nothing to the count, but are added as pending support when
/// deciding whether a higher candidate could still win.
pub fn reference_committed_index<L>(config: &MajorityConfig, acks: &L) -> ReferenceCommit
where
    L: AckedIndexer + ?Sized,
{
    let reported: Vec<Index> = config.iter().filter_map(|id| acks.acked_index(id)).collect();
    let pending = config.len() - reported.len();

    // candidate index -> voters that acked it or anything higher
    let mut votes: BTreeMap<Index, usize> = reported.iter().map(|&idx| (idx, 0)).collect();
    for &idx in &reported {
        for (_, count) in votes.range_mut(..=idx) {
            *count += 1;
        }
    }

    let quorum = config.quorum_size();
    let index = votes
        .iter()
        .filter(|(_, &count)| count >= quorum)
        .map(|(&idx, _)| idx)
        .max()
        .unwrap_or(0);

    let malleable = votes
        .iter()
        .any(|(&idx, &count)| idx > index && count + pending >= quorum);

    ReferenceCommit { index, malleable }
}
