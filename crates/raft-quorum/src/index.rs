//! # index
//!
//! why: define the read-only view of per-voter acknowledgments the calculator consumes
//! relations: implemented by the replication engine's ack table, queried by majority.rs and reference.rs
//! what: VoterId, Index, AckedIndexer trait and its map implementations

use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

/// Identity of one member of the consensus group
pub type VoterId = u64;

/// A raft log position
pub type Index = u64;

/// Render an index, showing `u64::MAX` as `∞`
pub fn index_to_string(index: Index) -> String {
    if index == Index::MAX {
        "∞".to_string()
    } else {
        index.to_string()
    }
}

/// Snapshot of the highest index each voter has acknowledged.
///
/// Within one call to the calculator every query for the same voter must
/// return the same answer.
pub trait AckedIndexer {
    /// Highest index `voter` has acknowledged.
    ///
    /// Returns `None` for a voter that has never reported, which is distinct
    /// from a voter that reported index 0.
    fn acked_index(&self, voter: VoterId) -> Option<Index>;
}

impl<T: AckedIndexer + ?Sized> AckedIndexer for &T {
    #[inline]
    fn acked_index(&self, voter: VoterId) -> Option<Index> {
        (**self).acked_index(voter)
    }
}

impl<S: BuildHasher> AckedIndexer for HashMap<VoterId, Index, S> {
    #[inline]
    fn acked_index(&self, voter: VoterId) -> Option<Index> {
        self.get(&voter).copied()
    }
}

impl AckedIndexer for BTreeMap<VoterId, Index> {
    #[inline]
    fn acked_index(&self, voter: VoterId) -> Option<Index> {
        self.get(&voter).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_map_distinguishes_missing_from_zero() {
        let acks: HashMap<VoterId, Index> = [(1, 0), (2, 7)].into_iter().collect();

        assert_eq!(acks.acked_index(1), Some(0));
        assert_eq!(acks.acked_index(2), Some(7));
        assert_eq!(acks.acked_index(3), None);
    }

    #[test]
    fn references_forward_to_the_underlying_indexer() {
        let acks: BTreeMap<VoterId, Index> = [(4, 12)].into_iter().collect();
        let by_ref = &acks;

        assert_eq!(by_ref.acked_index(4), Some(12));
        assert_eq!((&by_ref).acked_index(5), None);
    }

    #[test]
    fn max_index_renders_as_infinity() {
        assert_eq!(index_to_string(u64::MAX), "∞");
        assert_eq!(index_to_string(42), "42");
    }
}
