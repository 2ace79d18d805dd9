//! # majority
//!
//! why: compute the highest log index a strict majority of voters has acknowledged
//! relations: reads acks through index.rs, cross-checked in tests against reference.rs
//! what: MajorityConfig voter set, CommitResult, the sort-based commit index calculator

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{index_to_string, AckedIndexer, Index, QuorumError, VoterId};

/// Voter sets up to this size are ranked in a stack buffer
const STACK_VOTERS: usize = 7;

/// Outcome of a commit index computation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitResult {
    /// Largest index acknowledged by a majority, counting silent voters as 0
    pub index: Index,
    /// Whether no report from a silent voter can raise `index` any further
    pub is_final: bool,
}

impl From<CommitResult> for (Index, bool) {
    fn from(result: CommitResult) -> Self {
        (result.index, result.is_final)
    }
}

impl fmt::Display for CommitResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_final {
            write!(f, "{}", index_to_string(self.index))
        } else {
            write!(f, "{} (pending)", index_to_string(self.index))
        }
    }
}

/// A set of voters where any ⌊n/2⌋+1 of them form a quorum.
///
/// Serializes as a json array of voter ids. Deserializing an array that
/// names the same voter twice fails.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<VoterId>", into = "Vec<VoterId>")]
pub struct MajorityConfig {
    voters: BTreeSet<VoterId>,
}

impl MajorityConfig {
    /// Create an empty voter set
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a membership list such as `[1, 2, 3]`
    pub fn from_json(json: &str) -> Result<Self, QuorumError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of voters
    pub fn len(&self) -> usize {
        self.voters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.voters.is_empty()
    }

    pub fn contains(&self, voter: VoterId) -> bool {
        self.voters.contains(&voter)
    }

    /// Voter ids in ascending order, each exactly once
    pub fn iter(&self) -> impl Iterator<Item = VoterId> + '_ {
        self.voters.iter().copied()
    }

    /// Number of voters that make up a majority
    pub fn quorum_size(&self) -> usize {
        self.voters.len() / 2 + 1
    }

    /// Add a voter during a membership change
    pub fn add_voter(&mut self, voter: VoterId) -> Result<(), QuorumError> {
        if !self.voters.insert(voter) {
            return Err(QuorumError::DuplicateVoter(voter));
        }
        debug!(voter, voters = self.voters.len(), "added voter");
        Ok(())
    }

    /// Remove a voter during a membership change
    pub fn remove_voter(&mut self, voter: VoterId) -> Result<(), QuorumError> {
        if !self.voters.remove(&voter) {
            return Err(QuorumError::UnknownVoter(voter));
        }
        debug!(voter, voters = self.voters.len(), "removed voter");
        Ok(())
    }

    /// Compute the largest index acknowledged by a majority of voters.
    ///
    /// Voters the indexer knows nothing about count as having acknowledged
    /// index 0. The result is final once enough voters have reported that
    /// the silent ones can no longer move the majority-rank value, no matter
    /// what they report later. An empty set never has a majority, so it
    /// yields index 0 and is never final.
    pub fn committed_index<L>(&self, acks: &L) -> CommitResult
    where
        L: AckedIndexer + ?Sized,
    {
        let n = self.voters.len();
        if n == 0 {
            return CommitResult {
                index: 0,
                is_final: false,
            };
        }

        let mut stack: [Index; STACK_VOTERS] = [0; STACK_VOTERS];
        let mut heap: Vec<Index>;
        let srt: &mut [Index] = if n <= STACK_VOTERS {
            &mut stack[..n]
        } else {
            heap = vec![0; n];
            &mut heap
        };

        // reported indexes fill the slice from the top, silent voters keep 0
        let mut next = n;
        for &voter in &self.voters {
            if let Some(idx) = acks.acked_index(voter) {
                next -= 1;
                srt[next] = idx;
            }
        }
        let votes_cast = n - next;

        srt.sort_unstable();
        let pos = n - self.quorum_size();
        let index = srt[pos];

        // shifting the rank past every silent voter must land on the same value
        let is_final = votes_cast > pos && srt[pos + n - votes_cast] == index;

        trace!(voters = n, votes_cast, index, is_final, "computed committed index");
        CommitResult { index, is_final }
    }
}

impl FromIterator<VoterId> for MajorityConfig {
    fn from_iter<I: IntoIterator<Item = VoterId>>(iter: I) -> Self {
        Self {
            voters: iter.into_iter().collect(),
        }
    }
}

impl TryFrom<Vec<VoterId>> for MajorityConfig {
    type Error = QuorumError;

    fn try_from(voters: Vec<VoterId>) -> Result<Self, Self::Error> {
        let mut config = Self::new();
        for voter in voters {
            config.add_voter(voter)?;
        }
        Ok(config)
    }
}

impl From<MajorityConfig> for Vec<VoterId> {
    fn from(config: MajorityConfig) -> Self {
        config.voters.into_iter().collect()
    }
}

impl fmt::Display for MajorityConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, voter) in self.voters.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", voter)?;
        }
        write!(f, ")")
    }
}
