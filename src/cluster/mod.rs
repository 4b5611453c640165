//! Partitions, trial results and the stages that produce and rank them

pub mod detection;
pub mod louvain;
pub mod metrics;
pub mod remap;
pub mod select;

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub use detection::{CommunityDetection, Detection, DetectionRunner};
pub use louvain::Louvain;
pub use metrics::{modularity, ModularitySummary};
pub use remap::{permute_partition, remap_partition};
pub use select::select_best;

/// Assignment of each vertex to a community id
///
/// Community ids only group vertices; two partitions with different numbering
/// can describe the same split (see [`Partition::same_grouping`]).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partition {
    membership: Vec<usize>,
}

impl Partition {
    pub fn new(membership: Vec<usize>) -> Self {
        Self { membership }
    }

    /// Every vertex in its own community
    pub fn singletons(len: usize) -> Self {
        Self::new((0..len).collect())
    }

    pub fn len(&self) -> usize {
        self.membership.len()
    }

    pub fn is_empty(&self) -> bool {
        self.membership.is_empty()
    }

    /// Community of `vertex`
    #[inline]
    pub fn community(&self, vertex: usize) -> usize {
        self.membership[vertex]
    }

    pub fn membership(&self) -> &[usize] {
        &self.membership
    }

    pub fn into_membership(self) -> Vec<usize> {
        self.membership
    }

    /// Number of distinct community ids in use
    pub fn community_count(&self) -> usize {
        self.normalized().membership.iter().max().map_or(0, |&c| c + 1)
    }

    /// Relabel communities `0, 1, 2, ...` in order of first appearance
    pub fn normalized(&self) -> Partition {
        let mut labels: HashMap<usize, usize> = HashMap::new();
        let membership = self
            .membership
            .iter()
            .map(|&c| {
                let next = labels.len();
                *labels.entry(c).or_insert(next)
            })
            .collect();
        Partition { membership }
    }

    /// Members of each community, communities in first-appearance order
    pub fn communities(&self) -> Vec<Vec<usize>> {
        let normalized = self.normalized();
        let mut groups: Vec<Vec<usize>> = Vec::new();
        for (vertex, &c) in normalized.membership.iter().enumerate() {
            if c == groups.len() {
                groups.push(Vec::new());
            }
            groups[c].push(vertex);
        }
        groups
    }

    /// True if both partitions group the vertices identically, ignoring ids
    pub fn same_grouping(&self, other: &Partition) -> bool {
        self.len() == other.len() && self.normalized() == other.normalized()
    }
}

impl From<Vec<usize>> for Partition {
    fn from(membership: Vec<usize>) -> Self {
        Self::new(membership)
    }
}

/// Outcome of one successful trial, expressed in original vertex indexing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialResult {
    /// Submission index of the trial
    pub trial: usize,

    pub partition: Partition,

    pub modularity: f64,
}

/// The trial result with the highest modularity of one search
pub type BestResult = TrialResult;
