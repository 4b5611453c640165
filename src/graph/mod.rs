//! Graph representation, permutation and relabeling

pub mod builder;
pub mod permutation;
pub mod permuted;

pub use builder::{from_edges, from_unweighted_edges, GraphBuilder, LabeledGraph, WeightedGraph};
pub use permutation::Permutation;
pub use permuted::PermutedGraph;
