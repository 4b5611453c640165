//! Relabel a graph's vertices under a permutation

use crate::graph::permutation::Permutation;
use petgraph::graph::{NodeIndex, UnGraph};
use petgraph::visit::EdgeRef;

/// A copy of a graph relabeled by σ, together with σ itself
///
/// Vertex `i` of the permuted graph is vertex σ⁻¹(i) of the original.
#[derive(Debug, Clone)]
pub struct PermutedGraph<N, E> {
    graph: UnGraph<N, E>,
    permutation: Permutation,
}

impl<N: Clone, E: Clone> PermutedGraph<N, E> {
    /// Build the relabeled copy. The input graph is only read.
    ///
    /// Every edge `(u, v, w)` becomes `(σ(u), σ(v), w)`; node payloads move
    /// with their vertex. Edges are inserted in the original edge order.
    pub fn build(original: &UnGraph<N, E>, permutation: Permutation) -> Self {
        debug_assert_eq!(original.node_count(), permutation.len());

        let mut graph = UnGraph::with_capacity(original.node_count(), original.edge_count());

        for permuted in 0..permutation.len() {
            let source = NodeIndex::new(permutation.invert(permuted));
            graph.add_node(original[source].clone());
        }

        for edge in original.edge_references() {
            let u = permutation.apply(edge.source().index());
            let v = permutation.apply(edge.target().index());
            graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), edge.weight().clone());
        }

        Self { graph, permutation }
    }
}

impl<N, E> PermutedGraph<N, E> {
    pub fn graph(&self) -> &UnGraph<N, E> {
        &self.graph
    }

    pub fn permutation(&self) -> &Permutation {
        &self.permutation
    }

    /// Drop the graph and keep the permutation needed to translate results
    pub fn into_permutation(self) -> Permutation {
        self.permutation
    }
}
