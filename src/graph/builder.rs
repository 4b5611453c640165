//! Graph construction module

use crate::error::{Error, Result};
use petgraph::graph::{NodeIndex, UnGraph};
use std::collections::HashMap;

/// Weighted undirected graph used by the loaders and the CLI
pub type WeightedGraph = UnGraph<(), f64>;

/// A graph together with the external ids of its vertices
#[derive(Debug, Clone)]
pub struct LabeledGraph {
    pub graph: WeightedGraph,

    /// `node_ids[i]` is the external id of vertex `i`
    pub node_ids: Vec<String>,
}

/// Builder for incrementally constructing a graph keyed by string ids
pub struct GraphBuilder {
    /// Mapping from string IDs to node indices
    id_to_index: HashMap<String, u32>,

    /// Node string IDs in index order
    node_ids: Vec<String>,

    /// Edge list over dense indices
    edges: Vec<(u32, u32, f64)>,
}

impl GraphBuilder {
    /// Create a new graph builder with the given capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            id_to_index: HashMap::with_capacity(capacity),
            node_ids: Vec::with_capacity(capacity),
            edges: Vec::new(),
        }
    }

    /// Get or create a node index for the given string ID
    pub fn get_or_create_node(&mut self, id: &str) -> u32 {
        if let Some(&idx) = self.id_to_index.get(id) {
            return idx;
        }

        let idx = self.node_ids.len() as u32;
        self.id_to_index.insert(id.to_string(), idx);
        self.node_ids.push(id.to_string());

        idx
    }

    /// Add a weighted undirected edge between two ids
    pub fn add_edge(&mut self, src_id: &str, dst_id: &str, weight: f64) {
        let src_idx = self.get_or_create_node(src_id);
        let dst_idx = self.get_or_create_node(dst_id);
        self.edges.push((src_idx, dst_idx, weight));
    }

    pub fn node_count(&self) -> usize {
        self.node_ids.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Build the graph; vertex indices follow first-seen id order
    pub fn build(self) -> LabeledGraph {
        let mut graph = UnGraph::with_capacity(self.node_ids.len(), self.edges.len());
        for _ in 0..self.node_ids.len() {
            graph.add_node(());
        }
        for (src, dst, weight) in self.edges {
            graph.add_edge(NodeIndex::new(src as usize), NodeIndex::new(dst as usize), weight);
        }

        LabeledGraph {
            graph,
            node_ids: self.node_ids,
        }
    }
}

/// Build a graph over `vertex_count` vertices from an index-addressed edge list.
///
/// Fails with [`Error::MalformedGraph`] if an endpoint is out of range, which
/// includes any edge on a graph without vertices.
pub fn from_edges<I>(vertex_count: usize, edges: I) -> Result<WeightedGraph>
where
    I: IntoIterator<Item = (usize, usize, f64)>,
{
    let mut graph = UnGraph::with_capacity(vertex_count, 0);
    for _ in 0..vertex_count {
        graph.add_node(());
    }

    for (u, v, weight) in edges {
        if u >= vertex_count || v >= vertex_count {
            return Err(Error::MalformedGraph(format!(
                "edge ({}, {}) references a vertex outside [0, {})",
                u, v, vertex_count
            )));
        }
        graph.add_edge(NodeIndex::new(u), NodeIndex::new(v), weight);
    }

    Ok(graph)
}

/// Unweighted convenience form of [`from_edges`]
pub fn from_unweighted_edges<I>(vertex_count: usize, edges: I) -> Result<WeightedGraph>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    from_edges(vertex_count, edges.into_iter().map(|(u, v)| (u, v, 1.0)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_get_dense_first_seen_indices() {
        let mut builder = GraphBuilder::with_capacity(4);
        builder.add_edge("alice", "bob", 1.0);
        builder.add_edge("carol", "alice", 2.0);
        assert_eq!(builder.node_count(), 3);
        assert_eq!(builder.edge_count(), 2);

        let labeled = builder.build();
        assert_eq!(labeled.node_ids, vec!["alice", "bob", "carol"]);
        assert_eq!(labeled.graph.node_count(), 3);
        let e = labeled
            .graph
            .find_edge(NodeIndex::new(2), NodeIndex::new(0))
            .unwrap();
        assert_eq!(labeled.graph[e], 2.0);
    }

    #[test]
    fn repeated_ids_reuse_their_node() {
        let mut builder = GraphBuilder::with_capacity(0);
        let a = builder.get_or_create_node("x");
        let b = builder.get_or_create_node("x");
        assert_eq!(a, b);
        assert_eq!(builder.node_count(), 1);
    }

    #[test]
    fn from_edges_rejects_out_of_range_endpoints() {
        let err = from_unweighted_edges(3, [(0, 1), (1, 3)]).unwrap_err();
        assert!(matches!(err, Error::MalformedGraph(_)));
    }

    #[test]
    fn edges_without_vertices_are_malformed() {
        let err = from_unweighted_edges(0, [(0, 0)]).unwrap_err();
        assert!(matches!(err, Error::MalformedGraph(_)));
    }

    #[test]
    fn from_edges_keeps_isolated_vertices() {
        let g = from_unweighted_edges(5, [(0, 1)]).unwrap();
        assert_eq!(g.node_count(), 5);
        assert_eq!(g.edge_count(), 1);
    }
}
