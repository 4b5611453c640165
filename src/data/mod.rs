//! Graph input formats

pub mod edgelist;
pub mod parquet;

use anyhow::Result;
use crate::graph::LabeledGraph;
use std::path::Path;

/// Load a graph, choosing the reader by file extension
pub fn load_graph(path: &str) -> Result<LabeledGraph> {
    let is_parquet = Path::new(path)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("parquet"));

    if is_parquet {
        parquet::load_edge_list(path, &parquet::EdgeColumns::default())
    } else {
        edgelist::load_edge_list(path)
    }
}
