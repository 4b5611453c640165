//! Whitespace-separated text edge lists

use anyhow::{anyhow, bail, Context, Result};
use memmap2::Mmap;
use std::fs::File;
use crate::graph::{GraphBuilder, LabeledGraph};

/// Load a text edge list, one `source target [weight]` per line.
///
/// Blank lines and lines starting with `#` or `%` are skipped.
pub fn load_edge_list(path: &str) -> Result<LabeledGraph> {
    log::info!("Reading edge list: {}", path);

    let file = File::open(path).with_context(|| format!("File not found: {}", path))?;
    if file.metadata()?.len() == 0 {
        log::warn!("{} is empty", path);
        return Ok(GraphBuilder::with_capacity(0).build());
    }

    // Safety: the map is read-only and dropped before this function returns.
    let mmap = unsafe { Mmap::map(&file)? };
    let text = std::str::from_utf8(&mmap).with_context(|| format!("{} is not UTF-8", path))?;

    let graph = parse_edge_list(text)?;
    log::info!(
        "Built graph with {} nodes and {} edges",
        graph.graph.node_count(),
        graph.graph.edge_count()
    );
    Ok(graph)
}

/// Parse edge-list text into a graph
pub fn parse_edge_list(text: &str) -> Result<LabeledGraph> {
    let mut builder = GraphBuilder::with_capacity(1024);

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') || line.starts_with('%') {
            continue;
        }

        let mut fields = line.split_whitespace();
        let (Some(src), Some(dst)) = (fields.next(), fields.next()) else {
            bail!("line {}: expected 'source target [weight]'", line_no + 1);
        };

        let weight = match fields.next() {
            Some(raw) => raw
                .parse::<f64>()
                .map_err(|e| anyhow!("line {}: bad weight '{}': {}", line_no + 1, raw, e))?,
            None => 1.0,
        };

        if fields.next().is_some() {
            bail!("line {}: too many fields", line_no + 1);
        }

        builder.add_edge(src, dst, weight);
    }

    Ok(builder.build())
}
