//! Parquet edge lists

use anyhow::{anyhow, Context, Result};
use polars::prelude::*;
use crate::graph::{GraphBuilder, LabeledGraph};

/// Column names of a Parquet edge list
#[derive(Debug, Clone)]
pub struct EdgeColumns {
    pub source: String,
    pub target: String,

    /// Optional; edges weigh 1.0 when the column is missing
    pub weight: String,
}

impl Default for EdgeColumns {
    fn default() -> Self {
        Self {
            source: "source".to_string(),
            target: "target".to_string(),
            weight: "weight".to_string(),
        }
    }
}

/// Load an undirected edge list from a Parquet file
pub fn load_edge_list(path: &str, columns: &EdgeColumns) -> Result<LabeledGraph> {
    log::info!("Reading parquet file: {}", path);

    if !std::path::Path::new(path).exists() {
        return Err(anyhow!("File not found: {}", path));
    }

    let df = LazyFrame::scan_parquet(path, Default::default())?
        .collect()
        .with_context(|| format!("failed to read {}", path))?;

    log::info!("File schema: {:?}", df.schema());
    log::info!("Loaded {} edges", df.height());

    // Ids may be stored as integers; treat them as opaque strings.
    let source = df.column(&columns.source)?.cast(&DataType::String)?;
    let target = df.column(&columns.target)?.cast(&DataType::String)?;
    let source = source.str()?;
    let target = target.str()?;

    let weight = match df.column(&columns.weight) {
        Ok(column) => Some(column.cast(&DataType::Float64)?),
        Err(_) => {
            log::info!("No '{}' column, using unit weights", columns.weight);
            None
        }
    };
    let weight = weight.as_ref().map(|w| w.f64()).transpose()?;

    let mut builder = GraphBuilder::with_capacity(df.height());

    for i in 0..df.height() {
        let (Some(src), Some(dst)) = (source.get(i), target.get(i)) else {
            log::debug!("Skipping row {} with a missing endpoint", i);
            continue;
        };
        let w = weight.and_then(|w| w.get(i)).unwrap_or(1.0);
        builder.add_edge(src, dst, w);
    }

    log::info!(
        "Built graph with {} nodes and {} edges",
        builder.node_count(),
        builder.edge_count()
    );

    Ok(builder.build())
}
