//! Results persistence module

use anyhow::Result;
use crate::search::SearchReport;
use itertools::Itertools;
use serde_json::{json, to_string_pretty, Map, Value};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

/// Save the outcome of a search to the specified directory
///
/// `node_ids[i]` names vertex `i` in the output; plain indices are used when
/// no ids are given.
pub fn save_results(
    report: &SearchReport,
    node_ids: Option<&[String]>,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving results to {}", output_dir);

    fs::create_dir_all(output_dir)?;

    save_summary(report, output_dir)?;
    save_membership(report, node_ids, output_dir)?;
    save_communities(report, node_ids, output_dir)?;

    log::info!("Results saved successfully");

    Ok(())
}

fn vertex_name(node_ids: Option<&[String]>, vertex: usize) -> String {
    node_ids
        .and_then(|ids| ids.get(vertex).cloned())
        .unwrap_or_else(|| vertex.to_string())
}

/// Save summary information
fn save_summary(report: &SearchReport, output_dir: &str) -> Result<()> {
    log::info!("Saving summary information");

    let path = Path::new(output_dir).join("summary.json");
    let mut file = File::create(path)?;

    let partition = &report.best.partition;
    let sizes: Vec<usize> = partition
        .membership()
        .iter()
        .counts()
        .into_values()
        .sorted_unstable_by(|a, b| b.cmp(a))
        .collect();

    let summary = json!({
        "best": {
            "trial": report.best.trial,
            "modularity": report.best.modularity,
            "community_count": sizes.len(),
            "community_sizes": sizes,
        },
        "search": {
            "seed": report.seed,
            "trials": report.trials,
            "completed": report.completed(),
            "failed": report.failed(),
            "failures": report.failures.iter().map(|f| {
                json!({ "trial": f.trial, "reason": f.reason })
            }).collect::<Vec<_>>(),
        },
        "modularity": report.summary,
        "scores": report.scores.iter().map(|&(trial, q)| {
            json!({ "trial": trial, "modularity": q })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&summary)?.as_bytes())?;

    Ok(())
}

/// Save the vertex -> community mapping
fn save_membership(
    report: &SearchReport,
    node_ids: Option<&[String]>,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving membership");

    let path = Path::new(output_dir).join("membership.json");
    let mut file = File::create(path)?;

    let normalized = report.best.partition.normalized();
    let mut membership = Map::with_capacity(normalized.len());
    for (vertex, &community) in normalized.membership().iter().enumerate() {
        membership.insert(vertex_name(node_ids, vertex), Value::from(community));
    }

    file.write_all(to_string_pretty(&Value::Object(membership))?.as_bytes())?;

    Ok(())
}

/// Save communities as member lists, largest first
fn save_communities(
    report: &SearchReport,
    node_ids: Option<&[String]>,
    output_dir: &str,
) -> Result<()> {
    log::info!("Saving communities");

    let path = Path::new(output_dir).join("communities.json");
    let mut file = File::create(path)?;

    let mut communities = report.best.partition.communities();
    communities.sort_by(|a, b| b.len().cmp(&a.len()));

    let communities_json = json!({
        "modularity": report.best.modularity,
        "communities": communities.iter().enumerate().map(|(id, members)| {
            json!({
                "id": id,
                "size": members.len(),
                "members": members.iter().map(|&v| vertex_name(node_ids, v)).collect::<Vec<_>>(),
            })
        }).collect::<Vec<_>>(),
    });

    file.write_all(to_string_pretty(&communities_json)?.as_bytes())?;

    Ok(())
}
