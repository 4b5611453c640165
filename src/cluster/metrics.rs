//! Partition quality and score statistics

use crate::cluster::Partition;
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use serde::{Deserialize, Serialize};
use statrs::statistics::Statistics;

/// Weighted modularity of `partition` on `graph`
///
/// `Q = Σ_c [ in_c / m - γ (tot_c / 2m)² ]` where `in_c` is the weight of
/// edges inside community `c`, `tot_c` the summed degree of its vertices and
/// `m` the total edge weight. Self-loops count twice toward degree. Returns
/// 0 for a graph without edge weight.
pub fn modularity<N, E>(graph: &UnGraph<N, E>, partition: &Partition, resolution: f64) -> f64
where
    E: Copy + Into<f64>,
{
    debug_assert_eq!(graph.node_count(), partition.len());

    let labels = partition.normalized();
    let communities = labels.membership().iter().max().map_or(0, |&c| c + 1);

    let mut internal = vec![0.0; communities];
    let mut total = vec![0.0; communities];
    let mut m = 0.0;

    for edge in graph.edge_references() {
        let w: f64 = (*edge.weight()).into();
        let cu = labels.community(edge.source().index());
        let cv = labels.community(edge.target().index());
        m += w;
        total[cu] += w;
        total[cv] += w;
        if cu == cv {
            internal[cu] += w;
        }
    }

    if m == 0.0 {
        return 0.0;
    }

    internal
        .iter()
        .zip(&total)
        .map(|(&in_c, &tot_c)| in_c / m - resolution * (tot_c / (2.0 * m)).powi(2))
        .sum()
}

/// Spread of modularity scores across the successful trials of one search
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModularitySummary {
    pub trials: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,

    /// Sample standard deviation, 0 for fewer than two trials
    pub std_dev: f64,
}

impl ModularitySummary {
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }

        let std_dev = if scores.len() < 2 {
            0.0
        } else {
            Statistics::std_dev(scores.iter())
        };

        Some(Self {
            trials: scores.len(),
            min: Statistics::min(scores.iter()),
            max: Statistics::max(scores.iter()),
            mean: Statistics::mean(scores.iter()),
            std_dev,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::from_unweighted_edges;

    fn two_triangles() -> UnGraph<(), f64> {
        from_unweighted_edges(6, [(0, 1), (1, 2), (2, 0), (3, 4), (4, 5), (5, 3)]).unwrap()
    }

    #[test]
    fn two_triangles_split() {
        let g = two_triangles();
        let q = modularity(&g, &Partition::new(vec![0, 0, 0, 1, 1, 1]), 1.0);
        assert!((q - 0.5).abs() < 1e-12);
    }

    #[test]
    fn labels_do_not_matter() {
        let g = two_triangles();
        let a = modularity(&g, &Partition::new(vec![0, 0, 0, 1, 1, 1]), 1.0);
        let b = modularity(&g, &Partition::new(vec![9, 9, 9, 2, 2, 2]), 1.0);
        assert_eq!(a, b);
    }

    #[test]
    fn singletons_are_negative() {
        let g = two_triangles();
        let q = modularity(&g, &Partition::singletons(6), 1.0);
        assert!((q + 1.0 / 6.0).abs() < 1e-12);
    }

    #[test]
    fn one_community_is_zero() {
        let g = two_triangles();
        let q = modularity(&g, &Partition::new(vec![0; 6]), 1.0);
        assert!(q.abs() < 1e-12);
    }

    #[test]
    fn self_loops_count_as_internal() {
        // One vertex with a loop and one isolated vertex: everything internal.
        let g = from_unweighted_edges(2, [(0, 0)]).unwrap();
        let q = modularity(&g, &Partition::new(vec![0, 1]), 1.0);
        assert!(q.abs() < 1e-12);
    }

    #[test]
    fn no_edges_scores_zero() {
        let g = from_unweighted_edges(3, []).unwrap();
        assert_eq!(modularity(&g, &Partition::singletons(3), 1.0), 0.0);
    }

    #[test]
    fn summary_of_scores() {
        let s = ModularitySummary::from_scores(&[0.1, 0.3, 0.2]).unwrap();
        assert_eq!(s.trials, 3);
        assert_eq!(s.min, 0.1);
        assert_eq!(s.max, 0.3);
        assert!((s.mean - 0.2).abs() < 1e-12);
        assert!((s.std_dev - 0.1).abs() < 1e-12);

        let single = ModularitySummary::from_scores(&[0.4]).unwrap();
        assert_eq!(single.std_dev, 0.0);
        assert!(ModularitySummary::from_scores(&[]).is_none());
    }
}
