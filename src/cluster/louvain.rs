//! Louvain multilevel modularity optimization.
//!
//! Greedy, multi-level algorithm (Blondel et al. 2008):
//!
//! 1. **Local moving**: every vertex starts alone; vertices are visited in
//!    index order and moved to the neighbouring community with the largest
//!    modularity gain, until a full pass moves nothing.
//! 2. **Aggregation**: each community becomes one vertex of a coarser graph;
//!    internal edges turn into self-loops, edges between communities are
//!    summed.
//! 3. Repeat on the coarse graph until a level moves nothing.
//!
//! The implementation contains no randomness. Vertices are visited in index
//! order, candidate communities in the order their first neighbour is met,
//! and ties keep the vertex where it is. The result depends on vertex order
//! alone, which is what the shuffled search varies.

use crate::cluster::detection::{CommunityDetection, Detection};
use crate::cluster::{metrics, Partition};
use crate::error::{Error, Result};
use petgraph::graph::UnGraph;
use petgraph::visit::EdgeRef;
use std::collections::BTreeMap;

/// Louvain community detection
#[derive(Debug, Clone)]
pub struct Louvain {
    /// Resolution parameter (gamma)
    resolution: f64,

    /// Maximum local-moving passes per level
    max_passes: usize,

    /// Maximum number of aggregation levels
    max_levels: usize,

    /// A move must improve the gain by more than this
    min_gain: f64,
}

impl Default for Louvain {
    fn default() -> Self {
        Self {
            resolution: 1.0,
            max_passes: 100,
            max_levels: 32,
            min_gain: 1e-12,
        }
    }
}

impl Louvain {
    pub fn new() -> Self {
        Self::default()
    }

    /// Higher values produce smaller communities
    pub fn with_resolution(mut self, resolution: f64) -> Self {
        self.resolution = resolution;
        self
    }

    pub fn with_max_passes(mut self, max_passes: usize) -> Self {
        self.max_passes = max_passes.max(1);
        self
    }

    pub fn with_max_levels(mut self, max_levels: usize) -> Self {
        self.max_levels = max_levels.max(1);
        self
    }

    pub fn resolution(&self) -> f64 {
        self.resolution
    }

    /// Phase 1 on one level. Returns the community of each level vertex and
    /// whether any vertex moved.
    fn local_moving(&self, level: &Level, total_degree: f64) -> (Vec<usize>, bool) {
        let n = level.len();
        let mut community: Vec<usize> = (0..n).collect();
        let mut community_degree = level.degrees.clone();

        // Scratch space for the link weight from the current vertex to each
        // neighbouring community.
        let mut link = vec![0.0; n];
        let mut seen = vec![false; n];
        let mut touched: Vec<usize> = Vec::new();

        let mut moved_any = false;

        for _ in 0..self.max_passes {
            let mut moved = 0usize;

            for node in 0..n {
                let current = community[node];
                let k = level.degrees[node];

                for &(neighbor, w) in &level.adj[node] {
                    let c = community[neighbor];
                    if !seen[c] {
                        seen[c] = true;
                        touched.push(c);
                    }
                    link[c] += w;
                }

                community_degree[current] -= k;

                let gain = |c: usize| {
                    link[c] - self.resolution * community_degree[c] * k / total_degree
                };

                let mut best = current;
                let mut best_gain = gain(current);
                for &c in &touched {
                    if c == current {
                        continue;
                    }
                    let g = gain(c);
                    if g > best_gain + self.min_gain {
                        best = c;
                        best_gain = g;
                    }
                }

                community_degree[best] += k;
                community[node] = best;
                if best != current {
                    moved += 1;
                }

                for &c in &touched {
                    link[c] = 0.0;
                    seen[c] = false;
                }
                touched.clear();
            }

            if moved == 0 {
                break;
            }
            moved_any = true;
        }

        (community, moved_any)
    }
}

impl<N, E> CommunityDetection<N, E> for Louvain
where
    E: Copy + Into<f64>,
{
    fn detect(&self, graph: &UnGraph<N, E>) -> Result<Detection> {
        let mut level = Level::from_graph(graph)?;
        let mut membership: Vec<usize> = (0..graph.node_count()).collect();

        let total_degree: f64 = level.degrees.iter().sum();
        if total_degree > 0.0 {
            for _ in 0..self.max_levels {
                let (community, moved) = self.local_moving(&level, total_degree);
                if !moved {
                    break;
                }

                let (dense, count) = renumber(&community);
                for c in membership.iter_mut() {
                    *c = dense[*c];
                }

                if count == level.len() {
                    break;
                }
                level = level.aggregate(&dense, count);
            }
        }

        let partition = Partition::new(membership);
        let modularity = metrics::modularity(graph, &partition, self.resolution);

        Ok(Detection {
            partition,
            modularity,
        })
    }
}

/// One level of the multilevel hierarchy
#[derive(Debug, Clone)]
struct Level {
    /// Weighted adjacency without self-loops, both directions stored
    adj: Vec<Vec<(usize, f64)>>,

    /// Weighted degree, self-loops counted twice
    degrees: Vec<f64>,
}

impl Level {
    fn from_graph<N, E>(graph: &UnGraph<N, E>) -> Result<Self>
    where
        E: Copy + Into<f64>,
    {
        let n = graph.node_count();
        let mut adj = vec![Vec::new(); n];
        let mut degrees = vec![0.0; n];

        for edge in graph.edge_references() {
            let w: f64 = (*edge.weight()).into();
            if !w.is_finite() || w < 0.0 {
                return Err(Error::Detection(format!(
                    "Louvain requires finite non-negative edge weights, found {}",
                    w
                )));
            }

            let u = edge.source().index();
            let v = edge.target().index();
            if u == v {
                degrees[u] += 2.0 * w;
            } else {
                adj[u].push((v, w));
                adj[v].push((u, w));
                degrees[u] += w;
                degrees[v] += w;
            }
        }

        Ok(Self { adj, degrees })
    }

    fn len(&self) -> usize {
        self.degrees.len()
    }

    /// Contract communities into vertices. `community` must be dense in
    /// `[0, count)`. Internal weight survives only in the degrees, which is
    /// all the gain needs.
    fn aggregate(&self, community: &[usize], count: usize) -> Self {
        let mut degrees = vec![0.0; count];
        let mut between: BTreeMap<(usize, usize), f64> = BTreeMap::new();

        for u in 0..self.len() {
            let cu = community[u];
            degrees[cu] += self.degrees[u];

            for &(v, w) in &self.adj[u] {
                // Each undirected edge is stored twice; count it once.
                if u > v {
                    continue;
                }
                let cv = community[v];
                if cu != cv {
                    *between.entry((cu.min(cv), cu.max(cv))).or_insert(0.0) += w;
                }
            }
        }

        let mut adj = vec![Vec::new(); count];
        for ((a, b), w) in between {
            adj[a].push((b, w));
            adj[b].push((a, w));
        }

        Self { adj, degrees }
    }
}

/// Map community labels to `0..count` in order of first appearance
fn renumber(community: &[usize]) -> (Vec<usize>, usize) {
    let mut dense_of = vec![usize::MAX; community.len()];
    let mut next = 0;
    let dense = community
        .iter()
        .map(|&c| {
            if dense_of[c] == usize::MAX {
                dense_of[c] = next;
                next += 1;
            }
            dense_of[c]
        })
        .collect();
    (dense, next)
}
