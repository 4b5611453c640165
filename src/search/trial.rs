//! One trial: permute, detect, remap

use crate::cluster::detection::{CommunityDetection, DetectionRunner};
use crate::cluster::{remap_partition, TrialResult};
use crate::error::TrialFailure;
use crate::graph::permutation::trial_rng;
use crate::graph::{Permutation, PermutedGraph};
use petgraph::graph::UnGraph;

/// Result of one trial as collected by the coordinator
pub type TrialOutcome = std::result::Result<TrialResult, TrialFailure>;

/// Submission index of an outcome, successful or not
pub fn outcome_trial(outcome: &TrialOutcome) -> usize {
    match outcome {
        Ok(result) => result.trial,
        Err(failure) => failure.trial,
    }
}

/// How trials choose their vertex order
#[derive(Debug, Clone, Copy)]
pub struct TrialPlan {
    pub base_seed: u64,

    /// Trial 0 keeps the given vertex order
    pub include_original_order: bool,
}

impl TrialPlan {
    pub fn new(base_seed: u64) -> Self {
        Self {
            base_seed,
            include_original_order: false,
        }
    }

    /// Vertex order for `trial`, drawn from a generator owned by that trial
    pub fn permutation(&self, trial: usize, len: usize) -> Permutation {
        if trial == 0 && self.include_original_order {
            return Permutation::identity(len);
        }
        let mut rng = trial_rng(self.base_seed, trial);
        Permutation::random(len, &mut rng)
    }
}

/// Run a single trial against `graph`. Never panics on a detector failure;
/// the failure is returned for the coordinator to record.
pub fn run_trial<N, E, D>(
    graph: &UnGraph<N, E>,
    detector: &D,
    trial: usize,
    plan: &TrialPlan,
) -> TrialOutcome
where
    N: Clone,
    E: Clone,
    D: CommunityDetection<N, E> + ?Sized,
{
    let permutation = plan.permutation(trial, graph.node_count());
    let permuted = PermutedGraph::build(graph, permutation);

    let detection = DetectionRunner::new(detector).run(trial, permuted.graph())?;
    let partition = remap_partition(&detection.partition, permuted.permutation());

    log::debug!(
        "Trial {} finished: modularity {:.6}, {} communities",
        trial,
        detection.modularity,
        partition.community_count()
    );

    Ok(TrialResult {
        trial,
        partition,
        modularity: detection.modularity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::{Detection, Louvain, Partition};
    use crate::error::{Error, Result};
    use crate::graph::{from_unweighted_edges, WeightedGraph};

    fn graph() -> WeightedGraph {
        from_unweighted_edges(
            7,
            [(0, 1), (1, 2), (2, 0), (2, 3), (3, 4), (4, 5), (5, 3), (5, 6), (6, 4)],
        )
        .unwrap()
    }

    #[test]
    fn identity_trial_matches_a_direct_call() {
        let g = graph();
        let louvain = Louvain::new();
        let direct = louvain.detect(&g).unwrap();

        let plan = TrialPlan {
            base_seed: 1,
            include_original_order: true,
        };
        let trial = run_trial(&g, &louvain, 0, &plan).unwrap();
        assert_eq!(trial.partition, direct.partition);
        assert_eq!(trial.modularity, direct.modularity);
    }

    #[test]
    fn only_trial_zero_keeps_the_order() {
        let plan = TrialPlan {
            base_seed: 77,
            include_original_order: true,
        };
        assert!(plan.permutation(0, 50).is_identity());
        assert!(!plan.permutation(1, 50).is_identity());
        assert!(!TrialPlan::new(77).permutation(0, 50).is_identity());
    }

    #[test]
    fn result_is_in_original_indexing() {
        // A detector that labels every permuted vertex with its own index:
        // remapped, vertex v must carry σ(v).
        let g = graph();
        let labels = |g: &WeightedGraph| -> Result<Detection> {
            Ok(Detection {
                partition: Partition::singletons(g.node_count()),
                modularity: 0.0,
            })
        };
        let plan = TrialPlan::new(9);
        let sigma = plan.permutation(3, g.node_count());
        let trial = run_trial(&g, &labels, 3, &plan).unwrap();
        for v in 0..g.node_count() {
            assert_eq!(trial.partition.community(v), sigma.apply(v));
        }
    }

    #[test]
    fn failures_carry_the_trial_index() {
        let g = graph();
        let failing =
            |_: &WeightedGraph| -> Result<Detection> { Err(Error::Detection("nope".into())) };
        let outcome = run_trial(&g, &failing, 5, &TrialPlan::new(0));
        assert_eq!(outcome_trial(&outcome), 5);
        assert!(outcome.is_err());
    }
}
