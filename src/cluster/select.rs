//! Pick the winning trial

use crate::cluster::{BestResult, TrialResult};
use crate::error::{Error, Result, TrialFailure};
use std::cmp::Ordering;

/// Fold the successful trials into the one with the highest modularity.
///
/// Equal scores resolve to the lowest trial index, so the winner does not
/// depend on the order in which trials completed. With no successful trial
/// the search fails with [`Error::AllTrialsFailed`] carrying `failures`.
pub fn select_best(results: Vec<TrialResult>, failures: &[TrialFailure]) -> Result<BestResult> {
    results
        .into_iter()
        .reduce(|best, candidate| {
            if outranks(&candidate, &best) {
                candidate
            } else {
                best
            }
        })
        .ok_or_else(|| Error::AllTrialsFailed {
            failures: failures.to_vec(),
        })
}

/// Strictly higher score, or the same score from an earlier trial.
///
/// Scores compare numerically, so `-0.0` and `0.0` tie. Scores reaching here
/// are finite.
fn outranks(candidate: &TrialResult, incumbent: &TrialResult) -> bool {
    match candidate.modularity.partial_cmp(&incumbent.modularity) {
        Some(Ordering::Greater) => true,
        Some(Ordering::Equal) => candidate.trial < incumbent.trial,
        Some(Ordering::Less) | None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cluster::Partition;

    fn result(trial: usize, modularity: f64) -> TrialResult {
        TrialResult {
            trial,
            partition: Partition::new(vec![trial]),
            modularity,
        }
    }

    #[test]
    fn picks_the_maximum() {
        let results = vec![result(0, 0.1), result(1, 0.42), result(2, 0.3)];
        let best = select_best(results.clone(), &[]).unwrap();
        assert_eq!(best.trial, 1);
        assert!(results.iter().all(|r| best.modularity >= r.modularity));
    }

    #[test]
    fn ties_go_to_the_earliest_trial() {
        let best = select_best(vec![result(0, 0.5), result(1, 0.5)], &[]).unwrap();
        assert_eq!(best.trial, 0);
    }

    #[test]
    fn signed_zeros_tie() {
        let best = select_best(vec![result(0, -0.0), result(1, 0.0)], &[]).unwrap();
        assert_eq!(best.trial, 0);
        let best = select_best(vec![result(1, 0.0), result(0, -0.0)], &[]).unwrap();
        assert_eq!(best.trial, 0);
    }

    #[test]
    fn tie_break_ignores_completion_order() {
        let forward = vec![result(2, 0.5), result(5, 0.5), result(7, 0.1)];
        let mut reversed = forward.clone();
        reversed.reverse();
        assert_eq!(select_best(forward, &[]).unwrap().trial, 2);
        assert_eq!(select_best(reversed, &[]).unwrap().trial, 2);
    }

    #[test]
    fn negative_scores_still_select() {
        let best = select_best(vec![result(0, -0.3), result(1, -0.1)], &[]).unwrap();
        assert_eq!(best.trial, 1);
    }

    #[test]
    fn nothing_to_select_is_an_aggregate_failure() {
        let failures = vec![TrialFailure::new(0, "a"), TrialFailure::new(1, "b")];
        match select_best(Vec::new(), &failures) {
            Err(Error::AllTrialsFailed { failures: reported }) => assert_eq!(reported, failures),
            other => panic!("expected aggregate failure, got {:?}", other),
        }
    }
}
