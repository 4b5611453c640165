//! Boundary to the community detection primitive

use crate::cluster::Partition;
use crate::error::{Result, TrialFailure};
use petgraph::graph::UnGraph;
use std::panic::{self, AssertUnwindSafe};

/// What a detection primitive returns for one graph
#[derive(Debug, Clone, PartialEq)]
pub struct Detection {
    /// Community of each vertex of the graph the primitive was given
    pub partition: Partition,

    /// Modularity of `partition` on that graph
    pub modularity: f64,
}

/// A community detection algorithm: graph in, partition and score out.
///
/// Implemented by [`Louvain`](crate::cluster::Louvain) and by any closure of
/// the matching shape, so the search can be pointed at another algorithm
/// without touching the orchestration.
pub trait CommunityDetection<N, E> {
    fn detect(&self, graph: &UnGraph<N, E>) -> Result<Detection>;
}

impl<N, E, F> CommunityDetection<N, E> for F
where
    F: Fn(&UnGraph<N, E>) -> Result<Detection>,
{
    fn detect(&self, graph: &UnGraph<N, E>) -> Result<Detection> {
        self(graph)
    }
}

/// Runs the primitive for one trial and turns every way it can go wrong into
/// a [`TrialFailure`] instead of aborting the search
pub struct DetectionRunner<'a, D: ?Sized> {
    detector: &'a D,
}

impl<'a, D: ?Sized> DetectionRunner<'a, D> {
    pub fn new(detector: &'a D) -> Self {
        Self { detector }
    }

    pub fn run<N, E>(
        &self,
        trial: usize,
        graph: &UnGraph<N, E>,
    ) -> std::result::Result<Detection, TrialFailure>
    where
        D: CommunityDetection<N, E>,
    {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.detector.detect(graph)));

        let detection = match outcome {
            Ok(Ok(detection)) => detection,
            Ok(Err(err)) => return Err(TrialFailure::new(trial, err.to_string())),
            Err(payload) => {
                return Err(TrialFailure::new(
                    trial,
                    format!("detection panicked: {}", panic_message(&*payload)),
                ))
            }
        };

        if detection.partition.len() != graph.node_count() {
            return Err(TrialFailure::new(
                trial,
                format!(
                    "partition covers {} vertices but the graph has {}",
                    detection.partition.len(),
                    graph.node_count()
                ),
            ));
        }

        if !detection.modularity.is_finite() {
            return Err(TrialFailure::new(
                trial,
                format!("non-finite modularity {}", detection.modularity),
            ));
        }

        Ok(detection)
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        msg
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.as_str()
    } else {
        "unknown panic payload"
    }
}
