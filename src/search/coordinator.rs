//! Trial scheduling on the calling thread or a scoped worker pool

use crate::config::Config;
use crate::error::Result;
use crate::search::trial::{outcome_trial, TrialOutcome};
use crossbeam::channel;

/// Dispatches trials and collects every outcome.
///
/// In parallel mode a fresh rayon pool is built for each dispatch and dropped
/// before `dispatch` returns, whatever the trials did. Sequential mode runs
/// the trials one after another on the caller's thread.
#[derive(Debug, Clone, Copy)]
pub struct ParallelCoordinator {
    workers: usize,
    parallel: bool,
}

impl ParallelCoordinator {
    pub fn sequential() -> Self {
        Self {
            workers: 1,
            parallel: false,
        }
    }

    pub fn parallel(workers: usize) -> Self {
        Self {
            workers: workers.max(1),
            parallel: true,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        if config.parallel {
            Self::parallel(config.worker_threads())
        } else {
            Self::sequential()
        }
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    /// Run `run(i)` for every trial index in `0..trials` and return all
    /// outcomes ordered by trial index. Blocks until every trial is done.
    pub fn dispatch<F>(&self, trials: usize, run: F) -> Result<Vec<TrialOutcome>>
    where
        F: Fn(usize) -> TrialOutcome + Sync,
    {
        let mut outcomes = if self.parallel {
            self.dispatch_pool(trials, &run)?
        } else {
            log::info!("Running {} trials sequentially", trials);
            (0..trials).map(&run).collect()
        };

        outcomes.sort_by_key(outcome_trial);
        Ok(outcomes)
    }

    fn dispatch_pool<F>(&self, trials: usize, run: &F) -> Result<Vec<TrialOutcome>>
    where
        F: Fn(usize) -> TrialOutcome + Sync,
    {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(self.workers)
            .thread_name(|i| format!("trial-worker-{}", i))
            .build()?;

        log::info!(
            "Dispatching {} trials across {} worker threads",
            trials,
            pool.current_num_threads()
        );

        let (sender, receiver) = channel::unbounded();

        pool.scope(|scope| {
            for trial in 0..trials {
                let sender = sender.clone();
                scope.spawn(move |_| {
                    // The receiver lives until after the scope closes.
                    let sent = sender.send(run(trial));
                    debug_assert!(sent.is_ok(), "trial {} outcome dropped", trial);
                });
            }
        });
        drop(sender);

        Ok(receiver.iter().collect())
    }
}
