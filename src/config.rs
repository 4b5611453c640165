//! Configuration management for the shuffled community search

/// Settings for one search invocation
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Number of trials (independent vertex orders) to run
    pub trials: usize,

    /// Spread trials over a worker pool instead of the calling thread
    pub parallel: bool,

    /// Worker threads when parallel (0 = all available cores)
    pub threads: usize,

    /// Base seed for the per-trial generators; drawn from OS entropy if unset
    pub seed: Option<u64>,

    /// Run trial 0 on the vertex order as given instead of a shuffled one
    pub include_original_order: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            trials: 10,
            parallel: true,
            threads: 0,
            seed: None,
            include_original_order: false,
        }
    }
}

impl Config {
    /// Create a new configuration with custom values
    pub fn new(trials: usize, parallel: bool) -> Self {
        Self {
            trials,
            parallel,
            ..Self::default()
        }
    }

    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_original_order(mut self, include: bool) -> Self {
        self.include_original_order = include;
        self
    }

    /// Worker count for `trials` trials: sequential runs use one, parallel runs
    /// use the requested or available cores but never more than the trials
    pub fn worker_threads(&self) -> usize {
        if !self.parallel {
            return 1;
        }
        let threads = if self.threads > 0 {
            self.threads
        } else {
            num_cpus::get()
        };
        threads.min(self.trials).max(1)
    }
}
