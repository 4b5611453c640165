//! Community detection over many shuffled vertex orders, keeping the
//! partition with the highest modularity

pub mod cluster;
pub mod config;
pub mod data;
pub mod error;
pub mod graph;
pub mod search;
pub mod storage;

pub use cluster::{BestResult, CommunityDetection, Detection, Louvain, Partition, TrialResult};
pub use config::Config;
pub use error::{Error, Result, TrialFailure};
pub use search::{run, SearchReport, ShuffledSearch};
