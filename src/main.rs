use anyhow::Result;
use clap::Parser;

use shuffled_louvain::cluster::Louvain;
use shuffled_louvain::config::Config;
use shuffled_louvain::search::ShuffledSearch;
use shuffled_louvain::{data, storage};

#[derive(Parser, Debug)]
#[clap(
    name = "shuffled-louvain",
    about = "Louvain community detection over shuffled vertex orders, keeping the best modularity"
)]
struct Cli {
    /// Path to input edge list (.parquet, or whitespace-separated text)
    #[clap(long)]
    input: String,

    /// Output directory for results
    #[clap(long, default_value = "community_results")]
    output_dir: String,

    /// Number of shuffled detections to run
    #[clap(long, default_value = "10")]
    trials: usize,

    /// Run the trials one after another on a single thread
    #[clap(long)]
    sequential: bool,

    /// Number of worker threads (0 = use all available cores)
    #[clap(long, default_value = "0")]
    threads: usize,

    /// Base seed for reproducible runs
    #[clap(long)]
    seed: Option<u64>,

    /// Run the first trial on the vertex order of the input file
    #[clap(long)]
    include_original_order: bool,

    /// Louvain resolution parameter
    #[clap(long, default_value = "1.0")]
    resolution: f64,

    /// Verbose logging
    #[clap(long, short)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse command line arguments
    let args = Cli::parse();

    // Configure logging
    let log_level = if args.verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Info
    };

    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp_millis()
        .init();

    let config = Config {
        trials: args.trials,
        parallel: !args.sequential,
        threads: args.threads,
        seed: args.seed,
        include_original_order: args.include_original_order,
    };

    log::info!("Starting shuffled community search");
    log::info!("Input: {}", args.input);
    log::info!("Output: {}", args.output_dir);
    if config.parallel {
        log::info!("Using up to {} worker threads", config.worker_threads());
    }

    // 1. Load data
    let labeled = data::load_graph(&args.input)?;

    log::info!(
        "Loaded graph with {} nodes and {} edges",
        labeled.graph.node_count(),
        labeled.graph.edge_count()
    );

    // 2. Search
    let louvain = Louvain::new().with_resolution(args.resolution);
    let report = ShuffledSearch::new(config).run(&labeled.graph, &louvain)?;

    log::info!(
        "Best partition has {} communities, modularity {:.6}",
        report.best.partition.community_count(),
        report.best.modularity
    );
    if report.failed() > 0 {
        log::warn!("{} of {} trials failed", report.failed(), report.trials);
    }

    // 3. Save results
    storage::save_results(&report, Some(labeled.node_ids.as_slice()), &args.output_dir)?;

    log::info!("Search complete. Results saved to {}", args.output_dir);

    Ok(())
}
