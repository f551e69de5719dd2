use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// Minimum spanning tree engine for undirected weighted graphs.
///
/// Computes the spanning forest of an edge list with one of four
/// shared-memory strategies or a multi-process merge pipeline, and can
/// generate seeded random graphs for benchmarking.
#[derive(Parser, Debug)]
#[command(name = "spanner", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Compute the minimum spanning forest of an edge list.
    Run(RunArgs),
    /// Generate a random connected edge list.
    Gen(GenArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Path to the input edge list.
    #[arg(long)]
    pub input: PathBuf,

    /// Input format: text or binary.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// On-disk weight type for binary input: u32, u64, i32, i64, f32, or f64.
    #[arg(long, default_value = "u32")]
    pub weight_type: String,

    /// Strategy: serial, frontier, rounds, boruvka, or merge.
    #[arg(long, env = "SPANNER_STRATEGY", default_value = "serial")]
    pub strategy: String,

    /// Worker threads for the parallel strategies; 0 means one per core.
    #[arg(long, env = "SPANNER_THREADS", default_value_t = 0)]
    pub threads: usize,

    /// Worker process count for the merge strategy (overrides the config file).
    #[arg(long)]
    pub workers: Option<usize>,

    /// Cluster config TOML for the merge strategy.
    #[arg(long, env = "SPANNER_CONFIG")]
    pub config: Option<PathBuf>,

    /// Write the tree here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Emit a JSON run report instead of the plain edge listing.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct GenArgs {
    /// Number of vertices.
    #[arg(long, default_value_t = 1000)]
    pub vertices: u32,

    /// Extra random edges on top of the connecting spanning tree.
    #[arg(long, default_value_t = 4000)]
    pub extra_edges: usize,

    /// Weights are drawn uniformly from [1, max-weight].
    #[arg(long, default_value_t = 1000)]
    pub max_weight: u32,

    /// RNG seed; the same seed always produces the same graph.
    #[arg(long, default_value_t = 42)]
    pub seed: u64,

    /// Output format: text or binary.
    #[arg(long, default_value = "text")]
    pub format: String,

    /// Output path.
    #[arg(long)]
    pub output: PathBuf,
}
