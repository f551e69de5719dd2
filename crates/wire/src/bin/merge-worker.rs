//! merge-worker — one rank of the distributed merge pipeline.
//!
//! Speaks the framed record protocol on stdin/stdout:
//! - reads the global edge count broadcast
//! - reads its slice frame
//! - sorts the slice in canonical order
//! - writes the sorted slice back as a frame
//!
//! Logs go to stderr so stdout stays a clean protocol channel. The
//! process exits nonzero on any protocol or IO error, which the
//! coordinator reports as a worker failure.

use clap::Parser;

use spanner_wire::run_worker;

/// Sort worker for the distributed merge pipeline.
#[derive(Parser, Debug)]
#[command(name = "merge-worker", version, about)]
struct Cli {
    /// Worker index assigned by the coordinator, used only for logging.
    #[arg(long, env = "SPANNER_WORKER_INDEX", default_value_t = 0)]
    index: usize,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    run_worker(&mut stdin.lock(), &mut stdout.lock(), cli.index)?;
    Ok(())
}
