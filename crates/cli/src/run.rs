//! The `run` subcommand: load an edge list, compute its spanning
//! forest, write the result.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::time::Instant;

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::info;

use spanner_compute::{Strategy, compute_mst};
use spanner_core::MstResult;
use spanner_graph::io::{read_binary, read_text};
use spanner_graph::{EdgeList, GraphStore};
use spanner_wire::{ClusterConfig, MergePipeline};

use crate::cli::RunArgs;

/// How the forest gets computed: in one process or across workers.
enum Mode {
    Shared(Strategy),
    Merge,
}

fn parse_mode(name: &str) -> Result<Mode> {
    Ok(match name {
        "serial" => Mode::Shared(Strategy::Serial),
        "frontier" => Mode::Shared(Strategy::SharedFrontier),
        "rounds" => Mode::Shared(Strategy::ReductionRounds),
        "boruvka" => Mode::Shared(Strategy::Boruvka),
        "merge" => Mode::Merge,
        other => bail!(
            "Unknown strategy '{other}', expected serial, frontier, rounds, boruvka, or merge"
        ),
    })
}

fn read_input(args: &RunArgs) -> Result<EdgeList> {
    let list = match args.format.as_str() {
        "text" => read_text(&args.input)?,
        "binary" => match args.weight_type.as_str() {
            "u32" => read_binary::<u32>(&args.input)?,
            "u64" => read_binary::<u64>(&args.input)?,
            "i32" => read_binary::<i32>(&args.input)?,
            "i64" => read_binary::<i64>(&args.input)?,
            "f32" => read_binary::<f32>(&args.input)?,
            "f64" => read_binary::<f64>(&args.input)?,
            other => bail!("Unknown weight type '{other}'"),
        },
        other => bail!("Unknown input format '{other}', expected text or binary"),
    };
    Ok(list)
}

/// JSON run report, one object per invocation.
#[derive(Debug, Serialize)]
struct RunReport {
    started_at: DateTime<Utc>,
    strategy: String,
    input: String,
    input_edges: usize,
    num_vertices: usize,
    mst_edges: usize,
    total_weight: u64,
    elapsed_secs: f64,
}

pub fn execute(args: &RunArgs) -> Result<()> {
    let mode = parse_mode(&args.strategy)?;
    let started_at = Utc::now();
    let start = Instant::now();

    let list = read_input(args)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    info!(
        path = %args.input.display(),
        edges = list.edges.len(),
        vertices = list.num_vertices,
        "Loaded edge list"
    );

    let mut result = match mode {
        Mode::Shared(strategy) => {
            let graph = GraphStore::from_edges(&list.edges);
            compute_mst(&graph, strategy, args.threads)?
        }
        Mode::Merge => {
            let mut config = match &args.config {
                Some(path) => ClusterConfig::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))?,
                None => ClusterConfig::local(),
            };
            if let Some(workers) = args.workers {
                config.cluster.workers = workers;
                config.validate()?;
            }
            MergePipeline::new(&config).run(&list.edges, list.num_vertices)?
        }
    };
    result.sort_for_output();
    let elapsed_secs = start.elapsed().as_secs_f64();

    let mut out: Box<dyn Write> = match &args.output {
        Some(path) => Box::new(BufWriter::new(
            File::create(path)
                .with_context(|| format!("Failed to create {}", path.display()))?,
        )),
        None => Box::new(std::io::stdout().lock()),
    };
    if args.json {
        let report = RunReport {
            started_at,
            strategy: args.strategy.clone(),
            input: args.input.display().to_string(),
            input_edges: list.edges.len(),
            num_vertices: list.num_vertices,
            mst_edges: result.num_edges(),
            total_weight: result.total_weight,
            elapsed_secs,
        };
        serde_json::to_writer_pretty(&mut out, &report)?;
        writeln!(out)?;
    } else {
        render_plain(&result, &mut out)?;
    }
    out.flush()?;
    Ok(())
}

/// One line per tree edge, already in `(vertex, parent)` order.
fn render_plain(result: &MstResult, out: &mut impl Write) -> std::io::Result<()> {
    for edge in &result.edges {
        writeln!(out, "{} <-> {} {}", edge.parent, edge.vertex, edge.weight)?;
    }
    Ok(())
}
