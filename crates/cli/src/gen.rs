//! The `gen` subcommand: seeded random graphs for benchmarks and tests.

use anyhow::{Result, bail};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::info;

use spanner_core::Edge;
use spanner_graph::io::{write_binary, write_text};

use crate::cli::GenArgs;

pub fn execute(args: &GenArgs) -> Result<()> {
    if args.max_weight == 0 || args.max_weight == u32::MAX {
        bail!("--max-weight must be between 1 and {}", u32::MAX - 1);
    }
    let edges = generate(args.vertices, args.extra_edges, args.max_weight, args.seed);
    match args.format.as_str() {
        "text" => write_text(&args.output, &edges)?,
        "binary" => write_binary(&args.output, &edges)?,
        other => bail!("Unknown output format '{other}', expected text or binary"),
    }
    info!(
        path = %args.output.display(),
        vertices = args.vertices,
        edges = edges.len(),
        seed = args.seed,
        "Graph written"
    );
    Ok(())
}

/// Connected random graph: each vertex past the first anchors to a
/// random earlier one, then `extra_edges` random pairs are layered on
/// top (self-pairs are skipped, duplicates are allowed).
fn generate(vertices: u32, extra_edges: usize, max_weight: u32, seed: u64) -> Vec<Edge> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut edges = Vec::with_capacity(vertices.saturating_sub(1) as usize + extra_edges);
    for v in 1..vertices {
        let anchor = rng.gen_range(0..v);
        edges.push(Edge::new(anchor, v, rng.gen_range(1..=max_weight)));
    }
    if vertices > 1 {
        for _ in 0..extra_edges {
            let a = rng.gen_range(0..vertices);
            let b = rng.gen_range(0..vertices);
            if a == b {
                continue;
            }
            edges.push(Edge::new(a, b, rng.gen_range(1..=max_weight)));
        }
    }
    edges
}
