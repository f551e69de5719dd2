//! Coordinator side of the distributed merge pipeline.
//!
//! The coordinator owns the full edge list and drives a strict phase
//! sequence against `P` spawned worker processes:
//!
//! `INIT -> COUNT_BROADCAST -> SCATTER -> LOCAL_SORT -> GATHER -> MERGE
//! -> REDUCE -> DONE`
//!
//! Slices are contiguous and differ in length by at most one (the first
//! `total % P` workers get the extra edge). Workers sort their slice in
//! the canonical `(weight, src, dest)` order and echo it back; because
//! the merge breaks ties with the same order, the merged stream is
//! identical to sorting the whole list in one process. The reduction is
//! a straight Kruskal scan over that stream. Merge and reduce run only
//! on the coordinator; the serial tail is the accepted cost of keeping
//! the workers protocol-trivial.
//!
//! Failure model is fail-stop: the first IO error, bad frame, size
//! mismatch, or nonzero worker exit kills the remaining workers and
//! aborts the run with no partial result.

use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::Instant;

use spanner_core::{DisjointSet, Edge, MstResult, chunk_range};
use tracing::{info, warn};

use crate::config::ClusterConfig;
use crate::error::WireError;
use crate::protocol;

/// Pipeline phase, logged on every transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Init,
    CountBroadcast,
    Scatter,
    LocalSort,
    Gather,
    Merge,
    Reduce,
    Done,
}

impl Phase {
    pub fn name(&self) -> &'static str {
        match self {
            Phase::Init => "INIT",
            Phase::CountBroadcast => "COUNT_BROADCAST",
            Phase::Scatter => "SCATTER",
            Phase::LocalSort => "LOCAL_SORT",
            Phase::Gather => "GATHER",
            Phase::Merge => "MERGE",
            Phase::Reduce => "REDUCE",
            Phase::Done => "DONE",
        }
    }
}

/// One spawned worker and its pipe ends.
struct WorkerLink {
    index: usize,
    child: Child,
    stdin: ChildStdin,
    stdout: ChildStdout,
}

/// Coordinator for one distributed MST computation.
pub struct MergePipeline<'a> {
    config: &'a ClusterConfig,
}

impl<'a> MergePipeline<'a> {
    pub fn new(config: &'a ClusterConfig) -> Self {
        Self { config }
    }

    /// Runs the full pipeline over `edges` and reduces to the spanning
    /// forest of the `[0, num_vertices)` range.
    pub fn run(&self, edges: &[Edge], num_vertices: usize) -> Result<MstResult, WireError> {
        let start = Instant::now();
        let workers = self.config.cluster.workers;
        enter(Phase::Init);
        info!(workers, edges = edges.len(), num_vertices, "Starting pipeline");

        let mut links = self.spawn_workers(workers)?;
        let exchanged = exchange(&mut links, edges);
        let sorted_slices = match exchanged {
            Ok(slices) => slices,
            Err(e) => {
                kill_all(&mut links);
                return Err(e);
            }
        };
        reap(links)?;

        enter(Phase::Merge);
        let merged = merge_sorted_slices(&sorted_slices);

        enter(Phase::Reduce);
        let result = kruskal_reduce(&merged, num_vertices);

        enter(Phase::Done);
        info!(
            mst_edges = result.num_edges(),
            total_weight = result.total_weight,
            "Pipeline finished in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        Ok(result)
    }

    fn spawn_workers(&self, workers: usize) -> Result<Vec<WorkerLink>, WireError> {
        let binary = self.config.resolve_worker_binary();
        let mut links = Vec::with_capacity(workers);
        for index in 0..workers {
            let spawned = Command::new(&binary)
                .arg("--index")
                .arg(index.to_string())
                .stdin(Stdio::piped())
                .stdout(Stdio::piped())
                .spawn();
            let mut child = match spawned {
                Ok(child) => child,
                Err(e) => {
                    kill_all(&mut links);
                    return Err(WireError::Worker {
                        index,
                        reason: format!("spawn of {} failed: {e}", binary.display()),
                    });
                }
            };
            // Both pipes were requested just above, so both are present.
            let stdin = child.stdin.take().ok_or_else(|| WireError::Worker {
                index,
                reason: "no stdin pipe".to_string(),
            })?;
            let stdout = child.stdout.take().ok_or_else(|| WireError::Worker {
                index,
                reason: "no stdout pipe".to_string(),
            })?;
            links.push(WorkerLink {
                index,
                child,
                stdin,
                stdout,
            });
        }
        Ok(links)
    }
}

/// Phases COUNT_BROADCAST through GATHER against live workers.
fn exchange(links: &mut [WorkerLink], edges: &[Edge]) -> Result<Vec<Vec<Edge>>, WireError> {
    let workers = links.len();
    let total = edges.len();

    enter(Phase::CountBroadcast);
    for link in links.iter_mut() {
        protocol::write_count(&mut link.stdin, total as u64)?;
    }

    enter(Phase::Scatter);
    for link in links.iter_mut() {
        let slice = &edges[chunk_range(total, workers, link.index)];
        info!(worker = link.index, len = slice.len(), "Scattering slice");
        protocol::write_edges(&mut link.stdin, slice)?;
    }

    enter(Phase::LocalSort);

    enter(Phase::Gather);
    let mut sorted_slices = Vec::with_capacity(workers);
    for link in links.iter_mut() {
        let expected = chunk_range(total, workers, link.index).len();
        let slice = protocol::read_edges(&mut link.stdout)?;
        if slice.len() != expected {
            return Err(WireError::SizeMismatch {
                expected,
                actual: slice.len(),
            });
        }
        sorted_slices.push(slice);
    }
    Ok(sorted_slices)
}

/// Joins every worker; a nonzero exit is an error even after a clean
/// exchange.
fn reap(links: Vec<WorkerLink>) -> Result<(), WireError> {
    for link in links {
        let WorkerLink {
            index,
            mut child,
            stdin,
            stdout,
        } = link;
        drop(stdin);
        drop(stdout);
        let status = child.wait()?;
        if !status.success() {
            return Err(WireError::Worker {
                index,
                reason: format!("exited with {status}"),
            });
        }
    }
    Ok(())
}

fn kill_all(links: &mut Vec<WorkerLink>) {
    for link in links.iter_mut() {
        warn!(worker = link.index, "Killing worker after pipeline failure");
        let _ = link.child.kill();
        let _ = link.child.wait();
    }
    links.clear();
}

fn enter(phase: Phase) {
    info!(phase = phase.name(), "Pipeline phase");
}

/// K-way merge of sorted slices by linear scan of the fronts.
///
/// Ties across slices resolve through the same canonical edge order the
/// workers sorted with, so the output equals one global sort.
pub fn merge_sorted_slices(slices: &[Vec<Edge>]) -> Vec<Edge> {
    let total: usize = slices.iter().map(Vec::len).sum();
    let mut cursors = vec![0usize; slices.len()];
    let mut merged = Vec::with_capacity(total);
    for _ in 0..total {
        let mut best: Option<(usize, Edge)> = None;
        for (i, slice) in slices.iter().enumerate() {
            if let Some(&front) = slice.get(cursors[i]) {
                if best.map_or(true, |(_, b)| front < b) {
                    best = Some((i, front));
                }
            }
        }
        if let Some((i, front)) = best {
            cursors[i] += 1;
            merged.push(front);
        }
    }
    merged
}

/// Greedy reduction over a globally sorted stream: keep each edge that
/// joins two components, stop as soon as the tree is complete.
///
/// Running out of stream earlier simply leaves a spanning forest, which
/// is the correct answer for a disconnected input. Every vertex id in
/// `sorted` must be below `num_vertices`.
pub fn kruskal_reduce(sorted: &[Edge], num_vertices: usize) -> MstResult {
    let mut result = MstResult::new(num_vertices);
    if num_vertices == 0 {
        return result;
    }
    let mut dsu = DisjointSet::new(num_vertices);
    for edge in sorted {
        if result.num_edges() == num_vertices - 1 {
            break;
        }
        if dsu.union(edge.src as usize, edge.dest as usize) {
            result.push(edge.src, edge.dest, edge.weight);
        }
    }
    result
}
