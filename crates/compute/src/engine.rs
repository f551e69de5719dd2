use std::time::Instant;

use spanner_core::MstResult;
use spanner_graph::GraphStore;
use tracing::info;

use crate::algorithms::{boruvka_mst, reduction_rounds_mst, serial_mst, shared_frontier_mst};
use crate::error::ComputeError;
use crate::exec::TaskPool;

/// Which shared-memory MST strategy to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Serial,
    SharedFrontier,
    ReductionRounds,
    Boruvka,
}

impl Strategy {
    pub fn name(&self) -> &'static str {
        match self {
            Strategy::Serial => "serial",
            Strategy::SharedFrontier => "frontier",
            Strategy::ReductionRounds => "rounds",
            Strategy::Boruvka => "boruvka",
        }
    }
}

/// Runs the chosen strategy against the store and logs the timing.
///
/// `threads` is ignored by the serial strategy; `0` means one worker per
/// core.
pub fn compute_mst(
    graph: &GraphStore,
    strategy: Strategy,
    threads: usize,
) -> Result<MstResult, ComputeError> {
    let start = Instant::now();
    let result = match strategy {
        Strategy::Serial => serial_mst(graph),
        Strategy::SharedFrontier => {
            let pool = TaskPool::new(threads)?;
            shared_frontier_mst(graph, &pool)?
        }
        Strategy::ReductionRounds => {
            let pool = TaskPool::new(threads)?;
            reduction_rounds_mst(graph, &pool)?
        }
        Strategy::Boruvka => {
            let pool = TaskPool::new(threads)?;
            boruvka_mst(graph, &pool)?
        }
    };
    info!(
        strategy = strategy.name(),
        vertices = graph.num_vertices(),
        mst_edges = result.num_edges(),
        total_weight = result.total_weight,
        "MST computed in {:.3}s",
        start.elapsed().as_secs_f64()
    );
    Ok(result)
}
