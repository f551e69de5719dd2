//! Worker side of the exchange: receive, sort, echo.

use std::io::{Read, Write};

use tracing::{debug, info};

use crate::error::WireError;
use crate::protocol;

/// Runs one worker conversation over any byte streams.
///
/// Generic over the streams so the whole exchange is testable against
/// in-memory buffers; the `merge-worker` binary passes stdin and stdout.
/// Protocol, in order: read the total edge count, read this worker's
/// slice, sort it in the canonical `(weight, src, dest)` order, write the
/// sorted slice back. Any framing or IO problem aborts the worker, which
/// the coordinator sees as a dead pipe.
pub fn run_worker<R: Read, W: Write>(
    input: &mut R,
    output: &mut W,
    index: usize,
) -> Result<(), WireError> {
    let total = protocol::read_count(input)?;
    debug!(index, total, "Received edge count broadcast");

    let mut slice = protocol::read_edges(input)?;
    info!(index, len = slice.len(), "Sorting local slice");
    slice.sort();

    protocol::write_edges(output, &slice)?;
    debug!(index, "Returned sorted slice");
    Ok(())
}
