//! Edge-list ingestion and serialization.
//!
//! Two on-disk forms are supported:
//!
//! - whitespace text: one header line (skipped), then `src dest weight`
//!   per line. Malformed lines are skipped with a warning, never fatal.
//! - packed binary: headerless fixed-size records `(src: u32 LE,
//!   dest: u32 LE, weight: T LE)`, memory-mapped and decoded in place.
//!   The on-disk weight type `T` is chosen by the caller; values that do
//!   not narrow losslessly into the canonical [`Weight`] are skipped like
//!   malformed text lines.
//!
//! A file that cannot be opened is an error. A file full of garbage is an
//! empty edge list plus warnings.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use memmap2::Mmap;
use spanner_core::{Edge, NO_EDGE, SpannerError, VertexId, Weight};
use tracing::warn;

/// Parsed edge list plus the dense vertex range that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EdgeList {
    pub edges: Vec<Edge>,
    /// Highest vertex id seen plus one; 0 for an empty list.
    pub num_vertices: usize,
}

impl EdgeList {
    fn from_edges(edges: Vec<Edge>) -> Self {
        let num_vertices = edges
            .iter()
            .map(|e| e.src.max(e.dest) as usize + 1)
            .max()
            .unwrap_or(0);
        Self {
            edges,
            num_vertices,
        }
    }
}

// ── Text form ──────────────────────────────────────────────────────

/// Reads a whitespace-separated edge list. The first line is always a
/// header and is discarded; later comment (`#`) and blank lines are
/// ignored quietly, anything else unparseable is skipped with a warning.
pub fn read_text(path: &Path) -> Result<EdgeList, SpannerError> {
    let file = File::open(path)?;
    let reader = BufReader::new(file);
    let mut edges = Vec::new();
    let mut skipped = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if idx == 0 {
            continue;
        }
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_edge_line(trimmed) {
            Some(edge) => edges.push(edge),
            None => {
                skipped += 1;
                warn!(line = idx + 1, content = trimmed, "Skipping malformed edge line");
            }
        }
    }

    if skipped > 0 {
        warn!(skipped, kept = edges.len(), "Edge lines were skipped");
    }
    Ok(EdgeList::from_edges(edges))
}

/// `src dest weight`, extra trailing tokens ignored. Weights equal to the
/// [`NO_EDGE`] sentinel are rejected so the sentinel stays unambiguous.
fn parse_edge_line(line: &str) -> Option<Edge> {
    let mut tokens = line.split_whitespace();
    let src: VertexId = tokens.next()?.parse().ok()?;
    let dest: VertexId = tokens.next()?.parse().ok()?;
    let weight: Weight = tokens.next()?.parse().ok()?;
    if weight == NO_EDGE {
        return None;
    }
    Some(Edge::new(src, dest, weight))
}

/// Writes the text form with the conventional header line.
pub fn write_text(path: &Path, edges: &[Edge]) -> Result<(), SpannerError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    writeln!(out, "# FromNodeId  ToNodeId  Weight")?;
    for e in edges {
        writeln!(out, "{} {} {}", e.src, e.dest, e.weight)?;
    }
    out.flush()?;
    Ok(())
}

// ── Binary form ────────────────────────────────────────────────────

/// On-disk weight encoding for binary edge lists.
///
/// `decode` is handed exactly [`Self::SIZE`] little-endian bytes.
/// `to_weight` narrows into the canonical [`Weight`]: `None` means the
/// value cannot be represented (negative, non-integral, too large, or the
/// reserved sentinel) and the whole record is skipped.
pub trait WeightCodec: Copy {
    const SIZE: usize;
    fn decode(bytes: &[u8]) -> Self;
    fn to_weight(self) -> Option<Weight>;
}

impl WeightCodec for u32 {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Self {
        u32::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        (self < NO_EDGE).then_some(self)
    }
}

impl WeightCodec for u64 {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Self {
        u64::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        u32::try_from(self).ok().filter(|w| *w < NO_EDGE)
    }
}

impl WeightCodec for i32 {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Self {
        i32::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        u32::try_from(self).ok()
    }
}

impl WeightCodec for i64 {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Self {
        i64::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        u32::try_from(self).ok().filter(|w| *w < NO_EDGE)
    }
}

impl WeightCodec for f32 {
    const SIZE: usize = 4;

    fn decode(bytes: &[u8]) -> Self {
        f32::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        if !self.is_finite() || self < 0.0 || self.fract() != 0.0 {
            return None;
        }
        let w = self as u32;
        (w < NO_EDGE && w as f32 == self).then_some(w)
    }
}

impl WeightCodec for f64 {
    const SIZE: usize = 8;

    fn decode(bytes: &[u8]) -> Self {
        f64::from_le_bytes(bytes.try_into().unwrap())
    }

    fn to_weight(self) -> Option<Weight> {
        if !self.is_finite() || self < 0.0 || self.fract() != 0.0 {
            return None;
        }
        let w = self as u32;
        (w < NO_EDGE && w as f64 == self).then_some(w)
    }
}

/// Reads a packed binary edge list, memory-mapped.
pub fn read_binary<T: WeightCodec>(path: &Path) -> Result<EdgeList, SpannerError> {
    let file = File::open(path)?;
    // Zero-length files cannot be mapped; they are just empty lists.
    if file.metadata()?.len() == 0 {
        return Ok(EdgeList::from_edges(Vec::new()));
    }
    let mmap = unsafe { Mmap::map(&file)? };
    Ok(decode_records::<T>(&mmap))
}

fn decode_records<T: WeightCodec>(data: &[u8]) -> EdgeList {
    let record_size = 8 + T::SIZE;
    let tail = data.len() % record_size;
    if tail != 0 {
        warn!(
            bytes = tail,
            record_size, "Ignoring trailing partial record"
        );
    }

    let mut edges = Vec::with_capacity(data.len() / record_size);
    let mut skipped = 0usize;
    let mut pos = 0usize;
    while pos + record_size <= data.len() {
        let src = u32::from_le_bytes(data[pos..pos + 4].try_into().unwrap());
        let dest = u32::from_le_bytes(data[pos + 4..pos + 8].try_into().unwrap());
        let raw = T::decode(&data[pos + 8..pos + record_size]);
        match raw.to_weight() {
            Some(weight) => edges.push(Edge::new(src, dest, weight)),
            None => skipped += 1,
        }
        pos += record_size;
    }

    if skipped > 0 {
        warn!(
            skipped,
            kept = edges.len(),
            "Binary records with unrepresentable weights were skipped"
        );
    }
    EdgeList::from_edges(edges)
}

/// Writes the packed binary form with canonical `u32` weights.
pub fn write_binary(path: &Path, edges: &[Edge]) -> Result<(), SpannerError> {
    let file = File::create(path)?;
    let mut out = BufWriter::new(file);
    for e in edges {
        out.write_all(&e.src.to_le_bytes())?;
        out.write_all(&e.dest.to_le_bytes())?;
        out.write_all(&e.weight.to_le_bytes())?;
    }
    out.flush()?;
    Ok(())
}
