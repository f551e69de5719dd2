//! Fixed-size binary edge records for the worker exchange.

use spanner_core::Edge;

use crate::error::WireError;

/// Bytes per record: `src u32 LE, dest u32 LE, weight u32 LE`.
pub const RECORD_SIZE: usize = 12;

pub fn encode(edge: &Edge) -> [u8; RECORD_SIZE] {
    let mut buf = [0u8; RECORD_SIZE];
    buf[0..4].copy_from_slice(&edge.src.to_le_bytes());
    buf[4..8].copy_from_slice(&edge.dest.to_le_bytes());
    buf[8..12].copy_from_slice(&edge.weight.to_le_bytes());
    buf
}

pub fn decode(buf: &[u8; RECORD_SIZE]) -> Edge {
    Edge::new(
        u32::from_le_bytes(buf[0..4].try_into().unwrap()),
        u32::from_le_bytes(buf[4..8].try_into().unwrap()),
        u32::from_le_bytes(buf[8..12].try_into().unwrap()),
    )
}

/// Packs a whole slice back to back, no padding, no header.
pub fn encode_all(edges: &[Edge]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(edges.len() * RECORD_SIZE);
    for edge in edges {
        bytes.extend_from_slice(&encode(edge));
    }
    bytes
}

/// Unpacks a back-to-back record buffer. Unlike file ingestion, a partial
/// trailing record here means a corrupt frame and is fatal.
pub fn decode_all(bytes: &[u8]) -> Result<Vec<Edge>, WireError> {
    if bytes.len() % RECORD_SIZE != 0 {
        return Err(WireError::Frame(format!(
            "payload of {} bytes is not a whole number of {RECORD_SIZE}-byte records",
            bytes.len()
        )));
    }
    let mut edges = Vec::with_capacity(bytes.len() / RECORD_SIZE);
    for chunk in bytes.chunks_exact(RECORD_SIZE) {
        // chunks_exact guarantees the length.
        edges.push(decode(chunk.try_into().unwrap()));
    }
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_layout_is_twelve_little_endian_bytes() {
        let bytes = encode(&Edge::new(1, 2, 0x01020304));
        assert_eq!(bytes.len(), RECORD_SIZE);
        assert_eq!(&bytes[0..4], &[1, 0, 0, 0]);
        assert_eq!(&bytes[4..8], &[2, 0, 0, 0]);
        assert_eq!(&bytes[8..12], &[0x04, 0x03, 0x02, 0x01]);
    }

    #[test]
    fn encode_decode_round_trip() {
        let edge = Edge::new(7, 9, 1000);
        assert_eq!(decode(&encode(&edge)), edge);
    }

    #[test]
    fn bulk_round_trip_preserves_order() {
        let edges = vec![
            Edge::new(0, 1, 3),
            Edge::new(4, 2, 1),
            Edge::new(9, 9, u32::MAX - 1),
        ];
        let bytes = encode_all(&edges);
        assert_eq!(bytes.len(), edges.len() * RECORD_SIZE);
        assert_eq!(decode_all(&bytes).unwrap(), edges);
    }

    #[test]
    fn partial_payload_is_a_frame_error() {
        let mut bytes = encode_all(&[Edge::new(0, 1, 2)]);
        bytes.pop();
        assert!(matches!(decode_all(&bytes), Err(WireError::Frame(_))));
    }

    #[test]
    fn empty_payload_is_an_empty_slice() {
        assert!(decode_all(&[]).unwrap().is_empty());
    }
}
