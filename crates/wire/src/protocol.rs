//! Frame primitives shared by the coordinator and the workers.
//!
//! Every frame opens with the magic tag, so a desynchronized stream is
//! caught at the next frame boundary instead of being read as data.
//! Counts are `u64` little-endian; edge payloads are the fixed 12-byte
//! records from [`crate::record`].

use std::io::{Read, Write};

use spanner_core::Edge;

use crate::error::WireError;
use crate::record;

/// Frame tag, "SPNR".
pub const MAGIC: u32 = 0x5350_4E52;

fn expect_magic<R: Read>(input: &mut R) -> Result<(), WireError> {
    let mut buf = [0u8; 4];
    input.read_exact(&mut buf)?;
    let found = u32::from_le_bytes(buf);
    if found != MAGIC {
        return Err(WireError::BadMagic {
            expected: MAGIC,
            found,
        });
    }
    Ok(())
}

/// Writes a count frame: `[MAGIC][count: u64]`.
pub fn write_count<W: Write>(output: &mut W, count: u64) -> Result<(), WireError> {
    output.write_all(&MAGIC.to_le_bytes())?;
    output.write_all(&count.to_le_bytes())?;
    output.flush()?;
    Ok(())
}

pub fn read_count<R: Read>(input: &mut R) -> Result<u64, WireError> {
    expect_magic(input)?;
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf)?;
    Ok(u64::from_le_bytes(buf))
}

/// Writes an edge-slice frame: `[MAGIC][len: u64][len records]`.
pub fn write_edges<W: Write>(output: &mut W, edges: &[Edge]) -> Result<(), WireError> {
    output.write_all(&MAGIC.to_le_bytes())?;
    output.write_all(&(edges.len() as u64).to_le_bytes())?;
    output.write_all(&record::encode_all(edges))?;
    output.flush()?;
    Ok(())
}

pub fn read_edges<R: Read>(input: &mut R) -> Result<Vec<Edge>, WireError> {
    expect_magic(input)?;
    let mut buf = [0u8; 8];
    input.read_exact(&mut buf)?;
    let len = u64::from_le_bytes(buf) as usize;
    let mut bytes = vec![0u8; len * record::RECORD_SIZE];
    input.read_exact(&mut bytes)?;
    record::decode_all(&bytes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn count_frame_round_trip() {
        let mut buf = Vec::new();
        write_count(&mut buf, 1234).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_count(&mut cursor).unwrap(), 1234);
    }

    #[test]
    fn edges_frame_round_trip() {
        let edges = vec![Edge::new(0, 1, 5), Edge::new(2, 3, 7)];
        let mut buf = Vec::new();
        write_edges(&mut buf, &edges).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_edges(&mut cursor).unwrap(), edges);
    }

    #[test]
    fn empty_edges_frame_round_trip() {
        let mut buf = Vec::new();
        write_edges(&mut buf, &[]).unwrap();
        let mut cursor = Cursor::new(buf);
        assert!(read_edges(&mut cursor).unwrap().is_empty());
    }

    #[test]
    fn sequential_frames_read_in_order() {
        let mut buf = Vec::new();
        write_count(&mut buf, 2).unwrap();
        write_edges(&mut buf, &[Edge::new(0, 1, 1), Edge::new(1, 2, 2)]).unwrap();
        let mut cursor = Cursor::new(buf);
        assert_eq!(read_count(&mut cursor).unwrap(), 2);
        assert_eq!(read_edges(&mut cursor).unwrap().len(), 2);
    }

    #[test]
    fn wrong_magic_is_rejected() {
        let mut buf = Vec::new();
        buf.extend_from_slice(&0xDEAD_BEEFu32.to_le_bytes());
        buf.extend_from_slice(&0u64.to_le_bytes());
        let mut cursor = Cursor::new(buf);
        match read_count(&mut cursor) {
            Err(WireError::BadMagic { expected, found }) => {
                assert_eq!(expected, MAGIC);
                assert_eq!(found, 0xDEAD_BEEF);
            }
            other => panic!("expected BadMagic, got {other:?}"),
        }
    }

    #[test]
    fn truncated_frame_is_an_io_error() {
        let mut buf = Vec::new();
        write_edges(&mut buf, &[Edge::new(0, 1, 5)]).unwrap();
        buf.truncate(buf.len() - 3);
        let mut cursor = Cursor::new(buf);
        assert!(matches!(read_edges(&mut cursor), Err(WireError::Io(_))));
    }
}
