//! Contiguous range splitting shared by vertex partitioning, per-worker
//! scan ranges, and the distributed slice plan.

use std::ops::Range;

/// Half-open sub-range `index` of `[0, total)` split into `parts`
/// contiguous chunks.
///
/// The first `total % parts` chunks are one element larger, so chunk
/// sizes differ by at most one and every element lands in exactly one
/// chunk. `parts` must be non-zero and `index < parts`.
pub fn chunk_range(total: usize, parts: usize, index: usize) -> Range<usize> {
    let base = total / parts;
    let extra = total % parts;
    let start = index * base + index.min(extra);
    let len = base + usize::from(index < extra);
    start..start + len
}

/// Sizes of all `parts` chunks, in order.
pub fn chunk_sizes(total: usize, parts: usize) -> Vec<usize> {
    (0..parts).map(|i| chunk_range(total, parts, i).len()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_into_three_is_4_3_3() {
        assert_eq!(chunk_sizes(10, 3), vec![4, 3, 3]);
        assert_eq!(chunk_range(10, 3, 0), 0..4);
        assert_eq!(chunk_range(10, 3, 1), 4..7);
        assert_eq!(chunk_range(10, 3, 2), 7..10);
    }

    #[test]
    fn even_split_has_equal_chunks() {
        assert_eq!(chunk_sizes(9, 3), vec![3, 3, 3]);
    }

    #[test]
    fn chunks_cover_everything_once() {
        for total in 0..40 {
            for parts in 1..=8 {
                let mut covered = Vec::new();
                for i in 0..parts {
                    covered.extend(chunk_range(total, parts, i));
                }
                assert_eq!(covered, (0..total).collect::<Vec<_>>());
            }
        }
    }

    #[test]
    fn sizes_differ_by_at_most_one() {
        for total in 0..40 {
            for parts in 1..=8 {
                let sizes = chunk_sizes(total, parts);
                let min = sizes.iter().min().unwrap();
                let max = sizes.iter().max().unwrap();
                assert!(max - min <= 1, "total={total} parts={parts}");
            }
        }
    }

    #[test]
    fn more_parts_than_elements_leaves_empty_tails() {
        assert_eq!(chunk_sizes(2, 4), vec![1, 1, 0, 0]);
        assert_eq!(chunk_range(2, 4, 3), 2..2);
    }
}
