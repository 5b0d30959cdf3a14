//! Deterministic instance partitioning
//!
//! Chunk size comes from configuration, never from plan size. Given
//! the same instance ordering and chunk size the output is identical,
//! chunks are pairwise disjoint, and their union is the input.

/// Split instance ids into fixed-size chunks
///
/// A `chunk_size` of zero is treated as one so partitioning always
/// makes progress.
#[must_use]
pub fn partition(instance_ids: &[String], chunk_size: usize) -> Vec<Vec<String>> {
    let chunk_size = chunk_size.max(1);
    instance_ids
        .chunks(chunk_size)
        .map(<[String]>::to_vec)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("inst-{i}")).collect()
    }

    #[test]
    fn exact_division() {
        let chunks = partition(&ids(1000), 100);
        assert_eq!(chunks.len(), 10);
        assert!(chunks.iter().all(|c| c.len() == 100));
    }

    #[test]
    fn remainder_lands_in_last_chunk() {
        let chunks = partition(&ids(105), 50);
        assert_eq!(chunks.len(), 3);
        assert_eq!(chunks[2].len(), 5);
    }

    #[test]
    fn empty_input_yields_no_chunks() {
        let chunks = partition(&[], 10);
        assert!(chunks.is_empty());
    }

    #[test]
    fn zero_chunk_size_is_clamped() {
        let chunks = partition(&ids(3), 0);
        assert_eq!(chunks.len(), 3);
    }

    #[test]
    fn partitioning_is_deterministic() {
        let input = ids(37);
        assert_eq!(partition(&input, 8), partition(&input, 8));
    }
}
