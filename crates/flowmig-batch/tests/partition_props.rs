//! Property tests for instance partitioning

use flowmig_batch::partition;
use proptest::prelude::*;
use std::collections::HashSet;

proptest! {
    #[test]
    fn chunks_cover_input_and_are_disjoint(
        count in 0usize..500,
        chunk_size in 1usize..64,
    ) {
        let input: Vec<String> = (0..count).map(|i| format!("inst-{i}")).collect();
        let chunks = partition(&input, chunk_size);

        // union equals the original set
        let flattened: Vec<&String> = chunks.iter().flatten().collect();
        prop_assert_eq!(flattened.len(), input.len());

        // pairwise disjoint (ids are unique, so a set catches overlap)
        let unique: HashSet<&String> = flattened.iter().copied().collect();
        prop_assert_eq!(unique.len(), input.len());

        // order is preserved
        let reassembled: Vec<String> = chunks.concat();
        prop_assert_eq!(reassembled, input);
    }

    #[test]
    fn every_chunk_except_last_is_full(
        count in 1usize..500,
        chunk_size in 1usize..64,
    ) {
        let input: Vec<String> = (0..count).map(|i| format!("inst-{i}")).collect();
        let chunks = partition(&input, chunk_size);

        prop_assert_eq!(chunks.len(), count.div_ceil(chunk_size));
        for chunk in &chunks[..chunks.len() - 1] {
            prop_assert_eq!(chunk.len(), chunk_size);
        }
        prop_assert!(!chunks.last().unwrap().is_empty());
    }
}
