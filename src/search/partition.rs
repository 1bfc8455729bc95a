//! Splitting the root listing into chunks for parallel workers

use rand::Rng;

/// Pick how many chunks `len` items are split into.
///
/// The count is drawn uniformly from `[1, ceil(len / 2))`. When that range
/// is empty (three items or fewer) exactly one chunk is used, and zero items
/// give zero chunks.
pub fn chunk_count<R: Rng>(len: usize, rng: &mut R) -> usize {
    if len == 0 {
        return 0;
    }
    let upper = len.div_ceil(2);
    if upper <= 1 {
        1
    } else {
        rng.random_range(1..upper)
    }
}

/// Split `items` into contiguous chunks of a fixed size `ceil(len / count)`.
///
/// Concatenating the chunks in order gives back the input. The last chunk
/// is shorter when the length does not divide evenly.
pub fn partition<T, R: Rng>(items: Vec<T>, rng: &mut R) -> Vec<Vec<T>> {
    let count = chunk_count(items.len(), rng);
    if count == 0 {
        return Vec::new();
    }
    let size = items.len().div_ceil(count);

    let mut chunks = Vec::with_capacity(count);
    let mut items = items.into_iter().peekable();
    while items.peek().is_some() {
        chunks.push(items.by_ref().take(size).collect());
    }
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_empty_input_gives_no_chunks() {
        let mut rng = StdRng::seed_from_u64(1);
        let chunks: Vec<Vec<u32>> = partition(Vec::new(), &mut rng);
        assert!(chunks.is_empty());
    }

    #[test]
    fn test_small_inputs_give_one_chunk() {
        let mut rng = StdRng::seed_from_u64(1);
        for len in 1..=3 {
            let items: Vec<usize> = (0..len).collect();
            let chunks = partition(items.clone(), &mut rng);
            assert_eq!(chunks, vec![items], "len {}", len);
        }
    }

    #[test]
    fn test_chunks_reassemble_input() {
        for seed in 0..50 {
            let mut rng = StdRng::seed_from_u64(seed);
            for len in 1..40usize {
                let items: Vec<usize> = (0..len).collect();
                let chunks = partition(items.clone(), &mut rng);

                assert!(!chunks.is_empty());
                assert!(chunks.len() <= len);
                assert!(chunks.iter().all(|c| !c.is_empty()));
                let joined: Vec<usize> = chunks.into_iter().flatten().collect();
                assert_eq!(joined, items);
            }
        }
    }

    #[test]
    fn test_chunk_count_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..200 {
            let count = chunk_count(20, &mut rng);
            assert!((1..10).contains(&count), "count {}", count);
        }
    }

    #[test]
    fn test_chunks_share_a_size_except_the_last() {
        let mut rng = StdRng::seed_from_u64(3);
        let chunks = partition((0..101).collect::<Vec<u32>>(), &mut rng);
        let size = chunks[0].len();
        for chunk in &chunks[..chunks.len() - 1] {
            assert_eq!(chunk.len(), size);
        }
        assert!(chunks.last().unwrap().len() <= size);
    }
}
