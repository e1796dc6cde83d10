//! Random sampling without replacement.

use rand::seq::SliceRandom;
use rand::Rng;

/// Pick up to `count` distinct elements of `items` in random order.
///
/// Returns `min(count, items.len())` elements; each position of the input is
/// chosen at most once.
pub fn pick_random_no_dupe<T: Clone, R: Rng + ?Sized>(
    items: &[T],
    count: usize,
    rng: &mut R,
) -> Vec<T> {
    let count = count.min(items.len());
    if count == 0 {
        return Vec::new();
    }
    let mut pool = items.to_vec();
    let (picked, _) = pool.partial_shuffle(rng, count);
    picked.to_vec()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    #[test]
    fn test_pick_returns_requested_count() {
        let mut rng = StdRng::seed_from_u64(7);
        let items: Vec<u32> = (0..20).collect();
        let picked = pick_random_no_dupe(&items, 5, &mut rng);
        assert_eq!(picked.len(), 5);
    }

    #[test]
    fn test_pick_has_no_duplicates() {
        let mut rng = StdRng::seed_from_u64(42);
        let items: Vec<u32> = (0..10).collect();
        let picked = pick_random_no_dupe(&items, 10, &mut rng);
        let unique: HashSet<_> = picked.iter().collect();
        assert_eq!(unique.len(), 10);
    }

    #[test]
    fn test_pick_caps_at_input_length() {
        let mut rng = StdRng::seed_from_u64(1);
        let picked = pick_random_no_dupe(&["a", "b", "c"], 10, &mut rng);
        assert_eq!(picked.len(), 3);
    }

    #[test]
    fn test_pick_from_empty() {
        let mut rng = StdRng::seed_from_u64(1);
        let items: Vec<u8> = Vec::new();
        assert!(pick_random_no_dupe(&items, 3, &mut rng).is_empty());
    }

    #[test]
    fn test_pick_zero() {
        let mut rng = StdRng::seed_from_u64(1);
        assert!(pick_random_no_dupe(&[1, 2, 3], 0, &mut rng).is_empty());
    }
}
