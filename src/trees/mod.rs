//! Segment trees over integers, stored in a single allocation.
//!
//! See [`SumTree`].

pub mod node;
pub mod sum_tree;

pub use node::{NodeRange, Overlap};
pub use sum_tree::*;

/// The element type stored in the trees.
pub type Value = i64;

/// Returns the smallest power of two that is at least `n`.
/// If `n` is already a power of two, returns `n` itself.
///
/// `next_power_of_two(0)` wraps around to `0`.
pub fn next_power_of_two(n: usize) -> usize {
    // subtracting first keeps exact powers of two from being doubled
    let mut n = n.wrapping_sub(1);
    let mut shift = 1;
    while shift < usize::BITS {
        n |= n >> shift;
        shift <<= 1;
    }
    n.wrapping_add(1)
}

#[test]
fn powers_of_two() {
    let expected = [
        (0, 0),
        (1, 1),
        (2, 2),
        (3, 4),
        (4, 4),
        (5, 8),
        (7, 8),
        (8, 8),
        (9, 16),
        (1000, 1024),
        (1 << 40, 1 << 40),
        ((1 << 40) + 1, 1 << 41),
    ];
    for (n, power) in expected {
        assert_eq!(next_power_of_two(n), power, "next power of two of {n}");
    }
    for n in 1..5000usize {
        assert_eq!(next_power_of_two(n), n.next_power_of_two());
    }
}
