//! Addressing of the implicit tree.
//!
//! The tree is never stored as linked nodes. A node is just a position in the
//! backing vector, together with the inclusive range of indices it covers.
//! The root is at position `0` and covers `0..=len-1`,
//! and the children of the node at `pos` are at `2*pos + 1` and `2*pos + 2`.

/// How a queried range relates to the range a node covers.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Overlap {
    /// The node's range is fully inside the queried range.
    Total,
    /// The ranges share some indices, but not all of the node's.
    Partial,
    /// The ranges don't intersect.
    Disjoint,
}
use Overlap::*;

/// A node of the implicit tree: its position in storage and the inclusive
/// index range `low..=high` it covers.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct NodeRange {
    pub pos: usize,
    pub low: usize,
    pub high: usize,
}

impl NodeRange {
    /// The root of a tree with `len` leaves. `len` must be positive.
    pub fn root(len: usize) -> Self {
        debug_assert!(len > 0);
        NodeRange {
            pos: 0,
            low: 0,
            high: len - 1,
        }
    }

    /// The last index of the left half. Equal to `(low + high) / 2`,
    /// computed without overflowing.
    pub fn mid(&self) -> usize {
        self.low + (self.high - self.low) / 2
    }

    pub fn is_leaf(&self) -> bool {
        self.low == self.high
    }

    /// The left child, covering `low..=mid`.
    pub fn left(&self) -> Self {
        NodeRange {
            pos: 2 * self.pos + 1,
            low: self.low,
            high: self.mid(),
        }
    }

    /// The right child, covering `mid+1..=high`.
    pub fn right(&self) -> Self {
        NodeRange {
            pos: 2 * self.pos + 2,
            low: self.mid() + 1,
            high: self.high,
        }
    }

    /// Classifies the inclusive range `from..=to` against this node.
    pub fn overlap(&self, from: usize, to: usize) -> Overlap {
        if from <= self.low && to >= self.high {
            Total
        } else if from > self.high || to < self.low {
            Disjoint
        } else {
            Partial
        }
    }

    /// The child whose range contains `index`. The node must not be a leaf.
    pub fn child_containing(&self, index: usize) -> Self {
        debug_assert!(!self.is_leaf());
        if index <= self.mid() {
            self.left()
        } else {
            self.right()
        }
    }
}
