//! The range sum segment tree.
//!
//! All walks over the tree are done with an explicit stack of [`NodeRange`]s,
//! so the call stack depth doesn't depend on the size of the tree.

use std::ops::{Bound, RangeBounds};

use log::{debug, trace};

use super::node::{NodeRange, Overlap::*};
use super::{next_power_of_two, Value};
use crate::error::{Error, Result};

/// A segment tree answering sums of contiguous ranges of integers,
/// under additive updates of single elements or of ranges.
///
/// The tree is built once from a sequence and its shape never changes afterwards:
/// elements can't be inserted or removed.
///
/// The nodes live in one vector of length `2 * next_power_of_two(len) - 1`,
/// where the node at position `i` has its children at `2*i + 1` and `2*i + 2`.
/// Every internal node holds the sum of its two children.
///
/// Arithmetic wraps around on overflow, like the primitive integer operations
/// without overflow checks. Sums are therefore exact modulo `2^64`, and an update
/// never panics halfway through.
///
/// Indices and ranges are checked on every call, and an invalid call returns
/// an [`Error`] before anything is modified.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct SumTree {
    storage: Vec<Value>,
    len: usize,
}

impl SumTree {
    /// Builds a tree holding a copy of `values`.
    /// Fails with [`Error::EmptyInput`] if `values` is empty.
    ///
    /// O(N)
    pub fn new(values: &[Value]) -> Result<Self> {
        if values.is_empty() {
            debug!("refusing to build a segment tree from an empty sequence");
            return Err(Error::EmptyInput);
        }

        let len = values.len();
        let size = 2 * next_power_of_two(len) - 1;
        let mut tree = SumTree {
            storage: vec![0; size],
            len,
        };
        tree.walk_and_rebuild(0, len - 1, |index, leaf| *leaf = values[index]);
        debug!("built segment tree of {} leaves in {} slots", len, size);
        Ok(tree)
    }

    /// The number of elements in the tree. Always positive.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// The sum of all the elements. O(1)
    pub fn total(&self) -> Value {
        self.storage[0]
    }

    /// Adds `delta` to the element at `index`, and recalculates its ancestors.
    ///
    /// O(log N)
    pub fn update(&mut self, index: usize, delta: Value) -> Result<()> {
        self.check_index(index)?;
        trace!("adding {} at index {}", delta, index);

        let pos = self.leaf_position(index);
        self.storage[pos] = self.storage[pos].wrapping_add(delta);
        self.rebuild_ancestors(pos);
        Ok(())
    }

    /// Adds `delta` to every element in `from..=to`.
    ///
    /// Every leaf in the range is visited and updated separately, and then its
    /// ancestors are re-summed. This takes time proportional to the length of the range.
    pub fn update_range(&mut self, from: usize, to: usize, delta: Value) -> Result<()> {
        self.check_range(from, to)?;
        trace!("adding {} on range {}..={}", delta, from, to);

        self.walk_and_rebuild(from, to, |_, leaf| *leaf = leaf.wrapping_add(delta));
        Ok(())
    }

    /// Returns the sum of the elements in `from..=to`.
    ///
    /// Nodes that are fully inside the range contribute their stored sum,
    /// nodes outside of it contribute nothing, and only nodes partially
    /// overlapping the range are descended into.
    ///
    /// O(log N)
    pub fn sum_of_range(&self, from: usize, to: usize) -> Result<Value> {
        self.check_range(from, to)?;

        let mut sum: Value = 0;
        let mut stack = Vec::with_capacity(self.stack_capacity());
        stack.push(NodeRange::root(self.len));
        while let Some(node) = stack.pop() {
            match node.overlap(from, to) {
                Total => sum = sum.wrapping_add(self.storage[node.pos]),
                Disjoint => (),
                Partial => {
                    stack.push(node.right());
                    stack.push(node.left());
                }
            }
        }

        trace!("sum of range {}..={} is {}", from, to, sum);
        Ok(sum)
    }

    /// Returns the element at `index`.
    /// O(log N)
    pub fn get(&self, index: usize) -> Result<Value> {
        self.check_index(index)?;
        Ok(self.storage[self.leaf_position(index)])
    }

    /// Sets the element at `index` to `value`, and recalculates.
    /// O(log N)
    pub fn set(&mut self, index: usize, value: Value) -> Result<()> {
        let prev = self.get(index)?;
        self.update(index, value.wrapping_sub(prev))
    }

    /// Returns the sum of the elements in `range`. An empty range sums to `0`.
    ///
    /// ```
    /// use range_sum_tree::SumTree;
    ///
    /// let tree = SumTree::new(&[0, 3, 4, 2, 1, 6, -1]).unwrap();
    /// assert_eq!(tree.sum(1..=5), Ok(16));
    /// assert_eq!(tree.sum(..4), Ok(9));
    /// assert_eq!(tree.sum(4..4), Ok(0));
    /// assert!(tree.sum(3..9).is_err());
    /// ```
    pub fn sum<R: RangeBounds<usize>>(&self, range: R) -> Result<Value> {
        match self.inclusive_bounds(&range)? {
            Some((from, to)) => self.sum_of_range(from, to),
            None => Ok(0),
        }
    }

    /// Adds `delta` to every element in `range`. Does nothing if the range is empty.
    ///
    /// See [`SumTree::update_range`].
    pub fn add_to_range<R: RangeBounds<usize>>(&mut self, range: R, delta: Value) -> Result<()> {
        match self.inclusive_bounds(&range)? {
            Some((from, to)) => self.update_range(from, to, delta),
            None => Ok(()),
        }
    }

    /// The current elements, in order.
    /// O(N)
    pub fn values(&self) -> Vec<Value> {
        let mut res = Vec::with_capacity(self.len);
        let mut stack = Vec::with_capacity(self.stack_capacity());
        stack.push(NodeRange::root(self.len));
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                res.push(self.storage[node.pos]);
            } else {
                stack.push(node.right());
                stack.push(node.left());
            }
        }
        res
    }

    /// Used for debugging. Panics if some internal node isn't the sum of its children.
    pub fn assert_correctness(&self) {
        assert_eq!(self.storage.len(), 2 * next_power_of_two(self.len) - 1);
        let mut stack = vec![NodeRange::root(self.len)];
        while let Some(node) = stack.pop() {
            if node.is_leaf() {
                continue;
            }
            let (left, right) = (node.left(), node.right());
            assert_eq!(
                self.storage[node.pos],
                self.storage[left.pos].wrapping_add(self.storage[right.pos]),
                "node at position {} covering {}..={} is not the sum of its children",
                node.pos,
                node.low,
                node.high
            );
            stack.push(right);
            stack.push(left);
        }
    }

    /// Visits every node intersecting `from..=to` in post order.
    /// Leaves are handed to `on_leaf` along with their index,
    /// and internal nodes are re-summed after both of their children.
    fn walk_and_rebuild<F>(&mut self, from: usize, to: usize, mut on_leaf: F)
    where
        F: FnMut(usize, &mut Value),
    {
        // the flag is set when the node's children were already handled
        let mut stack = Vec::with_capacity(2 * self.stack_capacity());
        stack.push((NodeRange::root(self.len), false));
        while let Some((node, children_done)) = stack.pop() {
            if node.overlap(from, to) == Disjoint {
                continue;
            }
            if node.is_leaf() {
                on_leaf(node.low, &mut self.storage[node.pos]);
            } else if children_done {
                self.rebuild(node.pos);
            } else {
                stack.push((node, true));
                stack.push((node.right(), false));
                stack.push((node.left(), false));
            }
        }
    }

    /// The storage position of the leaf holding `index`. `index` must be valid.
    fn leaf_position(&self, index: usize) -> usize {
        let mut node = NodeRange::root(self.len);
        while !node.is_leaf() {
            node = node.child_containing(index);
        }
        debug_assert_eq!(node.low, index);
        node.pos
    }

    /// Enough room for the stack of any walk that pushes both children of each
    /// node it expands and pops one node at a time.
    fn stack_capacity(&self) -> usize {
        2 * (next_power_of_two(self.len).trailing_zeros() as usize + 1)
    }

    fn rebuild(&mut self, pos: usize) {
        self.storage[pos] = self.storage[2 * pos + 1].wrapping_add(self.storage[2 * pos + 2]);
    }

    /// Re-sums every node on the path from `pos` up to the root, excluding `pos`.
    fn rebuild_ancestors(&mut self, mut pos: usize) {
        while pos > 0 {
            pos = (pos - 1) / 2;
            self.rebuild(pos);
        }
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index < self.len {
            Ok(())
        } else {
            let err = Error::IndexOutOfBounds {
                index,
                len: self.len,
            };
            debug!("{}", err);
            Err(err)
        }
    }

    fn check_range(&self, from: usize, to: usize) -> Result<()> {
        if from <= to && to < self.len {
            Ok(())
        } else {
            let err = Error::InvalidRange {
                from,
                to,
                len: self.len,
            };
            debug!("{}", err);
            Err(err)
        }
    }

    /// Converts a rust range into inclusive bounds, or `None` if it is empty.
    fn inclusive_bounds<R: RangeBounds<usize>>(&self, range: &R) -> Result<Option<(usize, usize)>> {
        let start = match range.start_bound() {
            Bound::Included(&s) => Some(s),
            Bound::Excluded(&s) => s.checked_add(1),
            Bound::Unbounded => Some(0),
        };
        // exclusive
        let end = match range.end_bound() {
            Bound::Included(&e) => e.checked_add(1),
            Bound::Excluded(&e) => Some(e),
            Bound::Unbounded => Some(self.len),
        };

        match (start, end) {
            (Some(start), Some(end)) if start == end && end <= self.len => Ok(None),
            (Some(start), Some(end)) if start < end && end <= self.len => Ok(Some((start, end - 1))),
            _ => {
                let err = Error::InvalidRange {
                    from: start.unwrap_or(usize::MAX),
                    to: end.map_or(usize::MAX, |e| e.saturating_sub(1)),
                    len: self.len,
                };
                debug!("{}", err);
                Err(err)
            }
        }
    }
}

impl TryFrom<&[Value]> for SumTree {
    type Error = Error;

    fn try_from(values: &[Value]) -> Result<Self> {
        SumTree::new(values)
    }
}

impl TryFrom<Vec<Value>> for SumTree {
    type Error = Error;

    fn try_from(values: Vec<Value>) -> Result<Self> {
        SumTree::new(&values)
    }
}

#[test]
fn reference_scenario() {
    let mut tree = SumTree::new(&[0, 3, 4, 2, 1, 6, -1]).unwrap();
    assert_eq!(tree.sum_of_range(0, 3), Ok(9));
    assert_eq!(tree.sum_of_range(1, 5), Ok(16));
    assert_eq!(tree.sum_of_range(1, 6), Ok(15));

    tree.update(3, 4).unwrap();
    assert_eq!(tree.values(), vec![0, 3, 4, 6, 1, 6, -1]);
    assert_eq!(tree.sum_of_range(1, 3), Ok(13));

    tree.update_range(3, 5, -2).unwrap();
    assert_eq!(tree.values(), vec![0, 3, 4, 4, -1, 4, -1]);
    assert_eq!(tree.sum_of_range(1, 5), Ok(14));
    assert_eq!(tree.sum_of_range(0, 3), Ok(11));
    tree.assert_correctness();
}

#[test]
fn storage_size() {
    for (len, size) in [(1, 1), (2, 3), (3, 7), (4, 7), (5, 15), (7, 15), (8, 15), (9, 31)] {
        let values: Vec<Value> = (0..len as Value).collect();
        let tree = SumTree::new(&values).unwrap();
        assert_eq!(tree.storage.len(), size);
        assert_eq!(tree.len(), len);
        tree.assert_correctness();
    }
}

#[test]
fn single_element() {
    let mut tree = SumTree::new(&[5]).unwrap();
    assert_eq!(tree.total(), 5);
    tree.update(0, -7).unwrap();
    tree.update_range(0, 0, 3).unwrap();
    assert_eq!(tree.sum_of_range(0, 0), Ok(1));
    assert_eq!(tree.get(0), Ok(1));
    assert_eq!(tree.update(1, 1), Err(Error::IndexOutOfBounds { index: 1, len: 1 }));
}

#[test]
fn empty_input() {
    assert_eq!(SumTree::new(&[]), Err(Error::EmptyInput));
    assert_eq!(SumTree::try_from(Vec::<Value>::new()), Err(Error::EmptyInput));
}

#[test]
fn invalid_arguments_leave_the_tree_unchanged() {
    let mut tree = SumTree::new(&[1, 2, 3, 4, 5]).unwrap();
    let before = tree.clone();

    assert_eq!(tree.update(5, 1), Err(Error::IndexOutOfBounds { index: 5, len: 5 }));
    assert_eq!(
        tree.update_range(3, 2, 1),
        Err(Error::InvalidRange { from: 3, to: 2, len: 5 })
    );
    assert_eq!(
        tree.update_range(0, 5, 1),
        Err(Error::InvalidRange { from: 0, to: 5, len: 5 })
    );
    assert_eq!(
        tree.sum_of_range(4, 1),
        Err(Error::InvalidRange { from: 4, to: 1, len: 5 })
    );
    assert!(tree.set(9, 0).is_err());
    assert!(tree.add_to_range(2..7, 1).is_err());
    assert_eq!(tree, before);
}

#[test]
fn rust_ranges() {
    use std::ops::Bound::*;

    let mut tree = SumTree::try_from(vec![0, 3, 4, 2, 1, 6, -1]).unwrap();
    assert_eq!(tree.sum(..), Ok(15));
    assert_eq!(tree.sum(1..6), Ok(16));
    assert_eq!(tree.sum(7..), Ok(0));
    assert_eq!(tree.sum((Excluded(0), Included(3))), Ok(9));
    assert_eq!(
        tree.sum(..=usize::MAX),
        Err(Error::InvalidRange { from: 0, to: usize::MAX, len: 7 })
    );
    assert_eq!(
        tree.sum(5..2),
        Err(Error::InvalidRange { from: 5, to: 1, len: 7 })
    );

    tree.add_to_range(3..3, 100).unwrap();
    tree.add_to_range(3..=5, -2).unwrap();
    assert_eq!(tree.values(), vec![0, 3, 4, 0, -1, 4, -1]);
    tree.set(3, 2).unwrap();
    assert_eq!(tree.total(), 11);
}

#[test]
fn sums_wrap_around_near_the_limits() {
    let mut tree = SumTree::new(&[Value::MAX - 1, 0, 0, 0]).unwrap();

    tree.update(1, 5).unwrap();
    tree.assert_correctness();
    assert_eq!(tree.values(), vec![Value::MAX - 1, 5, 0, 0]);
    assert_eq!(tree.sum_of_range(0, 1), Ok(Value::MIN + 3));
    assert_eq!(tree.total(), Value::MIN + 3);

    tree.update_range(0, 3, 2).unwrap();
    tree.assert_correctness();
    assert_eq!(tree.values(), vec![Value::MIN, 7, 2, 2]);

    tree.set(2, Value::MIN).unwrap();
    tree.assert_correctness();
    assert_eq!(tree.get(2), Ok(Value::MIN));
    assert_eq!(tree.sum_of_range(1, 3), Ok(Value::MIN + 9));
    assert_eq!(
        tree.sum_of_range(0, 1)
            .unwrap()
            .wrapping_add(tree.sum_of_range(2, 3).unwrap()),
        tree.total()
    );

    tree.update(3, Value::MIN).unwrap();
    tree.assert_correctness();
    assert_eq!(tree.get(3), Ok(Value::MIN + 2));
}

#[test]
fn leaf_positions_match_indices() {
    for len in 1..40 {
        let values: Vec<Value> = (0..len as Value).collect();
        let tree = SumTree::new(&values).unwrap();
        for index in 0..len {
            assert_eq!(tree.storage[tree.leaf_position(index)], index as Value);
        }
        assert!(tree.stack_capacity() >= 2);
    }
}
