//! A segment tree for range sums of integers.
//!
//! [`SumTree`] is built once from a sequence of integers and then supports
//! adding to single elements, adding to ranges of elements,
//! and querying sums of ranges, all without changing its shape.
//!
//! ```
//! use range_sum_tree::SumTree;
//!
//! let mut tree = SumTree::new(&[0, 3, 4, 2, 1, 6, -1])?;
//! assert_eq!(tree.sum_of_range(1, 5)?, 16);
//!
//! tree.update(3, 4)?;
//! tree.update_range(3, 5, -2)?;
//! assert_eq!(tree.sum_of_range(0, 3)?, 11);
//! # Ok::<(), range_sum_tree::Error>(())
//! ```

pub mod error;
pub mod trees;

pub use error::{Error, Result};
pub use trees::*;
