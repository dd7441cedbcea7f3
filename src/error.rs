//! Errors reported by the segment tree.
//!
//! Every operation validates its arguments before touching the tree,
//! so a returned error always means the tree was left unchanged.

use thiserror::Error;

/// The things that can go wrong when building or using a [`crate::SumTree`].
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Error)]
pub enum Error {
    /// The tree can't be built from an empty sequence: it would have no valid indices.
    #[error("cannot build a segment tree from an empty sequence")]
    EmptyInput,

    /// A single index was outside `0..len`.
    #[error("index {index} is out of bounds of segment tree length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// An inclusive range `from..=to` was reversed, or reached past the last index.
    #[error("range {from}..={to} is not a valid range in a segment tree of length {len}")]
    InvalidRange { from: usize, to: usize, len: usize },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[test]
fn error_messages() {
    assert_eq!(
        Error::IndexOutOfBounds { index: 7, len: 7 }.to_string(),
        "index 7 is out of bounds of segment tree length 7"
    );
    assert_eq!(
        Error::InvalidRange {
            from: 4,
            to: 2,
            len: 7
        }
        .to_string(),
        "range 4..=2 is not a valid range in a segment tree of length 7"
    );
}
