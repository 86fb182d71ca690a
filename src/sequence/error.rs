use thiserror::Error;

/// The failure kinds of the bounded [`Sequence`](crate::Sequence) operations.
///
/// Errors are returned synchronously by the violating call; the sequence is
/// never mutated before an error is produced, so its structural invariants
/// hold both immediately before and immediately after a failed call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SequenceError {
    /// A position (or, for `erase`, `position + count`) fell outside the
    /// currently valid index space.
    #[error("position {position} out of range for sequence of length {len}")]
    OutOfRange {
        /// The offending position argument.
        position: usize,
        /// The sequence length at the time of the call.
        len: usize,
    },

    /// An operation that needs at least one element was invoked on an empty
    /// sequence.
    #[error("sequence is empty")]
    Empty,
}
