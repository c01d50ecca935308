//! Error types for graph construction and combination.
//!
//! All errors are raised synchronously at combination or construction
//! time. Evaluation itself is infallible because every consistency
//! check has already run by the time a graph can be evaluated.

use thiserror::Error;

/// Errors produced while building or combining a summation graph.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CombineError {
    /// A pending sum was constructed with an empty operand list.
    #[error("a pending sum requires at least one operand")]
    EmptyOperands,

    /// Two operands of differing fixed lengths were combined.
    #[error("cannot combine sequences of length {expected} and {found}")]
    LengthMismatch {
        /// Length fixed by the first operand.
        expected: usize,
        /// Length of the rejected operand.
        found: usize,
    },

    /// A plan term was neither a sequence nor a nested sum.
    #[error("unsupported operand kind: {kind} (expected a sequence or a nested sum)")]
    UnsupportedOperand {
        /// Human-readable description of the rejected term.
        kind: String,
    },
}
