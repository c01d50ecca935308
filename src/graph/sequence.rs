//! Immutable fixed-length numeric sequences.
//!
//! A [`Sequence`] is created once from an input collection and never
//! mutated afterwards. Sequences are shared between pending sums via
//! `Rc`, which is safe precisely because they are immutable.

use serde::{Deserialize, Serialize};
use std::rc::Rc;

use super::error::CombineError;
use super::pending::{Operand, PendingSum};

/// An immutable, fixed-length, ordered list of integers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    values: Vec<i64>,
}

impl Sequence {
    /// Create a sequence by copying the input values.
    pub fn new(values: impl IntoIterator<Item = i64>) -> Self {
        Self {
            values: values.into_iter().collect(),
        }
    }

    /// Number of elements in the sequence.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if the sequence holds no elements.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// All values in order.
    pub fn values(&self) -> &[i64] {
        &self.values
    }

    /// The value at `index`, if in bounds.
    pub fn get(&self, index: usize) -> Option<i64> {
        self.values.get(index).copied()
    }

    /// The last value, if the sequence is non-empty.
    pub fn last(&self) -> Option<i64> {
        self.values.last().copied()
    }

    /// Combine this sequence with another operand into a pending sum.
    ///
    /// Combining with another sequence of equal length produces a new
    /// [`PendingSum`] over the pair. Combining with an existing pending
    /// sum accumulates into that sum's operand list instead of nesting
    /// a fresh wrapper around it, so chains of combinations always grow
    /// a single flat accumulator.
    pub fn combine(
        self: Rc<Self>,
        other: impl Into<Operand>,
    ) -> Result<PendingSum, CombineError> {
        match other.into() {
            Operand::Sequence(seq) => {
                if seq.len() != self.len() {
                    return Err(CombineError::LengthMismatch {
                        expected: self.len(),
                        found: seq.len(),
                    });
                }
                PendingSum::new(vec![Operand::Sequence(self), Operand::Sequence(seq)])
            }
            Operand::Pending(pending) => pending.combine(Operand::Sequence(self)),
        }
    }
}

impl From<Vec<i64>> for Sequence {
    fn from(values: Vec<i64>) -> Self {
        Self { values }
    }
}
