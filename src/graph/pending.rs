//! Deferred element-wise summation.
//!
//! A [`PendingSum`] accumulates any number of equal-length sequences
//! (directly, or by flattening other pending sums into itself) and
//! performs their element-wise sum in a single pass the first time a
//! result is demanded. Chaining k combinations therefore costs one
//! O(n * k) summation at first read instead of k - 1 separate O(n)
//! passes.

use std::rc::Rc;

use tracing::{debug, info};

use super::error::CombineError;
use super::sequence::Sequence;

/// A single node in a summation graph.
///
/// The operand kinds accepted by combination form a closed set, so the
/// checks the graph needs are exhaustive matches rather than runtime
/// type inspection.
#[derive(Debug, Clone)]
pub enum Operand {
    /// A leaf sequence, shared read-only.
    Sequence(Rc<Sequence>),
    /// A nested pending sum, owned by its parent.
    Pending(PendingSum),
}

impl Operand {
    /// Fixed length of the underlying sequence(s).
    pub fn len(&self) -> usize {
        match self {
            Operand::Sequence(seq) => seq.len(),
            Operand::Pending(pending) => pending.len(),
        }
    }

    /// Returns true if the operand holds no elements.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Materialize this operand as a concrete sequence, transitively
    /// evaluating nested pending sums.
    fn materialize(&mut self) -> Rc<Sequence> {
        match self {
            Operand::Sequence(seq) => Rc::clone(seq),
            Operand::Pending(pending) => pending.evaluate(),
        }
    }
}

impl From<Sequence> for Operand {
    fn from(seq: Sequence) -> Self {
        Operand::Sequence(Rc::new(seq))
    }
}

impl From<Rc<Sequence>> for Operand {
    fn from(seq: Rc<Sequence>) -> Self {
        Operand::Sequence(seq)
    }
}

impl From<PendingSum> for Operand {
    fn from(pending: PendingSum) -> Self {
        Operand::Pending(pending)
    }
}

/// A deferred sum over equal-length sequences.
///
/// The accumulator exclusively owns its operand list. [`combine`]
/// consumes and returns the same logical accumulator, so a chain of
/// combinations grows one flat operand list rather than a nested tree.
///
/// The result is computed at most once: the first [`evaluate`] call
/// runs the summation and caches the result for the accumulator's
/// remaining lifetime. Combining more operands after evaluation does
/// not invalidate the cache; later reads return the stale cached
/// result. See the crate docs for the rationale behind keeping this
/// behavior.
///
/// [`combine`]: PendingSum::combine
/// [`evaluate`]: PendingSum::evaluate
#[derive(Debug, Clone)]
pub struct PendingSum {
    nodes: Vec<Operand>,
    len: usize,
    cached: Option<Rc<Sequence>>,
    summation_runs: u32,
}

impl PendingSum {
    /// Create a pending sum over the given operands.
    ///
    /// The sum's fixed length is taken from the first operand. Fails
    /// with [`CombineError::EmptyOperands`] when the operand list is
    /// empty and with [`CombineError::LengthMismatch`] when any operand
    /// disagrees with the first operand's length.
    pub fn new(nodes: Vec<Operand>) -> Result<Self, CombineError> {
        let first = nodes.first().ok_or(CombineError::EmptyOperands)?;
        let len = first.len();

        for node in &nodes[1..] {
            if node.len() != len {
                return Err(CombineError::LengthMismatch {
                    expected: len,
                    found: node.len(),
                });
            }
        }

        Ok(Self {
            nodes,
            len,
            cached: None,
            summation_runs: 0,
        })
    }

    /// Fixed element length of this sum.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the sum's sequences hold no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of operands accumulated so far.
    pub fn operand_count(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if a result has already been computed and cached.
    pub fn is_evaluated(&self) -> bool {
        self.cached.is_some()
    }

    /// Number of times an actual summation pass has run. Stays at one
    /// across any number of [`evaluate`](PendingSum::evaluate) calls.
    pub fn summation_runs(&self) -> u32 {
        self.summation_runs
    }

    /// Fold another operand into this accumulator.
    ///
    /// Consumes and returns the same logical accumulator, enabling
    /// chained combination with `?`. A sequence operand is appended
    /// after a length check; a pending-sum operand has its operand
    /// list appended (flattened) and its own cache discarded.
    ///
    /// Combining after [`evaluate`](PendingSum::evaluate) leaves the
    /// cached result in place: the appended operand will not show up
    /// in subsequent reads.
    pub fn combine(mut self, other: impl Into<Operand>) -> Result<Self, CombineError> {
        match other.into() {
            Operand::Sequence(seq) => {
                if seq.len() != self.len {
                    return Err(CombineError::LengthMismatch {
                        expected: self.len,
                        found: seq.len(),
                    });
                }
                self.nodes.push(Operand::Sequence(seq));
            }
            Operand::Pending(pending) => {
                if pending.len() != self.len {
                    return Err(CombineError::LengthMismatch {
                        expected: self.len,
                        found: pending.len(),
                    });
                }
                // Flatten: adopt the operands, drop the other cache.
                self.nodes.extend(pending.nodes);
            }
        }

        Ok(self)
    }

    /// Materialize the element-wise sum.
    ///
    /// The first call performs a single summation pass over every
    /// operand and caches the result; every later call returns the
    /// cached sequence without recomputation. Infallible: operand
    /// lengths were checked at combination time.
    pub fn evaluate(&mut self) -> Rc<Sequence> {
        if let Some(ref cached) = self.cached {
            debug!("returning cached summation result");
            return Rc::clone(cached);
        }

        info!(
            operands = self.nodes.len(),
            length = self.len,
            "performing all the additions"
        );
        self.summation_runs += 1;

        let mut totals = vec![0i64; self.len];
        for node in &mut self.nodes {
            let seq = node.materialize();
            for (total, value) in totals.iter_mut().zip(seq.values()) {
                *total += value;
            }
        }

        let result = Rc::new(Sequence::from(totals));
        self.cached = Some(Rc::clone(&result));
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(values: impl IntoIterator<Item = i64>) -> Rc<Sequence> {
        Rc::new(Sequence::new(values))
    }

    #[test]
    fn test_new_requires_operands() {
        let err = PendingSum::new(Vec::new()).unwrap_err();
        assert_eq!(err, CombineError::EmptyOperands);
    }

    #[test]
    fn test_new_checks_lengths_against_first() {
        let err = PendingSum::new(vec![
            Operand::Sequence(seq([1, 2, 3])),
            Operand::Sequence(seq([1, 2])),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            CombineError::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_evaluate_sums_element_wise() {
        let mut pending = PendingSum::new(vec![
            Operand::Sequence(seq([1, 2, 3])),
            Operand::Sequence(seq([10, 20, 30])),
        ])
        .unwrap();

        let result = pending.evaluate();
        assert_eq!(result.values(), &[11, 22, 33]);
    }

    #[test]
    fn test_evaluate_runs_once_and_caches() {
        let mut pending = PendingSum::new(vec![
            Operand::Sequence(seq([1, 2])),
            Operand::Sequence(seq([3, 4])),
        ])
        .unwrap();
        assert!(!pending.is_evaluated());
        assert_eq!(pending.summation_runs(), 0);

        let first = pending.evaluate();
        let second = pending.evaluate();

        // Identical cached allocation, single summation pass.
        assert!(Rc::ptr_eq(&first, &second));
        assert_eq!(pending.summation_runs(), 1);
        assert!(pending.is_evaluated());
    }

    #[test]
    fn test_combine_appends_sequence() {
        let pending = PendingSum::new(vec![Operand::Sequence(seq([1, 1]))]).unwrap();
        let mut pending = pending.combine(seq([2, 2])).unwrap().combine(seq([3, 3])).unwrap();

        assert_eq!(pending.operand_count(), 3);
        assert_eq!(pending.evaluate().values(), &[6, 6]);
    }

    #[test]
    fn test_combine_rejects_length_mismatch() {
        let pending = PendingSum::new(vec![Operand::Sequence(seq([1, 2, 3]))]).unwrap();
        let err = pending.combine(seq([1, 2])).unwrap_err();
        assert_eq!(
            err,
            CombineError::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_combine_flattens_pending_sums() {
        let left = PendingSum::new(vec![
            Operand::Sequence(seq([1, 0])),
            Operand::Sequence(seq([2, 0])),
        ])
        .unwrap();
        let right = PendingSum::new(vec![
            Operand::Sequence(seq([3, 0])),
            Operand::Sequence(seq([4, 0])),
        ])
        .unwrap();

        let mut merged = left.combine(right).unwrap();
        // Flat list of four leaves, not a nested wrapper.
        assert_eq!(merged.operand_count(), 4);
        assert_eq!(merged.evaluate().values(), &[10, 0]);
    }

    #[test]
    fn test_combine_rejects_mismatched_pending_sums() {
        let left = PendingSum::new(vec![Operand::Sequence(seq([1, 2, 3]))]).unwrap();
        let right = PendingSum::new(vec![Operand::Sequence(seq([1, 2]))]).unwrap();

        let err = left.combine(right).unwrap_err();
        assert_eq!(
            err,
            CombineError::LengthMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn test_nested_pending_is_evaluated_transitively() {
        let inner = PendingSum::new(vec![
            Operand::Sequence(seq([1, 1])),
            Operand::Sequence(seq([2, 2])),
        ])
        .unwrap();

        // Build the nesting directly, bypassing the flattening path.
        let mut outer = PendingSum::new(vec![
            Operand::Pending(inner),
            Operand::Sequence(seq([10, 10])),
        ])
        .unwrap();

        assert_eq!(outer.evaluate().values(), &[13, 13]);
    }

    #[test]
    fn test_combine_after_evaluate_keeps_stale_cache() {
        let mut pending = PendingSum::new(vec![
            Operand::Sequence(seq([1, 1])),
            Operand::Sequence(seq([2, 2])),
        ])
        .unwrap();

        let before = pending.evaluate();
        assert_eq!(before.values(), &[3, 3]);

        // Appending after evaluation does not refresh the cache.
        let mut pending = pending.combine(seq([100, 100])).unwrap();
        let after = pending.evaluate();

        assert!(Rc::ptr_eq(&before, &after));
        assert_eq!(after.values(), &[3, 3]);
        assert_eq!(pending.summation_runs(), 1);
    }

    #[test]
    fn test_chained_scenario_six_long_sequences() {
        // Six sequences of 0..=200, combined in a chain. The summation
        // must run once and the final element must be 200 * 6.
        let make = || seq(0..=200);

        let pending = make().combine(make()).unwrap();
        let mut pending = pending
            .combine(make())
            .unwrap()
            .combine(make())
            .unwrap()
            .combine(make())
            .unwrap()
            .combine(make())
            .unwrap();

        assert_eq!(pending.operand_count(), 6);

        let result = pending.evaluate();
        assert_eq!(result.len(), 201);
        assert_eq!(result.last(), Some(1200));

        pending.evaluate();
        pending.evaluate();
        assert_eq!(pending.summation_runs(), 1);
    }
}
