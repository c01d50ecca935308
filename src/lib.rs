//! Sumfold - deferred element-wise summation over fixed-length
//! numeric sequences.
//!
//! The core of the crate is a lazy aggregation graph: immutable
//! [`Sequence`](graph::Sequence) leaves are folded into a
//! [`PendingSum`](graph::PendingSum) accumulator that defers all
//! additions until a result is demanded, then performs them in a
//! single pass and caches the result. Folding k sequences of length n
//! costs one O(n * k) summation at first read instead of k - 1
//! intermediate allocations and passes.
//!
//! ```
//! use std::rc::Rc;
//! use sumfold::graph::Sequence;
//!
//! let a = Rc::new(Sequence::new([1, 2, 3]));
//! let b = Sequence::new([10, 20, 30]);
//! let c = Sequence::new([100, 200, 300]);
//!
//! let mut sum = a.combine(b).unwrap().combine(c).unwrap();
//! assert_eq!(sum.evaluate().values(), &[111, 222, 333]);
//! assert_eq!(sum.summation_runs(), 1);
//! ```
//!
//! # Caching contract
//!
//! A pending sum is meant to be fully built before its first read.
//! The first `evaluate` call caches the result for the accumulator's
//! remaining lifetime, and combining further operands afterwards does
//! not invalidate that cache: later reads return the stale cached
//! result. `PendingSum::is_evaluated` lets callers detect the state
//! before combining if they need to.
//!
//! # Threading
//!
//! Construction and evaluation are single-threaded and synchronous.
//! Sequences are shared between sums via `Rc`; an accumulator
//! exclusively owns its operand list.

pub mod cli;
pub mod config;
pub mod graph;
pub mod models;
pub mod plan;
pub mod report;
