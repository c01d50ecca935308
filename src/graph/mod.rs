//! Lazy aggregation graph.
//!
//! This module provides the deferred summation core: immutable
//! [`Sequence`] leaves, the [`PendingSum`] accumulator that fuses any
//! number of chained additions into a single summation pass, and the
//! [`CombineError`] taxonomy raised at combination time.

pub mod error;
pub mod pending;
pub mod sequence;

pub use error::CombineError;
pub use pending::{Operand, PendingSum};
pub use sequence::Sequence;
