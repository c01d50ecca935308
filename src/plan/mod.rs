//! Summation plan loading.
//!
//! A plan is a JSON document listing the terms to fold into one
//! pending sum. Each term is either an array of integers (a leaf
//! sequence) or an object `{"sum": [term, ...]}` (a nested pending
//! sum, flattened into the outer accumulator when folded in). Any
//! other term kind is rejected at build time with
//! [`CombineError::UnsupportedOperand`].
//!
//! ```json
//! {
//!   "terms": [
//!     [0, 1, 2],
//!     [3, 4, 5],
//!     { "sum": [[6, 7, 8], [9, 10, 11]] }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

use crate::graph::{CombineError, Operand, PendingSum, Sequence};

/// A parsed but not yet validated summation plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Terms to fold, in order. Validated when the graph is built.
    pub terms: Vec<Value>,
}

impl Plan {
    /// Parse a plan from JSON text.
    pub fn from_json(text: &str) -> Result<Self> {
        serde_json::from_str(text).context("Failed to parse summation plan")
    }

    /// Load a plan from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file: {}", path.display()))?;
        Self::from_json(&content)
    }

    /// Build the summation graph described by this plan.
    ///
    /// Terms are folded left to right into one flat accumulator.
    /// Nested `{"sum": [...]}` terms are built recursively and then
    /// flattened into the outer operand list by the combine step.
    pub fn build_graph(&self) -> Result<PendingSum, CombineError> {
        let mut terms = self.terms.iter();
        let first = build_term(terms.next().ok_or(CombineError::EmptyOperands)?)?;

        let mut graph = match first {
            Operand::Pending(pending) => pending,
            leaf => PendingSum::new(vec![leaf])?,
        };

        for term in terms {
            graph = graph.combine(build_term(term)?)?;
        }

        debug!(
            operands = graph.operand_count(),
            length = graph.len(),
            "built summation graph"
        );
        Ok(graph)
    }
}

/// Build a single operand from an untyped plan term.
fn build_term(term: &Value) -> Result<Operand, CombineError> {
    match term {
        Value::Array(items) => {
            let mut values = Vec::with_capacity(items.len());
            for item in items {
                let value = item.as_i64().ok_or_else(|| CombineError::UnsupportedOperand {
                    kind: format!("array containing {}", kind_of(item)),
                })?;
                values.push(value);
            }
            Ok(Operand::from(Sequence::from(values)))
        }
        Value::Object(map) => {
            let inner = map
                .get("sum")
                .and_then(Value::as_array)
                .ok_or_else(|| CombineError::UnsupportedOperand {
                    kind: "object without a \"sum\" list".to_string(),
                })?;

            let mut operands = Vec::with_capacity(inner.len());
            for term in inner {
                operands.push(build_term(term)?);
            }
            Ok(Operand::Pending(PendingSum::new(operands)?))
        }
        other => Err(CombineError::UnsupportedOperand {
            kind: kind_of(other).to_string(),
        }),
    }
}

/// Human-readable kind of a JSON value, for error messages.
fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if n.is_i64() => "an integer",
        Value::Number(_) => "a non-integer number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Build the built-in demo graph: `count` sequences of `0..=max_value`
/// combined in a chain.
pub fn demo_graph(count: usize, max_value: i64) -> Result<PendingSum, CombineError> {
    info!(count, max_value, "building demo summation graph");

    let make = || Operand::from(Sequence::new(0..=max_value));

    let mut graph = PendingSum::new(vec![make()])?;
    for _ in 1..count.max(1) {
        graph = graph.combine(make())?;
    }
    Ok(graph)
}
