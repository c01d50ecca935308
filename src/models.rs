//! Data models for evaluation reports.
//!
//! This module contains the structures describing the outcome of a
//! summation run, used by the report generator and the JSON output.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about an evaluation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// Where the plan came from (file path or "demo").
    pub source: String,
    /// Date and time of the evaluation.
    pub evaluated_at: DateTime<Utc>,
    /// Number of operands folded into the sum.
    pub operand_count: usize,
    /// Fixed element length shared by every operand.
    pub sequence_length: usize,
    /// Number of summation passes that actually ran.
    pub summation_runs: u32,
    /// Duration of the evaluation in seconds.
    pub duration_seconds: f64,
}

/// Summary statistics over the evaluated result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultSummary {
    /// First element, if any.
    pub first: Option<i64>,
    /// Last element, if any.
    pub last: Option<i64>,
    /// Smallest element, if any.
    pub min: Option<i64>,
    /// Largest element, if any.
    pub max: Option<i64>,
    /// Sum of all elements.
    pub total: i64,
}

impl ResultSummary {
    /// Compute summary statistics from the evaluated values.
    pub fn from_values(values: &[i64]) -> Self {
        Self {
            first: values.first().copied(),
            last: values.last().copied(),
            min: values.iter().min().copied(),
            max: values.iter().max().copied(),
            total: values.iter().sum(),
        }
    }
}

/// The complete evaluation report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Metadata about the run.
    pub metadata: ReportMetadata,
    /// The evaluated element-wise sums, in order.
    pub values: Vec<i64>,
    /// Summary statistics of the result.
    pub summary: ResultSummary,
}

impl EvaluationReport {
    /// Build a report from run metadata and the evaluated values.
    pub fn new(metadata: ReportMetadata, values: Vec<i64>) -> Self {
        let summary = ResultSummary::from_values(&values);
        Self {
            metadata,
            values,
            summary,
        }
    }
}
