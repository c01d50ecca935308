//! Markdown report generation.
//!
//! This module renders evaluation reports to Markdown or JSON.

use crate::models::{EvaluationReport, ReportMetadata, ResultSummary};
use anyhow::Result;
use std::io::Write;
use std::path::Path;

/// Number of leading values shown in the Markdown preview. The JSON
/// report always carries the full value list.
const PREVIEW_VALUES: usize = 16;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &EvaluationReport) -> String {
    let mut output = String::new();

    // Title
    output.push_str("# Sumfold Report\n\n");

    // Metadata section
    output.push_str(&generate_metadata_section(&report.metadata));

    // Result summary
    output.push_str(&generate_summary_section(&report.summary));

    // Value preview
    output.push_str(&generate_values_section(&report.values));

    // Footer
    output.push_str(&generate_footer());

    output
}

/// Generate the metadata section.
fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Plan Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Evaluated At:** {}\n",
        metadata.evaluated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!("- **Operands:** {}\n", metadata.operand_count));
    section.push_str(&format!(
        "- **Sequence Length:** {}\n",
        metadata.sequence_length
    ));
    section.push_str(&format!(
        "- **Summation Passes:** {}\n",
        metadata.summation_runs
    ));
    section.push_str(&format!(
        "- **Evaluation Duration:** {:.3}s\n",
        metadata.duration_seconds
    ));
    section.push('\n');

    section
}

/// Generate the result summary section.
fn generate_summary_section(summary: &ResultSummary) -> String {
    let mut section = String::new();

    section.push_str("## Result Summary\n\n");
    section.push_str("| First | Last | Min | Max | **Total** |\n");
    section.push_str("|:---:|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} | **{}** |\n\n",
        fmt_opt(summary.first),
        fmt_opt(summary.last),
        fmt_opt(summary.min),
        fmt_opt(summary.max),
        summary.total
    ));

    section
}

/// Generate the value preview section.
fn generate_values_section(values: &[i64]) -> String {
    let mut section = String::new();

    section.push_str("## Values\n\n");

    if values.is_empty() {
        section.push_str("The evaluated result is empty.\n\n");
        return section;
    }

    let shown: Vec<String> = values
        .iter()
        .take(PREVIEW_VALUES)
        .map(i64::to_string)
        .collect();

    section.push_str("```\n");
    section.push_str(&shown.join(", "));
    if values.len() > PREVIEW_VALUES {
        section.push_str(&format!(", ... ({} more)", values.len() - PREVIEW_VALUES));
    }
    section.push_str("\n```\n\n");

    section
}

/// Format an optional value for a table cell.
fn fmt_opt(value: Option<i64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Generate the report footer.
fn generate_footer() -> String {
    "---\n\n*Report generated by sumfold*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &EvaluationReport) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

/// Write a Markdown report to a file.
#[allow(dead_code)] // Convenience wrapper
pub fn write_report(report: &EvaluationReport, path: &Path) -> Result<()> {
    let content = generate_markdown_report(report);

    let mut file = std::fs::File::create(path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_report() -> EvaluationReport {
        let metadata = ReportMetadata {
            source: "plans/demo.json".to_string(),
            evaluated_at: Utc::now(),
            operand_count: 6,
            sequence_length: 201,
            summation_runs: 1,
            duration_seconds: 0.004,
        };

        EvaluationReport::new(metadata, (0..=200).map(|v| v * 6).collect())
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report();
        let markdown = generate_markdown_report(&report);

        assert!(markdown.contains("# Sumfold Report"));
        assert!(markdown.contains("## Metadata"));
        assert!(markdown.contains("## Result Summary"));
        assert!(markdown.contains("## Values"));
        assert!(markdown.contains("plans/demo.json"));
        assert!(markdown.contains("| 1200 |"));
        assert!(markdown.contains("**120600**"));
    }

    #[test]
    fn test_metadata_section() {
        let report = create_test_report();
        let section = generate_metadata_section(&report.metadata);

        assert!(section.contains("- **Operands:** 6"));
        assert!(section.contains("- **Sequence Length:** 201"));
        assert!(section.contains("- **Summation Passes:** 1"));
    }

    #[test]
    fn test_values_section_is_truncated() {
        let report = create_test_report();
        let section = generate_values_section(&report.values);

        assert!(section.contains("0, 6, 12"));
        assert!(section.contains("(185 more)"));
    }

    #[test]
    fn test_values_section_short_list() {
        let section = generate_values_section(&[1, 2, 3]);
        assert!(section.contains("1, 2, 3"));
        assert!(!section.contains("more)"));
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report();
        let json = generate_json_report(&report).unwrap();

        assert!(json.contains("\"source\""));
        assert!(json.contains("\"values\""));
        assert!(json.contains("\"summary\""));
    }
}
