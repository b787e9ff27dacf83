//! Report generation.
//!
//! Renders per-document outcomes into a human-readable text report or a
//! machine-readable JSON report, and computes the process exit code.
//! Writing the report anywhere is the caller's responsibility.

mod json;
mod text;

use serde::{Deserialize, Serialize};

use crate::validator::ValidationResult;

pub use json::{JsonDocument, JsonReport, JsonSummary};

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    /// One summary line per document plus violation details
    #[default]
    Text,
    /// A single JSON object for CI consumption
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => anyhow::bail!("unknown report format `{other}` (expected `text` or `json`)"),
        }
    }
}

/// Options recognized by the report generator.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportOptions {
    /// Output format
    pub format: ReportFormat,

    /// Treat warning-severity violations as failures
    pub fail_on_warnings: bool,
}

/// Outcome of checking one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocumentStatus {
    /// The document parsed; validation ran to completion
    Checked(ValidationResult),
    /// The text had no recognizable runbook skeleton
    ParseFailed(String),
    /// The file could not be read
    IoFailed(String),
}

/// One document's outcome, labeled with its display path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentReport {
    /// Display path of the source file
    pub path: String,

    /// What happened when the document was checked
    pub status: DocumentStatus,
}

impl DocumentReport {
    /// Whether this document fails the run under the given policy.
    #[must_use]
    pub fn fails(&self, fail_on_warnings: bool) -> bool {
        match &self.status {
            DocumentStatus::Checked(result) => result.fails(fail_on_warnings),
            DocumentStatus::ParseFailed(_) | DocumentStatus::IoFailed(_) => true,
        }
    }

    /// Number of violations recorded for this document.
    #[must_use]
    pub fn violation_count(&self) -> usize {
        match &self.status {
            DocumentStatus::Checked(result) => result.violations.len(),
            DocumentStatus::ParseFailed(_) | DocumentStatus::IoFailed(_) => 0,
        }
    }
}

/// Render a report and compute the exit code for the batch.
pub fn render(reports: &[DocumentReport], options: &ReportOptions) -> anyhow::Result<(String, i32)> {
    let mut output = match options.format {
        ReportFormat::Text => text::render(reports, options),
        ReportFormat::Json => json::render(reports, options)?,
    };
    if !output.ends_with('\n') {
        output.push('\n');
    }
    Ok((output, exit_code(reports, options.fail_on_warnings)))
}

/// Exit code for a batch: 0 when every document passes, 1 otherwise.
#[must_use]
pub fn exit_code(reports: &[DocumentReport], fail_on_warnings: bool) -> i32 {
    i32::from(reports.iter().any(|r| r.fails(fail_on_warnings)))
}
