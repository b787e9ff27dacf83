//! JSON report rendering.
//!
//! The serialized shape is stable for CI consumers: a `documents` array
//! plus a `summary` object. Each document embeds its violations exactly
//! as the validator recorded them.

use serde::{Deserialize, Serialize};

use crate::validator::Violation;

use super::{DocumentReport, DocumentStatus, ReportOptions};

/// Top-level JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonReport {
    /// Per-document outcomes, in batch order
    pub documents: Vec<JsonDocument>,

    /// Aggregate counts for the batch
    pub summary: JsonSummary,
}

/// One document's entry in the JSON report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonDocument {
    /// Display path of the source file
    pub path: String,

    /// "ok", "failed", "parse-error", or "io-error"
    pub status: String,

    /// Violations recorded by the validator
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub violations: Vec<Violation>,

    /// Parse or IO failure message, when the document never validated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Aggregate counts for the batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct JsonSummary {
    /// Documents processed
    pub checked: usize,

    /// Documents that passed under the active policy
    pub passed: usize,

    /// Documents that failed, including parse and IO failures
    pub failed: usize,

    /// Total violations across all documents
    pub violations: usize,
}

impl JsonReport {
    /// Build the report structure from per-document outcomes.
    #[must_use]
    pub fn build(reports: &[DocumentReport], options: &ReportOptions) -> Self {
        let mut documents = Vec::with_capacity(reports.len());
        let mut failed = 0;
        let mut violations = 0;

        for report in reports {
            let fails = report.fails(options.fail_on_warnings);
            if fails {
                failed += 1;
            }
            let doc = match &report.status {
                DocumentStatus::Checked(result) => {
                    violations += result.violations.len();
                    JsonDocument {
                        path: report.path.clone(),
                        status: if fails { "failed" } else { "ok" }.to_string(),
                        violations: result.violations.clone(),
                        error: None,
                    }
                }
                DocumentStatus::ParseFailed(reason) => JsonDocument {
                    path: report.path.clone(),
                    status: "parse-error".to_string(),
                    violations: Vec::new(),
                    error: Some(reason.clone()),
                },
                DocumentStatus::IoFailed(reason) => JsonDocument {
                    path: report.path.clone(),
                    status: "io-error".to_string(),
                    violations: Vec::new(),
                    error: Some(reason.clone()),
                },
            };
            documents.push(doc);
        }

        let checked = reports.len();
        Self {
            documents,
            summary: JsonSummary { checked, passed: checked - failed, failed, violations },
        }
    }
}

/// Render the JSON report as a pretty-printed string.
pub(super) fn render(reports: &[DocumentReport], options: &ReportOptions) -> anyhow::Result<String> {
    let report = JsonReport::build(reports, options);
    Ok(serde_json::to_string_pretty(&report)?)
}
