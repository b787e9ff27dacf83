//! Plain-text report rendering.

use crate::validator::{Severity, Violation};

use super::{DocumentReport, DocumentStatus, ReportOptions};

/// Render the text report: one summary line per document, violation
/// details beneath it, and a final aggregate line.
pub(super) fn render(reports: &[DocumentReport], options: &ReportOptions) -> String {
    let mut out = String::new();
    let mut total_violations = 0;
    let mut failed = 0;

    for report in reports {
        match &report.status {
            DocumentStatus::Checked(result) if result.is_clean() => {
                out.push_str(&format!("{}: OK\n", report.path));
            }
            DocumentStatus::Checked(result) => {
                let n = result.violations.len();
                out.push_str(&format!(
                    "{}: {} violation{}\n",
                    report.path,
                    n,
                    if n == 1 { "" } else { "s" }
                ));
                for v in &result.violations {
                    out.push_str(&format!("  {}\n", format_violation(v)));
                }
                total_violations += n;
            }
            DocumentStatus::ParseFailed(reason) => {
                out.push_str(&format!("{}: parse error: {reason}\n", report.path));
            }
            DocumentStatus::IoFailed(reason) => {
                out.push_str(&format!("{}: io error: {reason}\n", report.path));
            }
        }
        if report.fails(options.fail_on_warnings) {
            failed += 1;
        }
    }

    let checked = reports.len();
    out.push_str(&format!(
        "\n{checked} document{} checked, {} passed, {failed} failed, {total_violations} violation{}\n",
        if checked == 1 { "" } else { "s" },
        checked - failed,
        if total_violations == 1 { "" } else { "s" }
    ));
    out
}

/// Format one violation line, e.g.
/// `error[step-index-gap]: expected step 3, found step 4 (step 4, line 12)`.
fn format_violation(v: &Violation) -> String {
    let label = match v.severity {
        Severity::Warning => "warning",
        Severity::Error => "error",
    };

    let mut location = Vec::new();
    if let Some(sub) = &v.substep {
        location.push(format!("sub-step {sub}"));
    } else if let Some(step) = v.step {
        location.push(format!("step {step}"));
    }
    if let Some(line) = v.line {
        location.push(format!("line {line}"));
    }

    if location.is_empty() {
        format!("{label}[{}]: {}", v.kind.name(), v.message)
    } else {
        format!("{label}[{}]: {} ({})", v.kind.name(), v.message, location.join(", "))
    }
}
