//! Document validation pass.
//!
//! A single linear scan over the parsed tree. Every violation is
//! recorded and returned; nothing is thrown and nothing aborts early.

use serde::{Deserialize, Serialize};

use crate::document::Document;

use super::{RuleLevel, RuleSet};

/// Severity of a recorded violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Reported, but only fails the run with `--fail-on-warnings`
    Warning,
    /// Fails the run
    Error,
}

/// Kinds of structural nonconformance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ViolationKind {
    /// Title is missing or empty
    MissingTitle,
    /// Document has no steps
    NoSteps,
    /// Step numbering skips or repeats a value
    StepIndexGap,
    /// Sub-step index does not begin with the parent step number
    SubStepIndexMismatch,
    /// "Manual testing plan" section is missing or empty
    EmptyManualTestingPlan,
    /// A step heading has no name after the colon
    EmptyStepName,
}

impl ViolationKind {
    /// All kinds, in reporting order.
    pub const ALL: [Self; 6] = [
        Self::MissingTitle,
        Self::NoSteps,
        Self::StepIndexGap,
        Self::SubStepIndexMismatch,
        Self::EmptyManualTestingPlan,
        Self::EmptyStepName,
    ];

    /// Stable kebab-case rule name, as used in configuration files.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::MissingTitle => "missing-title",
            Self::NoSteps => "no-steps",
            Self::StepIndexGap => "step-index-gap",
            Self::SubStepIndexMismatch => "substep-index-mismatch",
            Self::EmptyManualTestingPlan => "empty-manual-testing-plan",
            Self::EmptyStepName => "empty-step-name",
        }
    }

    /// Get a description of what the rule checks.
    #[must_use]
    pub fn description(&self) -> &'static str {
        match self {
            Self::MissingTitle => "document has a non-empty `#` title heading",
            Self::NoSteps => "document contains at least one `Step N:` heading",
            Self::StepIndexGap => "step numbers increase by one starting at 1",
            Self::SubStepIndexMismatch => "sub-step indices begin with the parent step number",
            Self::EmptyManualTestingPlan => {
                "document has a `Manual testing plan` section with at least one item"
            }
            Self::EmptyStepName => "every step heading names the step after the colon",
        }
    }
}

/// One recorded deviation from the expected structure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Violation {
    /// What kind of nonconformance this is
    pub kind: ViolationKind,

    /// Effective severity under the active rule set
    pub severity: Severity,

    /// Human-readable description of the problem
    pub message: String,

    /// Step number the violation refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<usize>,

    /// Sub-step index the violation refers to, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substep: Option<String>,

    /// Source line the violation refers to, if known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
}

/// Result of validating one document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// Every violation found, in scan order
    pub violations: Vec<Violation>,
}

impl ValidationResult {
    /// Check whether no violations at all were recorded.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Count violations at error severity.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.violations.iter().filter(|v| v.severity == Severity::Error).count()
    }

    /// Count violations at warning severity.
    #[must_use]
    pub fn warning_count(&self) -> usize {
        self.violations.iter().filter(|v| v.severity == Severity::Warning).count()
    }

    /// Whether this result fails the run under the given policy.
    #[must_use]
    pub fn fails(&self, fail_on_warnings: bool) -> bool {
        self.error_count() > 0 || (fail_on_warnings && self.warning_count() > 0)
    }

    /// Merge another result into this one.
    pub fn merge(&mut self, other: ValidationResult) {
        self.violations.extend(other.violations);
    }
}

/// Records violations subject to the active rule levels.
struct Recorder<'a> {
    rules: &'a RuleSet,
    result: ValidationResult,
}

impl<'a> Recorder<'a> {
    fn new(rules: &'a RuleSet) -> Self {
        Self { rules, result: ValidationResult::default() }
    }

    fn record(
        &mut self,
        kind: ViolationKind,
        message: String,
        step: Option<usize>,
        substep: Option<String>,
        line: Option<usize>,
    ) {
        let severity = match self.rules.level(kind) {
            RuleLevel::Off => return,
            RuleLevel::Warn => Severity::Warning,
            RuleLevel::Error => Severity::Error,
        };
        self.result.violations.push(Violation { kind, severity, message, step, substep, line });
    }
}

/// Validate a document against the structural schema.
///
/// Always returns a complete [`ValidationResult`], even for a degenerate
/// empty document; violations are aggregated, never thrown.
#[must_use]
pub fn validate(doc: &Document, rules: &RuleSet) -> ValidationResult {
    let mut rec = Recorder::new(rules);

    if doc.title.trim().is_empty() {
        rec.record(
            ViolationKind::MissingTitle,
            "document has no title".to_string(),
            None,
            None,
            None,
        );
    }

    if doc.steps.is_empty() {
        rec.record(
            ViolationKind::NoSteps,
            "document has no steps".to_string(),
            None,
            None,
            None,
        );
    }

    // Reset the expectation after a mismatch so one renumbering does not
    // cascade into a violation per subsequent step.
    let mut expected = 1;
    for step in &doc.steps {
        if step.index != expected {
            rec.record(
                ViolationKind::StepIndexGap,
                format!("expected step {expected}, found step {}", step.index),
                Some(step.index),
                None,
                Some(step.line),
            );
        }
        expected = step.index.saturating_add(1);

        if step.name.trim().is_empty() {
            rec.record(
                ViolationKind::EmptyStepName,
                format!("step {} has no name", step.index),
                Some(step.index),
                None,
                Some(step.line),
            );
        }

        let prefix = format!("{}.", step.index);
        for sub in &step.substeps {
            if !sub.index.starts_with(&prefix) {
                rec.record(
                    ViolationKind::SubStepIndexMismatch,
                    format!(
                        "sub-step {} does not belong to step {}",
                        sub.index, step.index
                    ),
                    Some(step.index),
                    Some(sub.index.clone()),
                    Some(sub.line),
                );
            }
        }
    }

    if doc.manual_testing_plan.is_empty() {
        rec.record(
            ViolationKind::EmptyManualTestingPlan,
            "manual testing plan is missing or empty".to_string(),
            None,
            None,
            None,
        );
    }

    rec.result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::parse_document;

    fn check(content: &str) -> ValidationResult {
        validate(&parse_document(content).unwrap(), &RuleSet::default())
    }

    #[test]
    fn test_conforming_document_is_clean() {
        let result = check(
            "# Add X\n\n### Step 1: Y\n\n#### 1.1: Z\n\n- one bullet\n\n## Manual testing plan\n\n- check it\n",
        );
        assert!(result.is_clean());
    }

    #[test]
    fn test_step_gap_reported_once() {
        let result = check(
            "# Add X\n\n## Step 1: A\n\n## Step 2: B\n\n## Step 4: C\n\n## Manual testing plan\n\n- check\n",
        );
        assert_eq!(result.violations.len(), 1);
        let v = &result.violations[0];
        assert_eq!(v.kind, ViolationKind::StepIndexGap);
        assert_eq!(v.step, Some(4));
    }

    #[test]
    fn test_gap_expectation_resets() {
        // 1, 3, 4: the jump to 3 is one violation; 4 then follows 3 cleanly.
        let result = check(
            "# Add X\n\n## Step 1: A\n\n## Step 3: B\n\n## Step 4: C\n\n## Manual testing plan\n\n- check\n",
        );
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].step, Some(3));
    }

    #[test]
    fn test_substep_index_mismatch() {
        let result = check(
            "# Add X\n\n### Step 1: Y\n\n#### 2.1: Z\n\n- bullet\n\n## Manual testing plan\n\n- check\n",
        );
        assert_eq!(result.violations.len(), 1);
        let v = &result.violations[0];
        assert_eq!(v.kind, ViolationKind::SubStepIndexMismatch);
        assert_eq!(v.step, Some(1));
        assert_eq!(v.substep.as_deref(), Some("2.1"));
    }

    #[test]
    fn test_missing_plan_is_the_only_violation() {
        let result = check("# Add X\n\n## Step 1: Y\n\n- do it\n");
        assert_eq!(result.violations.len(), 1);
        assert_eq!(result.violations[0].kind, ViolationKind::EmptyManualTestingPlan);
    }

    #[test]
    fn test_empty_step_name() {
        let result = check("# Add X\n\n## Step 1:\n\n## Manual testing plan\n\n- check\n");
        assert!(result
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::EmptyStepName && v.step == Some(1)));
    }

    #[test]
    fn test_degenerate_document_never_fails() {
        let doc = Document {
            title: String::new(),
            summary: Vec::new(),
            steps: Vec::new(),
            manual_testing_plan: Vec::new(),
        };
        let result = validate(&doc, &RuleSet::default());
        assert_eq!(result.violations.len(), 3);
        assert!(result.violations.iter().any(|v| v.kind == ViolationKind::MissingTitle));
        assert!(result.violations.iter().any(|v| v.kind == ViolationKind::NoSteps));
        assert!(result
            .violations
            .iter()
            .any(|v| v.kind == ViolationKind::EmptyManualTestingPlan));
    }

    #[test]
    fn test_rule_off_suppresses_violations() {
        let rules = RuleSet { step_index_gap: RuleLevel::Off, ..RuleSet::default() };
        let doc = parse_document(
            "# Add X\n\n## Step 1: A\n\n## Step 4: B\n\n## Manual testing plan\n\n- check\n",
        )
        .unwrap();
        let result = validate(&doc, &rules);
        assert!(result.is_clean());
    }

    #[test]
    fn test_rule_warn_downgrades_severity() {
        let rules = RuleSet { step_index_gap: RuleLevel::Warn, ..RuleSet::default() };
        let doc = parse_document(
            "# Add X\n\n## Step 1: A\n\n## Step 4: B\n\n## Manual testing plan\n\n- check\n",
        )
        .unwrap();
        let result = validate(&doc, &rules);
        assert_eq!(result.error_count(), 0);
        assert_eq!(result.warning_count(), 1);
        assert!(!result.fails(false));
        assert!(result.fails(true));
    }

    #[test]
    fn test_template_validates_cleanly() {
        let text = Document::template("Add telemetry to the importer");
        let result = check(&text);
        assert!(result.is_clean(), "template produced violations: {:?}", result.violations);
    }
}
