//! Rule configuration.
//!
//! The structural rules are a default policy inferred from the corpus
//! authoring convention, not a guaranteed contract, so every rule can be
//! downgraded to a warning or switched off.

use serde::{Deserialize, Serialize};

use super::ViolationKind;

/// How a rule participates in validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleLevel {
    /// Violations fail the run
    #[default]
    Error,
    /// Violations are reported but only fail with `--fail-on-warnings`
    Warn,
    /// The rule is skipped entirely
    Off,
}

/// Per-rule levels for one validation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct RuleSet {
    /// Document has a non-empty title
    pub missing_title: RuleLevel,

    /// Document has at least one step
    pub no_steps: RuleLevel,

    /// Step numbers increase by one starting at 1
    pub step_index_gap: RuleLevel,

    /// Sub-step indices begin with the parent step number
    pub substep_index_mismatch: RuleLevel,

    /// "Manual testing plan" section exists and is non-empty
    pub empty_manual_testing_plan: RuleLevel,

    /// Every step heading names the step
    pub empty_step_name: RuleLevel,
}

impl RuleSet {
    /// Get the configured level for a violation kind.
    #[must_use]
    pub fn level(&self, kind: ViolationKind) -> RuleLevel {
        match kind {
            ViolationKind::MissingTitle => self.missing_title,
            ViolationKind::NoSteps => self.no_steps,
            ViolationKind::StepIndexGap => self.step_index_gap,
            ViolationKind::SubStepIndexMismatch => self.substep_index_mismatch,
            ViolationKind::EmptyManualTestingPlan => self.empty_manual_testing_plan,
            ViolationKind::EmptyStepName => self.empty_step_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_levels_are_error() {
        let rules = RuleSet::default();
        for kind in ViolationKind::ALL {
            assert_eq!(rules.level(kind), RuleLevel::Error);
        }
    }

    #[test]
    fn test_toml_kebab_case_keys() {
        let rules: RuleSet = toml::from_str(
            r#"
step-index-gap = "warn"
empty-step-name = "off"
"#,
        )
        .unwrap();
        assert_eq!(rules.step_index_gap, RuleLevel::Warn);
        assert_eq!(rules.empty_step_name, RuleLevel::Off);
        assert_eq!(rules.missing_title, RuleLevel::Error);
    }
}
