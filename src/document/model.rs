//! Runbook document structures.
//!
//! Defines the immutable document tree produced by the parser. All
//! entities are built once during the parse pass and only read after
//! that.

use serde::{Deserialize, Serialize};

/// A parsed runbook document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Document title (first-level heading)
    pub title: String,

    /// Bullets from the "Summary of changes" section
    #[serde(default)]
    pub summary: Vec<String>,

    /// Numbered top-level steps, in source order
    #[serde(default)]
    pub steps: Vec<Step>,

    /// Bullets from the "Manual testing plan" section
    #[serde(default)]
    pub manual_testing_plan: Vec<String>,
}

/// A numbered top-level step ("Step N: ...").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Step number as written in the heading
    pub index: usize,

    /// Step name (heading text after the colon)
    pub name: String,

    /// Free-form prose between the step heading and its first sub-step
    #[serde(default)]
    pub description: String,

    /// Dotted sub-steps belonging to this step
    #[serde(default)]
    pub substeps: Vec<SubStep>,

    /// Source line of the step heading (1-based)
    pub line: usize,
}

/// A numbered sub-step ("N.M: ...").
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubStep {
    /// Dotted index as written in the heading, e.g. "1.2"
    pub index: String,

    /// Sub-step name (heading text after the colon)
    pub name: String,

    /// Free-text action items; order is significant, duplicates allowed
    #[serde(default)]
    pub bullets: Vec<String>,

    /// Source line of the sub-step heading (1-based)
    pub line: usize,
}

impl Document {
    /// Get the number of top-level steps.
    #[must_use]
    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    /// Get the total number of sub-steps across all steps.
    #[must_use]
    pub fn substep_count(&self) -> usize {
        self.steps.iter().map(|s| s.substeps.len()).sum()
    }

    /// Generate a skeleton runbook that passes validation as written.
    pub fn template(title: &str) -> String {
        format!(
            r"# {title}

## Summary of changes

- Describe what this change accomplishes.

## Step 1: Outline the work

Describe the intent of this step in a sentence or two.

### 1.1: Break the step down

- First action item.
- Second action item.

## Manual testing plan

- Verify the change by hand.
"
        )
    }
}

impl Step {
    /// Check whether this step has any sub-steps.
    #[must_use]
    pub fn has_substeps(&self) -> bool {
        !self.substeps.is_empty()
    }
}

impl SubStep {
    /// The parent step number encoded in the dotted index, if readable.
    #[must_use]
    pub fn parent_index(&self) -> Option<usize> {
        self.index.split('.').next().and_then(|n| n.parse().ok())
    }
}
