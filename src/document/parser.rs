//! Runbook document parser.
//!
//! Converts raw Markdown-like text into a [`Document`] tree with a
//! single line-by-line pass. The parser captures structure verbatim:
//! sequencing problems (step gaps, mismatched sub-step numbering) are
//! the validator's job, not a parse failure.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

use super::{Document, Step, SubStep};

/// Errors produced when raw text lacks a recognizable runbook skeleton.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// No `# Title` heading anywhere in the input.
    #[error("missing title: no `# <title>` heading found")]
    MissingTitle,

    /// A step or sub-step heading whose numeral could not be read.
    #[error("malformed heading at line {line}: `{text}`")]
    MalformedHeading {
        /// Source line of the heading (1-based)
        line: usize,
        /// The offending heading text
        text: String,
    },

    /// A dotted sub-step heading with no step heading before it.
    #[error("sub-step `{index}` at line {line} has no preceding step heading")]
    OrphanSubStep {
        /// Source line of the heading (1-based)
        line: usize,
        /// The dotted index as written
        index: String,
    },
}

/// Which section the scanner is currently inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Preamble,
    Summary,
    Step,
    SubStep,
    TestingPlan,
    Other,
}

static STEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#{2,3}\s+step\s+(\d+)\s*:\s*(.*)$").unwrap());
static STEP_DETECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^#{2,3}\s+step\s").unwrap());
static SUBSTEP_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#{3,4}\s+(\d+\.\d+)\s*:\s*(.*)$").unwrap());
static SUBSTEP_DETECT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^#{3,4}\s+\d[\d.]*\s*:").unwrap());
static SUMMARY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#{2,3}\s+summary of changes\s*$").unwrap());
static PLAN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^#{2,3}\s+manual testing plan\s*$").unwrap());

/// Parse raw text into a [`Document`].
///
/// Pure function of the input: no I/O, no shared state. Returns a
/// structured [`ParseError`] when the text has no recognizable skeleton;
/// a missing "Manual testing plan" section is NOT a parse failure (the
/// validator reports it).
pub fn parse_document(content: &str) -> Result<Document, ParseError> {
    let mut title: Option<String> = None;
    let mut summary = Vec::new();
    let mut steps: Vec<Step> = Vec::new();
    let mut plan = Vec::new();
    let mut context = Context::Preamble;

    for (i, raw) in content.lines().enumerate() {
        let line = raw.trim();
        let lineno = i + 1;

        // First H1 wins as the title; later H1s are treated as opaque
        // sections like any other unrecognized heading.
        if let Some(rest) = line.strip_prefix("# ") {
            if title.is_none() && !rest.trim().is_empty() {
                title = Some(rest.trim().to_string());
                context = Context::Preamble;
                continue;
            }
        }

        if line.starts_with('#') {
            if SUMMARY_RE.is_match(line) {
                context = Context::Summary;
                continue;
            }
            if PLAN_RE.is_match(line) {
                context = Context::TestingPlan;
                continue;
            }
            if let Some(caps) = STEP_RE.captures(line) {
                let index = caps[1].parse().map_err(|_| ParseError::MalformedHeading {
                    line: lineno,
                    text: line.to_string(),
                })?;
                steps.push(Step {
                    index,
                    name: caps[2].trim().to_string(),
                    description: String::new(),
                    substeps: Vec::new(),
                    line: lineno,
                });
                context = Context::Step;
                continue;
            }
            if let Some(caps) = SUBSTEP_RE.captures(line) {
                let index = caps[1].to_string();
                let Some(step) = steps.last_mut() else {
                    return Err(ParseError::OrphanSubStep { line: lineno, index });
                };
                step.substeps.push(SubStep {
                    index,
                    name: caps[2].trim().to_string(),
                    bullets: Vec::new(),
                    line: lineno,
                });
                context = Context::SubStep;
                continue;
            }
            // A heading that looks like a step or sub-step but whose
            // numeral cannot be read.
            if STEP_DETECT_RE.is_match(line) || SUBSTEP_DETECT_RE.is_match(line) {
                return Err(ParseError::MalformedHeading {
                    line: lineno,
                    text: line.to_string(),
                });
            }
            // Unrecognized heading: stop attributing lines to the
            // previous section.
            context = Context::Other;
            continue;
        }

        if line.is_empty() {
            continue;
        }

        match context {
            Context::Summary => {
                if let Some(item) = parse_list_item(line) {
                    summary.push(item);
                }
            }
            Context::TestingPlan => {
                if let Some(item) = parse_list_item(line) {
                    plan.push(item);
                }
            }
            Context::Step => {
                // Prose between a step heading and its first sub-step is
                // the step description; bold and inline markup stay opaque.
                if let Some(step) = steps.last_mut() {
                    if !step.description.is_empty() {
                        step.description.push(' ');
                    }
                    step.description.push_str(line);
                }
            }
            Context::SubStep => {
                if let Some(item) = parse_list_item(line) {
                    if let Some(sub) = steps.last_mut().and_then(|s| s.substeps.last_mut()) {
                        sub.bullets.push(item);
                    }
                }
            }
            Context::Preamble | Context::Other => {}
        }
    }

    let Some(title) = title else {
        return Err(ParseError::MissingTitle);
    };

    Ok(Document { title, summary, steps, manual_testing_plan: plan })
}

/// Extract the text of a bullet line (`-`, `*`, or numbered), stripping
/// checkbox markers.
fn parse_list_item(line: &str) -> Option<String> {
    let line = line.trim();
    if let Some(rest) = line.strip_prefix("- ") {
        Some(rest.trim_start_matches("[ ] ").trim_start_matches("[x] ").trim().to_string())
    } else if let Some(rest) = line.strip_prefix("* ") {
        Some(rest.trim_start_matches("[ ] ").trim_start_matches("[x] ").trim().to_string())
    } else if line.chars().next().is_some_and(|c| c.is_ascii_digit()) && line.contains(". ") {
        line.split_once(". ").map(|(_, rest)| rest.trim().to_string())
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CORPUS_DOC: &str = r"# Migrate build pipeline to Vite

## Summary of changes

- Replace webpack with Vite
- Update CI caching

## Step 1: Remove webpack configuration

Delete the existing bundler setup before introducing the new one.

### 1.1: Delete config files

- Remove **webpack.config.js**
- Remove webpack-specific npm scripts

### 1.2: Prune dependencies

- Drop webpack and loaders from package.json

## Step 2: Introduce Vite

### 2.1: Add configuration

- Create **vite.config.ts**

## Manual testing plan

- Run the dev server and load the app
- Produce a production build and smoke-test it
";

    #[test]
    fn test_parse_corpus_document() {
        let doc = parse_document(CORPUS_DOC).unwrap();
        assert_eq!(doc.title, "Migrate build pipeline to Vite");
        assert_eq!(doc.summary.len(), 2);
        assert_eq!(doc.steps.len(), 2);
        assert_eq!(doc.steps[0].index, 1);
        assert_eq!(doc.steps[0].name, "Remove webpack configuration");
        assert!(doc.steps[0].description.starts_with("Delete the existing"));
        assert_eq!(doc.steps[0].substeps.len(), 2);
        assert_eq!(doc.steps[0].substeps[0].index, "1.1");
        assert_eq!(doc.steps[0].substeps[0].bullets.len(), 2);
        assert_eq!(doc.steps[1].substeps[0].index, "2.1");
        assert_eq!(doc.manual_testing_plan.len(), 2);
    }

    #[test]
    fn test_bold_markup_is_opaque() {
        let doc = parse_document(CORPUS_DOC).unwrap();
        assert_eq!(doc.steps[0].substeps[0].bullets[0], "Remove **webpack.config.js**");
    }

    #[test]
    fn test_parse_is_idempotent() {
        let first = parse_document(CORPUS_DOC).unwrap();
        let second = parse_document(CORPUS_DOC).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty_input_is_missing_title() {
        assert_eq!(parse_document(""), Err(ParseError::MissingTitle));
    }

    #[test]
    fn test_no_title_heading_is_missing_title() {
        let content = "## Step 1: Orphaned\n\n- do it\n";
        assert_eq!(parse_document(content), Err(ParseError::MissingTitle));
    }

    #[test]
    fn test_blank_title_is_missing_title() {
        assert_eq!(parse_document("#   \n\n## Step 1: A\n"), Err(ParseError::MissingTitle));
    }

    #[test]
    fn test_missing_plan_is_not_a_parse_failure() {
        let content = "# Add X\n\n## Step 1: Y\n\n- do it\n";
        let doc = parse_document(content).unwrap();
        assert!(doc.manual_testing_plan.is_empty());
    }

    #[test]
    fn test_non_sequential_steps_parse_verbatim() {
        let content = "# Add X\n\n## Step 1: A\n\n## Step 3: B\n";
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.steps[0].index, 1);
        assert_eq!(doc.steps[1].index, 3);
    }

    #[test]
    fn test_malformed_step_heading() {
        let content = "# Add X\n\n## Step one: A\n";
        let err = parse_document(content).unwrap_err();
        assert_eq!(
            err,
            ParseError::MalformedHeading { line: 3, text: "## Step one: A".to_string() }
        );
    }

    #[test]
    fn test_prose_heading_mentioning_step_is_not_malformed() {
        let content =
            "# Add X\n\n## Step-by-step guide\n\n- preamble\n\n## Step 1: A\n\n## Manual testing plan\n\n- c\n";
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.steps.len(), 1);
    }

    #[test]
    fn test_orphan_substep() {
        let content = "# Add X\n\n### 1.1: Lost\n";
        let err = parse_document(content).unwrap_err();
        assert_eq!(err, ParseError::OrphanSubStep { line: 3, index: "1.1".to_string() });
    }

    #[test]
    fn test_heading_levels_are_flexible() {
        let content = "# Add X\n\n### Summary of changes\n\n- a\n\n### Step 1: Y\n\n#### 1.1: Z\n\n- b\n\n### Manual testing plan\n\n- c\n";
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.summary, vec!["a"]);
        assert_eq!(doc.steps[0].substeps[0].bullets, vec!["b"]);
        assert_eq!(doc.manual_testing_plan, vec!["c"]);
    }

    #[test]
    fn test_numbered_bullets_collect() {
        let content = "# Add X\n\n## Manual testing plan\n\n1. first check\n2. second check\n";
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.manual_testing_plan, vec!["first check", "second check"]);
    }

    #[test]
    fn test_unknown_heading_resets_context() {
        let content =
            "# Add X\n\n## Manual testing plan\n\n- real item\n\n## Rollback notes\n\n- not a plan item\n";
        let doc = parse_document(content).unwrap();
        assert_eq!(doc.manual_testing_plan, vec!["real item"]);
    }

    #[test]
    fn test_step_line_numbers() {
        let doc = parse_document(CORPUS_DOC).unwrap();
        assert_eq!(doc.steps[0].line, 8);
        assert_eq!(doc.steps[0].substeps[0].line, 12);
    }
}
