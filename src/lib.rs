//! # Runlint
//!
//! Structural linter for Markdown runbook documents.
//!
//! Runlint parses runbooks following the team authoring convention
//! (title, "Summary of changes", numbered steps with dotted sub-steps,
//! "Manual testing plan") and checks them against a configurable set of
//! structural rules, producing text or JSON reports suitable for CI.
//!
//! ## Quick Start
//!
//! ```bash
//! # Install
//! cargo install runlint
//!
//! # Check every runbook under the current directory
//! runlint check
//!
//! # Machine-readable output for CI
//! runlint check docs/runbooks --format json
//! ```
//!
//! The pipeline is a pure function of the input text: raw text →
//! [`parse_document`] → [`Document`] → [`validate`] →
//! [`ValidationResult`] → [`report::render`].

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
// Allow common patterns that are intentional in this codebase
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::option_if_let_else)]
#![allow(clippy::redundant_closure_for_method_calls)]

pub mod batch;
pub mod config;
pub mod document;
pub mod report;
pub mod validator;

pub use batch::{check_file, check_files, check_path, check_text, discover_documents};
pub use config::{Config, ReportConfig};
pub use document::{parse_document, Document, ParseError, Step, SubStep};
pub use report::{
    exit_code, render, DocumentReport, DocumentStatus, JsonReport, ReportFormat, ReportOptions,
};
pub use validator::{
    validate, RuleLevel, RuleSet, Severity, ValidationResult, Violation, ViolationKind,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name
pub const APP_NAME: &str = "runlint";
