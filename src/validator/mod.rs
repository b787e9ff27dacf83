//! Structural validation of parsed runbooks.
//!
//! The validator checks a [`Document`](crate::document::Document) against
//! the schema invariants and reports every violation found. It never
//! aborts early and never fails: even a degenerate empty document yields
//! a complete [`ValidationResult`].

mod rules;
mod validation;

pub use rules::{RuleLevel, RuleSet};
pub use validation::{validate, Severity, ValidationResult, Violation, ViolationKind};
