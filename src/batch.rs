//! Batch document checking.
//!
//! File discovery and reading live here, outside the pure parse/validate
//! core. Each document is checked independently: one unreadable or
//! unparseable file never aborts the rest of the batch.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::mpsc;
use std::thread;

use walkdir::WalkDir;

use crate::document::parse_document;
use crate::report::{DocumentReport, DocumentStatus};
use crate::validator::{validate, RuleSet};

/// Directories never worth descending into.
const SKIP_DIRS: &[&str] = &["node_modules", "target", "vendor"];

/// Collect the Markdown files under a path, in deterministic order.
///
/// A file path is returned as-is regardless of extension; a directory is
/// walked recursively for `.md` files, skipping hidden and vendor
/// directories.
pub fn discover_documents(path: &Path) -> anyhow::Result<Vec<PathBuf>> {
    if path.is_file() {
        return Ok(vec![path.to_path_buf()]);
    }
    if !path.is_dir() {
        anyhow::bail!("path does not exist: {}", path.display());
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(path).sort_by_file_name().into_iter();
    for entry in walker.filter_entry(|e| !is_skipped(e)) {
        let entry = entry?;
        if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "md") {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

fn is_skipped(entry: &walkdir::DirEntry) -> bool {
    if entry.depth() == 0 || !entry.file_type().is_dir() {
        return false;
    }
    entry
        .file_name()
        .to_str()
        .is_some_and(|name| name.starts_with('.') || SKIP_DIRS.contains(&name))
}

/// Check already-read text against the rule set. Pure: no I/O.
pub fn check_text(label: &str, text: &str, rules: &RuleSet) -> DocumentReport {
    let status = match parse_document(text) {
        Ok(doc) => DocumentStatus::Checked(validate(&doc, rules)),
        Err(e) => {
            tracing::debug!(path = label, error = %e, "Document did not parse");
            DocumentStatus::ParseFailed(e.to_string())
        }
    };
    DocumentReport { path: label.to_string(), status }
}

/// Read and check a single file on disk.
pub fn check_file(path: &Path, rules: &RuleSet) -> DocumentReport {
    let display = path.display().to_string();
    match std::fs::read_to_string(path) {
        Ok(text) => check_text(&display, &text, rules),
        Err(e) => {
            tracing::warn!(path = ?path, error = %e, "Failed to read document");
            DocumentReport { path: display, status: DocumentStatus::IoFailed(e.to_string()) }
        }
    }
}

/// Check many files, fanning documents out across worker threads.
///
/// Each document is fully owned by the worker that checks it; results are
/// reassembled in input order so the report stays deterministic.
pub fn check_files(files: &[PathBuf], rules: &RuleSet) -> Vec<DocumentReport> {
    if files.len() <= 1 {
        return files.iter().map(|f| check_file(f, rules)).collect();
    }

    let workers = num_cpus::get().min(files.len());
    let next = AtomicUsize::new(0);
    let (tx, rx) = mpsc::channel();

    thread::scope(|scope| {
        for _ in 0..workers {
            let tx = tx.clone();
            let next = &next;
            scope.spawn(move || loop {
                let i = next.fetch_add(1, Ordering::Relaxed);
                if i >= files.len() {
                    break;
                }
                if tx.send((i, check_file(&files[i], rules))).is_err() {
                    break;
                }
            });
        }
        drop(tx);

        let mut slots: Vec<Option<DocumentReport>> = vec![None; files.len()];
        for (i, report) in rx {
            slots[i] = Some(report);
        }
        slots.into_iter().flatten().collect()
    })
}

/// Discover and check everything under a path.
pub fn check_path(path: &Path, rules: &RuleSet) -> anyhow::Result<Vec<DocumentReport>> {
    let files = discover_documents(path)?;
    tracing::debug!(count = files.len(), path = ?path, "Checking documents");
    Ok(check_files(&files, rules))
}
