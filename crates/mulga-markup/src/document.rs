//! Whole-document convenience entry points.
//!
//! [`parse_markup`] scans a string, [`load_document`] reads a file first.
//! Both run the scanner to completion and hand back the tree together with
//! everything recorded along the way.

use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use mulga_tree::MarkupTree;

use crate::scanner::{ParseIssue, Scanner};

/// A scanned document plus everything learned while scanning it.
pub struct ParsedDocument {
    /// Original markup source.
    pub source: String,

    /// Source path; empty when the document came from a string.
    pub path: String,

    /// The finished node tree.
    pub tree: MarkupTree,

    /// Problems recorded while scanning.
    pub issues: Vec<ParseIssue>,
}

/// Error type for document loading.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// Scan a markup string into a document.
#[must_use]
pub fn parse_markup(markup: &str) -> ParsedDocument {
    let scanner = Scanner::new(markup.to_string());
    let (tree, issues) = scanner.run_with_issues();
    ParsedDocument {
        source: markup.to_string(),
        path: String::new(),
        tree,
        issues,
    }
}

/// Read a file and scan it into a document.
///
/// The file handle is scoped to the read and is released before scanning
/// starts, on success and failure alike.
///
/// # Errors
///
/// Returns [`LoadError::Io`] when the file cannot be read; no tree is
/// produced in that case.
pub fn load_document(path: &Path) -> Result<ParsedDocument, LoadError> {
    let source = fs::read_to_string(path).map_err(|err| LoadError::Io {
        path: path.to_path_buf(),
        source: err,
    })?;
    let mut doc = parse_markup(&source);
    doc.path = path.display().to_string();
    Ok(doc)
}
