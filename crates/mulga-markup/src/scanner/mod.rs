//! Markup scanner module for tree construction.

/// Scanner implementation and debug printer.
pub mod core;

pub use self::core::{ParseIssue, ScanState, Scanner, print_tree, render_tree};
