//! Markup tokenizer and scanner for mulga.
//!
//! # Scope
//!
//! This crate implements:
//! - **Delimiter Tokenizer** - splits raw tag text on a delimiter, with an
//!   optional excluder character that protects quoted spans
//! - **Markup Scanner / Tree Builder** - single pass over the input that
//!   grows a [`mulga_tree::MarkupTree`] as tags open and close, collecting
//!   attributes and element text along the way
//! - **Debug Printer** - renders a finished tree as an indented outline
//! - **Document Loading** - read a file and scan it in one call
//!
//! # Not Implemented
//!
//! - Namespaces, entities, CDATA, comments, and processing instructions:
//!   `<?xml ...?>` and `<!-- -->` are scanned as ordinary tags
//! - Well-formedness validation: mismatched and unmatched closing tags are
//!   tolerated and surface as [`scanner::ParseIssue`]s, never as failures

/// Whole-document convenience entry points.
pub mod document;
/// Markup scanner and tree construction.
pub mod scanner;
/// Delimiter tokenizer for decomposing tag text.
pub mod tokenizer;

pub use document::{LoadError, ParsedDocument, load_document, parse_markup};
pub use scanner::{ParseIssue, ScanState, Scanner, print_tree, render_tree};
pub use tokenizer::split_tokens;
