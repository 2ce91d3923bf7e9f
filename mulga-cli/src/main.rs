//! Mulga markup scanner CLI
//!
//! Scans markup files (or an inline string) and prints the node tree as an
//! indented outline, with the issues the scanner recorded along the way.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use mulga_common::warning::clear_warnings;
use mulga_markup::{ParseIssue, ParsedDocument, load_document, parse_markup, print_tree};
use mulga_tree::MarkupTree;
use owo_colors::OwoColorize;

/// Mulga — lenient markup scanner and tree printer
#[derive(Parser, Debug)]
#[command(name = "mulga")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Scan a file and print its tree
    mulga world.tmx

    # Scan several files
    mulga maps/a.tmx maps/b.tmx

    # Scan an inline string
    mulga --markup '<map width="4"><layer>1,2,3</layer></map>'

    # List the recorded issues as well
    mulga --issues broken.xml

    # Summary line only
    mulga --quiet world.tmx
"#)]
struct Cli {
    /// Markup files to scan
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Scan a markup string directly instead of files
    #[arg(long, value_name = "STRING")]
    markup: Option<String>,

    /// List the issues recorded while scanning
    #[arg(long)]
    issues: bool,

    /// Suppress the tree outline and print the summary only
    #[arg(short, long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.files.is_empty() && cli.markup.is_none() {
        anyhow::bail!("nothing to scan: pass FILES or --markup");
    }

    if let Some(ref markup) = cli.markup {
        clear_warnings();
        let doc = parse_markup(markup);
        show_document(&doc, &cli);
    }

    for path in &cli.files {
        // Warning deduplication is per document, not per run.
        clear_warnings();
        let doc =
            load_document(path).with_context(|| format!("cannot scan {}", path.display()))?;
        if cli.files.len() > 1 {
            println!("=== {} ===", path.display());
        }
        show_document(&doc, &cli);
    }

    Ok(())
}

/// Print one scanned document according to the output flags.
fn show_document(doc: &ParsedDocument, cli: &Cli) {
    if !cli.quiet {
        print_tree(&doc.tree);
    }
    println!("{}", summarize(&doc.tree, &doc.issues));
    if cli.issues {
        print_issues(&doc.issues);
    }
}

/// One-line scan summary.
fn summarize(tree: &MarkupTree, issues: &[ParseIssue]) -> String {
    // The document node itself is not scanned content.
    format!("{} nodes, {} issues", tree.len() - 1, issues.len())
}

/// List recorded issues, one yellow line each.
fn print_issues(issues: &[ParseIssue]) {
    for issue in issues {
        let line = format!("[byte {}] {}", issue.offset, issue.message);
        println!("{}", line.yellow());
    }
}
