//! The indented ASCII tree renderer.
//!
//! Glyphs:
//!
//! - `│ ` — vertical continuation within a nested subtree
//! - `├── ` — a leaf branch marker
//! - `├─┐ ` — a branch that opens a new sub-container header
//! - `│┄ ` — a comment line

use std::io::{self, Write};

use recdiff_types::DiffNode;

/// Render a diff tree as the indented ASCII format.
///
/// The root prints `--- <source1>` / `+++ <source2>`, then its comments,
/// its unified diff, and recursively its details.
pub fn write_ascii(node: &DiffNode, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "--- {}", node.source1)?;
    writeln!(out, "+++ {}", node.source2)?;
    for comment in &node.comments {
        writeln!(out, "│┄ {comment}")?;
    }
    if let Some(diff) = &node.unified_diff {
        // The diff keeps its own trailing newline; writeln adds the blank
        // separator line after the hunk block.
        writeln!(out, "{diff}")?;
    }
    for child in &node.details {
        write_child(child, "", 0, out)?;
    }
    Ok(())
}

fn write_child(node: &DiffNode, prefix: &str, depth: usize, out: &mut dyn Write) -> io::Result<()> {
    // A top-level child that is purely a container opens a sub-header.
    if depth == 0 && node.unified_diff.is_none() && !node.details.is_empty() {
        writeln!(out, "{prefix}│   --- {}", node.source1)?;
        writeln!(out, "{prefix}├─┐ +++ {}", node.source2)?;
        let nested = format!("{prefix}│ ");
        for comment in &node.comments {
            writeln!(out, "{nested}│┄ {comment}")?;
        }
        for child in &node.details {
            write_child(child, &nested, depth + 1, out)?;
        }
        return Ok(());
    }

    writeln!(out, "{prefix}├── {}", node.source1)?;
    for comment in &node.comments {
        writeln!(out, "{prefix}│┄ {comment}")?;
    }
    if !node.details.is_empty() {
        let nested = format!("{prefix}│ ");
        for child in &node.details {
            write_child(child, &nested, depth + 1, out)?;
        }
    } else if let Some(diff) = &node.unified_diff {
        for line in diff.trim_end_matches('\n').split('\n') {
            writeln!(out, "{prefix}│ {line}")?;
        }
    }
    Ok(())
}
