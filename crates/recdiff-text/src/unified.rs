//! Header-less unified-diff synthesis.
//!
//! Uses the `similar` crate (Myers diff) to produce the `@@`-prefixed hunks
//! of a unified diff with three lines of context. No `--- a/...` /
//! `+++ b/...` header and no `\ No newline at end of file` marker are
//! emitted, and the output carries no timestamps or random labels, so it is
//! byte-stable across runs.

use std::fmt::Write;

use similar::TextDiff;

/// Number of context lines around each change.
const CONTEXT_RADIUS: usize = 3;

/// Produce the unified-diff hunks between two strings.
///
/// Returns the empty string when the inputs are equal, and also for
/// degenerate non-equal inputs that produce no hunks. Non-empty output is
/// terminated by a newline.
pub fn unified_diff(old: &str, new: &str) -> String {
    if old == new {
        return String::new();
    }

    let diff = TextDiff::from_lines(old, new);
    let mut udiff = diff.unified_diff();
    udiff.context_radius(CONTEXT_RADIUS).missing_newline_hint(false);

    let mut out = String::new();
    for hunk in udiff.iter_hunks() {
        // Hunk Display cannot fail when writing into a String.
        let _ = write!(out, "{hunk}");
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}
