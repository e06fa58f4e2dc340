//! Line-ending-aware text comparison.

use recdiff_text::{classify, normalize, unified_diff, LineEnding};
use recdiff_types::DiffNode;

const MIXED_WARNING: &str =
    "WARNING: Files have mixed line endings which are not shown in diff";
const NORMALIZED_NOTE: &str = "Diff shown with normalized line endings";

/// Compare two text buffers. Callers guarantee the raw bytes differ.
///
/// Line endings are classified first; both sides are then normalized to LF
/// before diffing, so an ending-only change yields a comment and no hunks.
pub(crate) fn compare(source1: &str, source2: &str, data1: &[u8], data2: &[u8]) -> DiffNode {
    let mut node = DiffNode::new(source1, source2);

    let endings1 = classify(data1);
    let endings2 = classify(data2);

    let endings_differ =
        endings1 != endings2 && endings1 != LineEnding::None && endings2 != LineEnding::None;
    if endings_differ {
        node.push_comment(format!("Line endings differ (-{endings1},+{endings2})"));
    }
    if endings1 == LineEnding::Mixed && endings2 == LineEnding::Mixed {
        node.push_comment(MIXED_WARNING);
    }

    let normalized1 = normalize(data1);
    let normalized2 = normalize(data2);
    if normalized1 == normalized2 {
        // The difference was entirely in the line endings.
        return node;
    }

    let text1 = String::from_utf8_lossy(&normalized1);
    let text2 = String::from_utf8_lossy(&normalized2);
    let diff = unified_diff(&text1, &text2);
    if !diff.is_empty() {
        node.unified_diff = Some(diff);
    }
    if endings_differ {
        node.push_comment(NORMALIZED_NOTE);
    }
    node
}
