//! Helpers shared by the archive differs (tar and zip).

use recdiff_text::{check_order_consistency, unified_diff};
use recdiff_types::DiffNode;

/// Source label of the synthetic listing-diff node.
pub(crate) const FILE_LIST: &str = "file list";

/// Comment emitted instead of per-entry diffs when only the order changed.
pub(crate) const ENTRY_ORDER_DIFFERS: &str =
    "Entry order differs (listings shown in sorted order)";

/// True when both archives hold the same entries but in inconsistent order.
///
/// This is the exclusive short-circuit: when it fires, the differ emits only
/// [`ENTRY_ORDER_DIFFERS`] — no listing diff and no per-entry children.
pub(crate) fn reordered_same_entries(names1: &[String], names2: &[String]) -> bool {
    let mut sorted1: Vec<&str> = names1.iter().map(String::as_str).collect();
    let mut sorted2: Vec<&str> = names2.iter().map(String::as_str).collect();
    sorted1.sort_unstable();
    sorted2.sort_unstable();
    sorted1 == sorted2 && !check_order_consistency(names1, names2)
}

/// Build the `"file list"` child node, or `None` when the listings agree.
pub(crate) fn listing_node(listing1: &str, listing2: &str) -> Option<DiffNode> {
    if listing1 == listing2 {
        return None;
    }
    let mut node = DiffNode::new(FILE_LIST, FILE_LIST);
    node.unified_diff = Some(unified_diff(listing1, listing2));
    Some(node)
}
