//! The canonical JSON renderer.

use std::io::{self, Write};

use recdiff_types::DiffNode;

/// Render a diff tree as canonical JSON.
///
/// Keys appear as `source1, source2, unified_diff?, comments?, details?`
/// with absent optionals omitted, two-space indentation, and a trailing
/// newline.
pub fn write_json(node: &DiffNode, out: &mut dyn Write) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, node).map_err(io::Error::from)?;
    writeln!(out)
}
