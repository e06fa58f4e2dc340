//! Decompress-and-recurse comparison of gzip streams.

use std::io::Read;

use flate2::read::GzDecoder;
use recdiff_types::DiffNode;
use tracing::debug;

use crate::context::CompareContext;
use crate::dispatch;
use crate::error::{DiffError, DiffResult};

/// Compare two gzip streams by their decompressed contents.
///
/// Child display names strip `.gz`, except that `.tgz` becomes `.tar`.
/// Decompression failures are fatal for this node.
pub(crate) fn compare(
    ctx: &CompareContext<'_>,
    source1: &str,
    source2: &str,
    data1: &[u8],
    data2: &[u8],
) -> DiffResult<DiffNode> {
    let mut node = DiffNode::new(source1, source2);

    let inner1 = decompress(source1, data1)?;
    let inner2 = decompress(source2, data2)?;
    debug!(
        source = source1,
        inner1 = inner1.len(),
        inner2 = inner2.len(),
        "decompressed gzip pair"
    );

    let child1 = inner_name(source1);
    let child2 = inner_name(source2);

    let child_ctx = ctx.child();
    if let Some(child) = dispatch::compare_bytes(&child_ctx, &child1, &child2, &inner1, &inner2)? {
        node.push_detail(child);
    }
    Ok(node)
}

fn decompress(name: &str, data: &[u8]) -> DiffResult<Vec<u8>> {
    let mut decoder = GzDecoder::new(data);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|source| DiffError::Decompress {
            name: name.to_string(),
            source,
        })?;
    Ok(out)
}

/// Display name of the decompressed content.
pub(crate) fn inner_name(name: &str) -> String {
    if let Some(base) = name.strip_suffix(".tgz") {
        format!("{base}.tar")
    } else if let Some(base) = name.strip_suffix(".gz") {
        base.to_string()
    } else {
        name.to_string()
    }
}
