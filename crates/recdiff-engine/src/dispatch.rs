//! The recursion dispatcher: byte probe, type detection, depth gating, and
//! the enum switch into the per-format differs.

use recdiff_types::{detect_type, DiffNode, FileType};
use tracing::debug;

use crate::binary_diff::{self, BINARY_FILES_DIFFER, NO_SEMANTIC_DIFF};
use crate::context::CompareContext;
use crate::error::DiffResult;
use crate::{gzip_diff, tar_diff, text_diff, zip_diff};

/// Compare one pair of buffers under their display names.
///
/// Returns `None` when the pair matches byte-for-byte; otherwise a node
/// describing the difference. Fatal failures (decompression, malformed
/// archives, cancellation) propagate as errors.
pub(crate) fn compare_bytes(
    ctx: &CompareContext<'_>,
    source1: &str,
    source2: &str,
    data1: &[u8],
    data2: &[u8],
) -> DiffResult<Option<DiffNode>> {
    ctx.ensure_active()?;

    if binary_diff::compare(data1, data2).is_none() {
        return Ok(None);
    }

    let mut node = DiffNode::new(source1, source2);

    let type1 = detect_type(data1);
    let type2 = detect_type(data2);
    if type1 != type2 {
        debug!(source = source1, %type1, %type2, "file types differ");
        node.push_comment(format!("File types differ: {type1} vs {type2}"));
        return Ok(Some(node));
    }

    if ctx.at_depth_limit() && type1.is_container() {
        node.push_comment(BINARY_FILES_DIFFER);
        node.push_comment(format!(
            "Archive not expanded (depth limit {} reached)",
            ctx.max_depth()
        ));
        return Ok(Some(node));
    }

    let typed = match type1 {
        // Binary pairs carry nothing beyond the byte probe's verdict.
        FileType::Binary => None,
        FileType::Text => Some(text_diff::compare(source1, source2, data1, data2)),
        FileType::Gzip => Some(gzip_diff::compare(ctx, source1, source2, data1, data2)?),
        FileType::Tar => Some(tar_diff::compare(ctx, source1, source2, data1, data2)?),
        FileType::Zip => Some(zip_diff::compare(ctx, source1, source2, data1, data2)?),
    };

    match typed {
        Some(typed) if typed.has_content() => {
            node.unified_diff = typed.unified_diff;
            node.comments = typed.comments;
            node.details = typed.details;
        }
        // The typed differ found nothing the byte probe could not explain.
        Some(_) => node.push_comment(NO_SEMANTIC_DIFF),
        None => node.push_comment(BINARY_FILES_DIFFER),
    }
    Ok(Some(node))
}

#[cfg(test)]
mod tests {
    use super::*;
    use recdiff_types::CancellationToken;

    use crate::error::DiffError;

    fn root_ctx(cancel: &CancellationToken) -> CompareContext<'_> {
        CompareContext::new(cancel, 0)
    }

    #[test]
    fn equal_bytes_produce_no_node() {
        let cancel = CancellationToken::new();
        let node = compare_bytes(&root_ctx(&cancel), "a", "b", b"same", b"same").unwrap();
        assert!(node.is_none());
    }

    #[test]
    fn type_mismatch_is_a_single_comment() {
        let cancel = CancellationToken::new();
        let node = compare_bytes(
            &root_ctx(&cancel),
            "a",
            "b",
            b"plain text\n",
            &[0x00, 0x01, 0x02, 0x03, 0x00],
        )
        .unwrap()
        .unwrap();
        assert_eq!(node.comments, ["File types differ: text vs binary"]);
        assert!(node.unified_diff.is_none());
        assert!(node.details.is_empty());
    }

    #[test]
    fn binary_pair_gets_the_binary_comment() {
        let cancel = CancellationToken::new();
        let node = compare_bytes(
            &root_ctx(&cancel),
            "a",
            "b",
            &[0x00, 0x01, 0x02],
            &[0x00, 0x01, 0x03],
        )
        .unwrap()
        .unwrap();
        assert_eq!(node.comments, [BINARY_FILES_DIFFER]);
    }

    #[test]
    fn cancelled_context_fails_fast() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let err = compare_bytes(&root_ctx(&cancel), "a", "b", b"x", b"y").unwrap_err();
        assert!(matches!(err, DiffError::Cancelled));
    }
}
