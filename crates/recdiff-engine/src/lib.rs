//! The recdiff recursion engine.
//!
//! Compares two opaque byte streams semantically, descending through
//! compressed containers and archives: file-type detection, the recursion
//! dispatcher, and the per-format differs (binary, text, gzip, tar, zip,
//! jar/class). The result is a tree of [`DiffNode`]s renderable as an
//! indented ASCII tree or canonical JSON.
//!
//! # Key Types
//!
//! - [`diff`] — The public entry point
//! - [`DiffOptions`] — Output sinks and the recursion depth limit
//! - [`Verdict`] — `Identical` or `Different`, detectable without output
//! - [`DiffError`] / [`DiffResult`] — Fatal comparison failures
//!
//! Inputs are buffered fully in memory before comparison, and archive
//! entries are materialized per entry; callers must size inputs to memory.
//! Readers stay owned by the caller but are seeked freely (see
//! [`File`]'s ownership contract).

mod binary_diff;
mod class_diff;
mod context;
mod dispatch;
mod gzip_diff;
mod listing;
mod tar_diff;
mod text_diff;
mod zip_diff;

pub mod error;

pub use error::{DiffError, DiffResult};
pub use recdiff_types::{CancellationToken, DiffNode, File, FileSource, FileType};

use std::io;

use context::CompareContext;

/// The outcome of a comparison.
///
/// `Identical` is the Rust rendering of a "no diff" sentinel: byte-equal
/// inputs return it and write nothing to any sink, so the result is
/// detectable without inspecting output.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The inputs are byte-equal; no output was produced.
    Identical,
    /// The inputs differ; the requested outputs were produced.
    Different,
}

impl Verdict {
    /// Whether the inputs were byte-equal.
    pub fn is_identical(self) -> bool {
        matches!(self, Verdict::Identical)
    }
}

/// Output sinks and limits for one [`diff`] invocation.
#[derive(Default)]
pub struct DiffOptions<'a> {
    /// Sink for the indented ASCII rendering.
    pub text_output: Option<&'a mut dyn io::Write>,
    /// Sink for the canonical JSON rendering.
    pub json_output: Option<&'a mut dyn io::Write>,
    /// Destination for the root node itself.
    pub node_output: Option<&'a mut Option<DiffNode>>,
    /// Maximum container recursion depth; `0` disables the gate.
    pub max_depth: u32,
}

impl<'a> DiffOptions<'a> {
    /// Options with no sinks and no depth limit.
    pub fn new() -> Self {
        Self::default()
    }
}

/// Compare two inputs and render the difference, if any.
///
/// Both readers are rewound and buffered in full. On `Verdict::Identical`
/// nothing is written to any sink and `node_output` is left untouched; on
/// `Verdict::Different` at least one of the root node's diff, comments, or
/// details is populated.
pub fn diff(
    cancel: &CancellationToken,
    mut left: File<'_>,
    mut right: File<'_>,
    options: DiffOptions<'_>,
) -> DiffResult<Verdict> {
    let ctx = CompareContext::new(cancel, options.max_depth);

    let data1 = left
        .read_all()
        .map_err(|e| DiffError::io(format!("reading {}", left.name()), e))?;
    let data2 = right
        .read_all()
        .map_err(|e| DiffError::io(format!("reading {}", right.name()), e))?;

    let Some(node) = dispatch::compare_bytes(&ctx, left.name(), right.name(), &data1, &data2)?
    else {
        return Ok(Verdict::Identical);
    };

    let DiffOptions {
        text_output,
        json_output,
        node_output,
        ..
    } = options;
    if let Some(out) = text_output {
        recdiff_render::write_ascii(&node, out)
            .map_err(|e| DiffError::io("writing text output", e))?;
    }
    if let Some(out) = json_output {
        recdiff_render::write_json(&node, out)
            .map_err(|e| DiffError::io("writing json output", e))?;
    }
    if let Some(slot) = node_output {
        *slot = Some(node);
    }
    Ok(Verdict::Different)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write as _};

    use flate2::write::GzEncoder;
    use flate2::Compression;

    fn gzip(data: &[u8], level: u32) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), Compression::new(level));
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    fn tar_bytes(entries: &[(&str, &[u8])]) -> Vec<u8> {
        let mut builder = tar::Builder::new(Vec::new());
        for (name, data) in entries {
            let mut header = tar::Header::new_ustar();
            header.set_size(data.len() as u64);
            header.set_mode(0o644);
            header.set_uid(0);
            header.set_gid(0);
            header.set_mtime(1_700_000_000);
            builder.append_data(&mut header, *name, *data).unwrap();
        }
        builder.into_inner().unwrap()
    }

    /// Run a diff over two in-memory buffers, capturing every output form.
    fn run(
        name1: &str,
        data1: &[u8],
        name2: &str,
        data2: &[u8],
        max_depth: u32,
    ) -> (Verdict, Vec<u8>, Vec<u8>, Option<DiffNode>) {
        let cancel = CancellationToken::new();
        let mut reader1 = Cursor::new(data1.to_vec());
        let mut reader2 = Cursor::new(data2.to_vec());
        let mut text = Vec::new();
        let mut json = Vec::new();
        let mut node = None;
        let verdict = diff(
            &cancel,
            File::new(name1, &mut reader1),
            File::new(name2, &mut reader2),
            DiffOptions {
                text_output: Some(&mut text),
                json_output: Some(&mut json),
                node_output: Some(&mut node),
                max_depth,
            },
        )
        .unwrap();
        (verdict, text, json, node)
    }

    #[test]
    fn identical_text_is_a_clean_verdict() {
        let content = b"hello world\nthis is a test\n";
        let (verdict, text, json, node) = run("f", content, "f", content, 0);
        assert_eq!(verdict, Verdict::Identical);
        assert!(text.is_empty());
        assert!(json.is_empty());
        assert!(node.is_none());
    }

    #[test]
    fn different_text_renders_ascii_and_json() {
        let (verdict, text, json, node) =
            run("file.txt", b"hello world\n", "file.txt", b"hello there\n", 0);
        assert_eq!(verdict, Verdict::Different);

        assert_eq!(
            String::from_utf8(text).unwrap(),
            "--- file.txt\n+++ file.txt\n@@ -1 +1 @@\n-hello world\n+hello there\n\n"
        );

        let expected = {
            let mut n = DiffNode::new("file.txt", "file.txt");
            n.unified_diff = Some("@@ -1 +1 @@\n-hello world\n+hello there\n".into());
            n
        };
        let parsed: DiffNode = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, expected);
        assert_eq!(node.unwrap(), expected);
    }

    #[test]
    fn json_output_matches_the_node() {
        let a = tar_bytes(&[("x.txt", b"1\n")]);
        let b = tar_bytes(&[("x.txt", b"2\n")]);
        let (_, _, json, node) = run("a.tar", &a, "b.tar", &b, 0);
        let parsed: DiffNode = serde_json::from_slice(&json).unwrap();
        assert_eq!(parsed, node.unwrap());
    }

    #[test]
    fn text_vs_binary_is_a_type_mismatch() {
        let (_, _, _, node) = run("a", b"plain text\n", "b", &[0x00, 0x01, 0x02, 0x03, 0x00], 0);
        let node = node.unwrap();
        assert_eq!(node.comments, ["File types differ: text vs binary"]);
        assert!(node.unified_diff.is_none());
        assert!(node.details.is_empty());
    }

    #[test]
    fn gzip_compression_only_difference() {
        let a = gzip(b"hello world\n", 1);
        let b = gzip(b"hello world\n", 9);
        assert_ne!(a, b, "fixture must differ at the frame level");
        let (_, _, _, node) = run("a.gz", &a, "b.gz", &b, 0);
        let node = node.unwrap();
        assert_eq!(node.comments, ["Bytes differ but no semantic diff generated"]);
        assert!(node.details.is_empty());
    }

    #[test]
    fn tar_gz_with_one_changed_entry() {
        let a = gzip(&tar_bytes(&[("config.txt", b"debug=on\n")]), 6);
        let b = gzip(&tar_bytes(&[("config.txt", b"debug=off\n")]), 6);
        let (_, _, _, node) = run("1.tar.gz", &a, "2.tar.gz", &b, 0);
        let node = node.unwrap();

        assert_eq!(node.details.len(), 1);
        let inner = &node.details[0];
        assert_eq!(inner.source1, "1.tar");
        assert_eq!(inner.source2, "2.tar");

        assert_eq!(inner.details.len(), 2);
        assert_eq!(inner.details[0].source1, "file list");
        let entry = &inner.details[1];
        assert_eq!(entry.source1, "config.txt");
        assert!(entry
            .unified_diff
            .as_deref()
            .unwrap()
            .contains("-debug=on"));
    }

    #[test]
    fn depth_limit_stops_archive_expansion() {
        let a = gzip(&tar_bytes(&[("f.txt", b"1\n")]), 6);
        let b = gzip(&tar_bytes(&[("f.txt", b"2\n")]), 6);
        let (_, _, _, node) = run("1.tar.gz", &a, "2.tar.gz", &b, 1);
        let node = node.unwrap();

        assert_eq!(node.details.len(), 1);
        let inner = &node.details[0];
        assert_eq!(
            inner.comments,
            [
                "Binary files differ",
                "Archive not expanded (depth limit 1 reached)"
            ]
        );
        assert!(inner.details.is_empty());
    }

    #[test]
    fn cancellation_discards_output() {
        let cancel = CancellationToken::new();
        cancel.cancel();
        let mut reader1 = Cursor::new(b"a\n".to_vec());
        let mut reader2 = Cursor::new(b"b\n".to_vec());
        let mut text = Vec::new();
        let err = diff(
            &cancel,
            File::new("a", &mut reader1),
            File::new("b", &mut reader2),
            DiffOptions {
                text_output: Some(&mut text),
                ..DiffOptions::new()
            },
        )
        .unwrap_err();
        assert!(matches!(err, DiffError::Cancelled));
        assert!(text.is_empty());
    }
}
