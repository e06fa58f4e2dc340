//! Listing diff and per-entry recursion for tar archives.
//!
//! Two passes per archive: an index pass that records each entry's header
//! fields and the byte offset where its content begins, then a compare pass
//! that diffs the listings and recurses into the union of entry names.
//! Content is read by slicing the in-memory archive at the recorded offset,
//! so the archive stream is never rewound.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::io::Cursor;

use chrono::DateTime;
use recdiff_types::{DiffNode, ENTRY_ONLY_IN_FIRST, ENTRY_ONLY_IN_SECOND};
use tar::{Archive, EntryType};
use tracing::debug;

use crate::context::CompareContext;
use crate::dispatch;
use crate::error::{DiffError, DiffResult};
use crate::listing::{listing_node, reordered_same_entries, ENTRY_ORDER_DIFFERS};

/// Header fields and content offset of one indexed entry.
#[derive(Clone, Debug)]
struct TarEntryMeta {
    name: String,
    mode: u32,
    uid: u64,
    gid: u64,
    size: u64,
    mtime: u64,
    typeflag: u8,
    offset: u64,
}

pub(crate) fn compare(
    ctx: &CompareContext<'_>,
    source1: &str,
    source2: &str,
    data1: &[u8],
    data2: &[u8],
) -> DiffResult<DiffNode> {
    let mut node = DiffNode::new(source1, source2);

    let entries1 = index_entries(source1, data1)?;
    let entries2 = index_entries(source2, data2)?;

    let names1: Vec<String> = entries1.iter().map(|e| e.name.clone()).collect();
    let names2: Vec<String> = entries2.iter().map(|e| e.name.clone()).collect();

    // Same entries, different order: the reorder comment is exclusive.
    if reordered_same_entries(&names1, &names2) {
        node.push_comment(ENTRY_ORDER_DIFFERS);
        return Ok(node);
    }

    if let Some(list) = listing_node(&listing(&entries1), &listing(&entries2)) {
        node.push_detail(list);
    }

    let by_name1: BTreeMap<&str, &TarEntryMeta> =
        entries1.iter().map(|e| (e.name.as_str(), e)).collect();
    let by_name2: BTreeMap<&str, &TarEntryMeta> =
        entries2.iter().map(|e| (e.name.as_str(), e)).collect();
    let union: BTreeSet<&str> = by_name1.keys().chain(by_name2.keys()).copied().collect();

    for name in union {
        ctx.ensure_active()?;
        match (by_name1.get(name), by_name2.get(name)) {
            (Some(_), None) => {
                let mut child = DiffNode::new(name, name);
                child.push_comment(ENTRY_ONLY_IN_FIRST);
                node.push_detail(child);
            }
            (None, Some(_)) => {
                let mut child = DiffNode::new(name, name);
                child.push_comment(ENTRY_ONLY_IN_SECOND);
                node.push_detail(child);
            }
            (Some(meta1), Some(meta2)) => {
                if meta1.typeflag != meta2.typeflag {
                    let mut child = DiffNode::new(name, name);
                    child.push_comment(format!(
                        "Entry types differ: {} vs {}",
                        meta1.typeflag as char, meta2.typeflag as char
                    ));
                    node.push_detail(child);
                } else if EntryType::new(meta1.typeflag).is_file() {
                    let content1 = entry_content(source1, data1, meta1)?;
                    let content2 = entry_content(source2, data2, meta2)?;
                    let child_ctx = ctx.child();
                    if let Some(child) =
                        dispatch::compare_bytes(&child_ctx, name, name, content1, content2)?
                    {
                        node.push_detail(child);
                    }
                }
            }
            (None, None) => unreachable!("name came from the union"),
        }
    }

    Ok(node)
}

/// Enumerate entries, recording headers and content offsets.
fn index_entries(name: &str, data: &[u8]) -> DiffResult<Vec<TarEntryMeta>> {
    let mut archive = Archive::new(Cursor::new(data));
    let mut entries = Vec::new();
    let iter = archive
        .entries()
        .map_err(|e| DiffError::archive(name, &e))?;
    for entry in iter {
        let entry = entry.map_err(|e| DiffError::archive(name, &e))?;
        let header = entry.header();
        let path = entry.path().map_err(|e| DiffError::archive(name, &e))?;
        entries.push(TarEntryMeta {
            name: path.to_string_lossy().into_owned(),
            mode: header.mode().map_err(|e| DiffError::archive(name, &e))?,
            uid: header.uid().map_err(|e| DiffError::archive(name, &e))?,
            gid: header.gid().map_err(|e| DiffError::archive(name, &e))?,
            size: header.size().map_err(|e| DiffError::archive(name, &e))?,
            mtime: header.mtime().map_err(|e| DiffError::archive(name, &e))?,
            typeflag: header.entry_type().as_byte(),
            offset: entry.raw_file_position(),
        });
    }
    debug!(archive = name, entries = entries.len(), "indexed tar archive");
    Ok(entries)
}

/// Slice an entry's content out of the archive buffer.
fn entry_content<'a>(
    archive_name: &str,
    data: &'a [u8],
    meta: &TarEntryMeta,
) -> DiffResult<&'a [u8]> {
    let start = meta.offset as usize;
    let end = start
        .checked_add(meta.size as usize)
        .filter(|&end| end <= data.len())
        .ok_or_else(|| {
            DiffError::archive(
                archive_name,
                format!("entry {} extends beyond the archive", meta.name),
            )
        })?;
    Ok(&data[start..end])
}

/// Render the deterministic per-archive listing: one fixed-width line per
/// entry, mtime formatted in UTC with microsecond precision.
fn listing(entries: &[TarEntryMeta]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:04o} {} {} {:>12} {} {}",
            entry.mode,
            entry.uid,
            entry.gid,
            entry.size,
            format_mtime(entry.mtime),
            entry.name
        );
    }
    out
}

fn format_mtime(secs: u64) -> String {
    let timestamp = DateTime::from_timestamp(secs as i64, 0).unwrap_or(DateTime::UNIX_EPOCH);
    timestamp.format("%Y-%m-%d %H:%M:%S%.6f").to_string()
}
