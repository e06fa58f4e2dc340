//! Listing diff and per-entry recursion for zip archives (and jars).
//!
//! Entries are walked in central-directory order via `by_index`; content is
//! read through the archive's own decompression, so no offset bookkeeping is
//! needed. Entries whose names end in `.class` are compared by JVM
//! disassembly instead of recursion.

use std::collections::{BTreeMap, BTreeSet};
use std::fmt::Write;
use std::io::{Cursor, Read};

use recdiff_types::{DiffNode, ENTRY_ONLY_IN_FIRST, ENTRY_ONLY_IN_SECOND};
use tracing::debug;
use zip::{CompressionMethod, ZipArchive};

use crate::class_diff;
use crate::context::CompareContext;
use crate::dispatch;
use crate::error::{DiffError, DiffResult};
use crate::listing::{listing_node, reordered_same_entries, ENTRY_ORDER_DIFFERS};

type InMemoryZip<'a> = ZipArchive<Cursor<&'a [u8]>>;

/// Central-directory metadata of one entry.
#[derive(Clone, Debug)]
struct ZipEntryMeta {
    name: String,
    index: usize,
    mode: u32,
    method: String,
    size: u64,
    mtime: String,
    is_dir: bool,
}

pub(crate) fn compare(
    ctx: &CompareContext<'_>,
    source1: &str,
    source2: &str,
    data1: &[u8],
    data2: &[u8],
) -> DiffResult<DiffNode> {
    let mut archive1 = open(source1, data1)?;
    let mut archive2 = open(source2, data2)?;
    let entries1 = index_entries(source1, &mut archive1)?;
    let entries2 = index_entries(source2, &mut archive2)?;

    let mut node = DiffNode::new(source1, source2);

    let names1: Vec<String> = entries1.iter().map(|e| e.name.clone()).collect();
    let names2: Vec<String> = entries2.iter().map(|e| e.name.clone()).collect();
    if reordered_same_entries(&names1, &names2) {
        node.push_comment(ENTRY_ORDER_DIFFERS);
        return Ok(node);
    }

    if let Some(list) = listing_node(&listing(&entries1), &listing(&entries2)) {
        node.push_detail(list);
    }

    let by_name1: BTreeMap<&str, &ZipEntryMeta> =
        entries1.iter().map(|e| (e.name.as_str(), e)).collect();
    let by_name2: BTreeMap<&str, &ZipEntryMeta> =
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
                if meta1.is_dir != meta2.is_dir {
                    let mut child = DiffNode::new(name, name);
                    child.push_comment(format!(
                        "Entry types differ: {} vs {}",
                        kind_label(meta1.is_dir),
                        kind_label(meta2.is_dir)
                    ));
                    node.push_detail(child);
                    continue;
                }
                if meta1.is_dir {
                    continue;
                }
                let content1 = entry_content(source1, &mut archive1, meta1)?;
                let content2 = entry_content(source2, &mut archive2, meta2)?;
                if name.ends_with(".class") {
                    if content1 != content2 {
                        node.push_detail(class_diff::compare(name, name, &content1, &content2));
                    }
                } else {
                    let child_ctx = ctx.child();
                    if let Some(child) =
                        dispatch::compare_bytes(&child_ctx, name, name, &content1, &content2)?
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

fn open<'a>(name: &str, data: &'a [u8]) -> DiffResult<InMemoryZip<'a>> {
    ZipArchive::new(Cursor::new(data)).map_err(|e| DiffError::archive(name, &e))
}

fn index_entries(name: &str, archive: &mut InMemoryZip<'_>) -> DiffResult<Vec<ZipEntryMeta>> {
    let mut entries = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let file = archive
            .by_index(index)
            .map_err(|e| DiffError::archive(name, &e))?;
        entries.push(ZipEntryMeta {
            name: file.name().to_string(),
            index,
            mode: file.unix_mode().unwrap_or(0),
            method: method_label(file.compression()),
            size: file.size(),
            mtime: format_dos_time(file.last_modified()),
            is_dir: file.is_dir(),
        });
    }
    debug!(archive = name, entries = entries.len(), "indexed zip archive");
    Ok(entries)
}

fn entry_content(
    archive_name: &str,
    archive: &mut InMemoryZip<'_>,
    meta: &ZipEntryMeta,
) -> DiffResult<Vec<u8>> {
    let mut file = archive
        .by_index(meta.index)
        .map_err(|e| DiffError::archive(archive_name, &e))?;
    let mut buf = Vec::with_capacity(meta.size as usize);
    file.read_to_end(&mut buf).map_err(|e| {
        DiffError::archive(archive_name, format!("entry {}: {e}", meta.name))
    })?;
    Ok(buf)
}

fn listing(entries: &[ZipEntryMeta]) -> String {
    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:04o} {} {:>12} {} {}",
            entry.mode, entry.method, entry.size, entry.mtime, entry.name
        );
    }
    out
}

fn kind_label(is_dir: bool) -> &'static str {
    if is_dir {
        "directory"
    } else {
        "file"
    }
}

fn method_label(method: CompressionMethod) -> String {
    match method {
        CompressionMethod::Stored => "Store".to_string(),
        CompressionMethod::Deflated => "Deflate".to_string(),
        other => format!("0x{:04x}", method_code(other)),
    }
}

/// Raw central-directory codes for the methods the zip crate names.
fn method_code(method: CompressionMethod) -> u16 {
    match method {
        CompressionMethod::Stored => 0,
        CompressionMethod::Deflated => 8,
        CompressionMethod::Deflate64 => 9,
        CompressionMethod::Bzip2 => 12,
        CompressionMethod::Lzma => 14,
        CompressionMethod::Zstd => 93,
        CompressionMethod::Xz => 95,
        CompressionMethod::Aes => 99,
        CompressionMethod::Unsupported(code) => code,
        _ => 0xFFFF,
    }
}

/// DOS timestamps carry no zone; render the fields as-is with fixed
/// microsecond padding, absent ones as the DOS epoch.
fn format_dos_time(datetime: Option<zip::DateTime>) -> String {
    match datetime {
        Some(dt) => format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}.000000",
            dt.year(),
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second()
        ),
        None => "1980-01-01 00:00:00.000000".to_string(),
    }
}
