//! File-type detection from magic bytes and a binary-content heuristic.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// How many bytes of the input the detector inspects.
pub const PEEK_LEN: usize = 1024;

/// Offset of the `ustar` magic inside a tar header.
const USTAR_OFFSET: usize = 257;

/// The closed set of content types recdiff understands.
///
/// `Text` is the absence of evidence of `Binary`; `Binary` is indicated by a
/// NUL byte in the peek window or by more than 25% low-control bytes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FileType {
    Binary,
    Text,
    Gzip,
    Zip,
    Tar,
}

impl FileType {
    /// Whether this type is a container the engine recurses into.
    pub fn is_container(self) -> bool {
        matches!(self, FileType::Gzip | FileType::Zip | FileType::Tar)
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            FileType::Binary => "binary",
            FileType::Text => "text",
            FileType::Gzip => "gzip",
            FileType::Zip => "zip",
            FileType::Tar => "tar",
        };
        f.write_str(label)
    }
}

/// Detect the content type from a byte buffer.
///
/// Only the first [`PEEK_LEN`] bytes are inspected. Decision order: gzip
/// magic, zip local-header magic, `ustar` at offset 257, then the binary
/// heuristic.
pub fn detect_type(data: &[u8]) -> FileType {
    let peek = &data[..data.len().min(PEEK_LEN)];
    match peek {
        [0x1F, 0x8B, ..] => FileType::Gzip,
        [0x50, 0x4B, 0x03, 0x04, ..] => FileType::Zip,
        _ if has_ustar_magic(peek) => FileType::Tar,
        _ if looks_binary(peek) => FileType::Binary,
        _ => FileType::Text,
    }
}

/// Detect the content type of a reader.
///
/// Peeks up to [`PEEK_LEN`] bytes from the start, then seeks back to 0.
pub fn detect_reader<R: Read + Seek>(reader: &mut R) -> io::Result<FileType> {
    reader.seek(SeekFrom::Start(0))?;
    let mut peek = Vec::with_capacity(PEEK_LEN);
    reader.by_ref().take(PEEK_LEN as u64).read_to_end(&mut peek)?;
    reader.seek(SeekFrom::Start(0))?;
    Ok(detect_type(&peek))
}

fn has_ustar_magic(peek: &[u8]) -> bool {
    peek.len() >= USTAR_OFFSET + 5 && &peek[USTAR_OFFSET..USTAR_OFFSET + 5] == b"ustar"
}

fn looks_binary(peek: &[u8]) -> bool {
    if peek.contains(&0) {
        return true;
    }
    let low_control = peek.iter().filter(|&&b| b <= 0x1F).count();
    low_control * 4 > peek.len()
}
