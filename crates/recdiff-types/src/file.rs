//! Input wrapper: a display name plus a caller-owned seekable byte source.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

/// A seekable byte source. Blanket-implemented for anything `Read + Seek`,
/// so `std::fs::File`, `io::Cursor<Vec<u8>>`, and friends all qualify.
pub trait FileSource: Read + Seek {}

impl<T: Read + Seek> FileSource for T {}

/// The unit of comparison: a human-readable name and a borrowed byte source.
///
/// The name is advisory. It is used only for display and for naming child
/// nodes; content alone drives type detection.
///
/// # Ownership contract
///
/// The reader stays owned by the caller — `File` only borrows it. The engine
/// seeks the reader freely (every read starts by rewinding to offset 0) and
/// does **not** restore the position on exit. A caller that hands the same
/// reader to anything else afterwards must rewind it first.
pub struct File<'a> {
    name: String,
    source: &'a mut dyn FileSource,
}

impl<'a> File<'a> {
    /// Wrap a borrowed reader under a display name.
    pub fn new(name: impl Into<String>, source: &'a mut dyn FileSource) -> Self {
        Self {
            name: name.into(),
            source,
        }
    }

    /// The display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Rewind to the start and buffer the entire content.
    pub fn read_all(&mut self) -> io::Result<Vec<u8>> {
        self.source.seek(SeekFrom::Start(0))?;
        let mut buf = Vec::new();
        self.source.read_to_end(&mut buf)?;
        Ok(buf)
    }

    /// Direct access to the underlying reader.
    pub fn source(&mut self) -> &mut dyn FileSource {
        &mut *self.source
    }
}

impl fmt::Debug for File<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("File").field("name", &self.name).finish()
    }
}
