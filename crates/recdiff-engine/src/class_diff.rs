//! JVM class-file disassembly diff.
//!
//! A `.class` entry inside a jar is compared by a deterministic text
//! disassembly instead of recursion: the class-file version, the UTF-8
//! constants in pool order, and each method's bytecode as hex octets.
//! Attribute names are never resolved (that would need a second pass over
//! the constant pool); a method attribute is treated as a Code attribute
//! iff its claimed code length fits inside the attribute body, and anything
//! that does not fit is skipped rather than failing the file.

use std::fmt::Write;

use recdiff_text::unified_diff;
use recdiff_types::DiffNode;

use crate::binary_diff::NO_SEMANTIC_DIFF;

/// Comment attached when either side fails to disassemble.
pub(crate) const INVALID_CLASS_FILES: &str = "Binary files differ (not valid class files)";

const CLASS_MAGIC: u32 = 0xCAFE_BABE;

/// Hex octets per bytecode line.
const OCTETS_PER_LINE: usize = 16;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
enum ClassError {
    #[error("not a class file")]
    BadMagic,
    #[error("truncated class file")]
    Truncated,
    #[error("unknown constant pool tag {0}")]
    UnknownConstantTag(u8),
}

/// Compare two class files by disassembly. Callers guarantee the raw bytes
/// differ; a parse failure on either side falls back to a binary note.
pub(crate) fn compare(source1: &str, source2: &str, data1: &[u8], data2: &[u8]) -> DiffNode {
    let mut node = DiffNode::new(source1, source2);
    match (disassemble(data1), disassemble(data2)) {
        (Ok(text1), Ok(text2)) => {
            let diff = unified_diff(&text1, &text2);
            if diff.is_empty() {
                node.push_comment(NO_SEMANTIC_DIFF);
            } else {
                node.unified_diff = Some(diff);
            }
        }
        _ => node.push_comment(INVALID_CLASS_FILES),
    }
    node
}

fn disassemble(data: &[u8]) -> Result<String, ClassError> {
    let mut reader = ByteReader::new(data);
    if reader.read_u32()? != CLASS_MAGIC {
        return Err(ClassError::BadMagic);
    }
    let minor = reader.read_u16()?;
    let major = reader.read_u16()?;

    let mut out = String::new();
    let _ = writeln!(out, "Class file version: {major}.{minor}");

    let constant_count = reader.read_u16()?;
    let mut index = 1u16;
    while index < constant_count {
        let tag = reader.read_u8()?;
        match tag {
            // Utf8
            1 => {
                let len = reader.read_u16()? as usize;
                let bytes = reader.read_bytes(len)?;
                let _ = writeln!(out, "  {}", String::from_utf8_lossy(bytes));
            }
            // Class, String, MethodType, Module, Package
            7 | 8 | 16 | 19 | 20 => reader.skip(2)?,
            // MethodHandle
            15 => reader.skip(3)?,
            // Integer, Float, the ref kinds, NameAndType, Dynamic, InvokeDynamic
            3 | 4 | 9 | 10 | 11 | 12 | 17 | 18 => reader.skip(4)?,
            // Long and Double occupy two pool slots.
            5 | 6 => {
                reader.skip(8)?;
                index += 1;
            }
            other => return Err(ClassError::UnknownConstantTag(other)),
        }
        index += 1;
    }

    // access_flags, this_class, super_class
    reader.skip(6)?;
    let interfaces = reader.read_u16()? as usize;
    reader.skip(interfaces * 2)?;

    let fields = reader.read_u16()?;
    for _ in 0..fields {
        reader.skip(6)?;
        skip_attributes(&mut reader)?;
    }

    let methods = reader.read_u16()?;
    for method in 0..methods {
        reader.skip(6)?;
        dump_method_code(&mut reader, method, &mut out)?;
    }

    Ok(out)
}

fn skip_attributes(reader: &mut ByteReader<'_>) -> Result<(), ClassError> {
    let count = reader.read_u16()?;
    for _ in 0..count {
        reader.skip(2)?;
        let len = reader.read_u32()? as usize;
        reader.skip(len)?;
    }
    Ok(())
}

fn dump_method_code(
    reader: &mut ByteReader<'_>,
    method: u16,
    out: &mut String,
) -> Result<(), ClassError> {
    let count = reader.read_u16()?;
    let mut dumped = false;
    for _ in 0..count {
        reader.skip(2)?;
        let len = reader.read_u32()? as usize;
        let body = reader.read_bytes(len)?;
        if dumped {
            continue;
        }
        if let Some(code) = code_bytes(body) {
            let _ = writeln!(out, "  Method {method}:");
            for chunk in code.chunks(OCTETS_PER_LINE) {
                let hex: Vec<String> = chunk.iter().map(|b| format!("{b:02x}")).collect();
                let _ = writeln!(out, "    {}", hex.join(" "));
            }
            dumped = true;
        }
    }
    Ok(())
}

/// Probe an attribute body for the Code layout: max_stack, max_locals,
/// code_length, then the bytecode itself.
fn code_bytes(attr: &[u8]) -> Option<&[u8]> {
    if attr.len() < 8 {
        return None;
    }
    let code_len = u32::from_be_bytes([attr[4], attr[5], attr[6], attr[7]]) as usize;
    if code_len == 0 || code_len > attr.len() - 8 {
        return None;
    }
    Some(&attr[8..8 + code_len])
}

/// Bounds-checked big-endian cursor over the class bytes.
struct ByteReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn read_bytes(&mut self, len: usize) -> Result<&'a [u8], ClassError> {
        let end = self.pos.checked_add(len).ok_or(ClassError::Truncated)?;
        if end > self.data.len() {
            return Err(ClassError::Truncated);
        }
        let slice = &self.data[self.pos..end];
        self.pos = end;
        Ok(slice)
    }

    fn skip(&mut self, len: usize) -> Result<(), ClassError> {
        self.read_bytes(len).map(|_| ())
    }

    fn read_u8(&mut self) -> Result<u8, ClassError> {
        Ok(self.read_bytes(1)?[0])
    }

    fn read_u16(&mut self) -> Result<u16, ClassError> {
        let bytes = self.read_bytes(2)?;
        Ok(u16::from_be_bytes([bytes[0], bytes[1]]))
    }

    fn read_u32(&mut self) -> Result<u32, ClassError> {
        let bytes = self.read_bytes(4)?;
        Ok(u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }
}
