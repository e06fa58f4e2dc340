//! setup.cfg-compatible INI parsing.
//!
//! Implements the configparser dialect used by Python packaging metadata:
//! `=`/`:` separators, `#`/`;` comments (inline only when preceded by
//! whitespace), indentation-based multi-line values, and an implicit default
//! section for keys that appear before any `[section]` header. Values are
//! raw strings — no interpolation is ever performed.
//!
//! The target semantics are those of Python 3.13 `configparser` configured
//! with `inline_comment_prefixes=('#',';')`, `interpolation=None`,
//! `allow_no_value=False`, `allow_unnamed_section=True`, `strict=False`,
//! `optionxform=str`.
//!
//! # Key Types
//!
//! - [`IniDocument`] — Insertion-ordered sections, parse + emit
//! - [`IniSection`] — One section: name plus ordered key/value entries
//! - [`IniError`] — Typed parse failures with 1-based line numbers

pub mod document;
pub mod error;
mod parser;

pub use document::{IniDocument, IniSection};
pub use error::{IniError, IniResult};

/// Name of the implicit default section.
pub const DEFAULT_SECTION: &str = "";
