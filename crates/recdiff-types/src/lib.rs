//! Foundation types for recdiff.
//!
//! This crate provides the data model shared by every other recdiff crate:
//! the input wrapper, content-based file-type detection, the diff tree, and
//! the cooperative cancellation handle.
//!
//! # Key Types
//!
//! - [`File`] — A display name plus a borrowed, seekable byte source
//! - [`FileType`] — Closed variant set produced by magic-byte detection
//! - [`DiffNode`] — One node of the diff tree (sources, diff, comments, children)
//! - [`CancellationToken`] — Shared handle checked between units of work

pub mod cancel;
pub mod detect;
pub mod file;
pub mod node;

pub use cancel::CancellationToken;
pub use detect::{detect_reader, detect_type, FileType};
pub use file::{File, FileSource};
pub use node::{DiffNode, NodeStatus, ENTRY_ONLY_IN_FIRST, ENTRY_ONLY_IN_SECOND};
