//! Renderers for the recdiff tree.
//!
//! One root [`DiffNode`](recdiff_types::DiffNode) in, either an indented
//! ASCII tree or a canonical JSON document out. Both renderings are
//! byte-stable given byte-stable listings.

pub mod ascii;
pub mod json;

pub use ascii::write_ascii;
pub use json::write_json;
