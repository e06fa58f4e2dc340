//! Text-level building blocks for recdiff.
//!
//! These are the leaf components the differs are assembled from: a
//! header-less unified-diff synthesizer, a line-ending classifier and
//! normalizer, and the order-consistency check used by the archive differs.
//!
//! # Key Types
//!
//! - [`unified_diff`] — Two strings to `@@`-prefixed hunks, byte-stable
//! - [`LineEnding`] / [`classify`] / [`normalize`] — CRLF/CR/LF/mixed handling
//! - [`check_order_consistency`] — Relative-order comparison of name sequences

pub mod line_endings;
pub mod order;
pub mod unified;

pub use line_endings::{classify, normalize, LineEnding};
pub use order::check_order_consistency;
pub use unified::unified_diff;
