//! Error types for the engine crate.

use std::io;

use recdiff_types::FileType;
use thiserror::Error;

/// Errors that abort a comparison.
///
/// Type mismatches and depth-limit hits are *not* errors — they surface as
/// node comments. Class-file parse failures are recovered locally to a
/// binary-difference note and never reach this type.
#[derive(Debug, Error)]
pub enum DiffError {
    /// Reading or seeking an input, or writing an output sink, failed.
    #[error("{context}: {source}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },

    /// A gzip stream could not be decompressed.
    #[error("decompressing {name}: {source}")]
    Decompress {
        name: String,
        #[source]
        source: io::Error,
    },

    /// A tar or zip archive is malformed.
    #[error("reading archive {name}: {reason}")]
    Archive { name: String, reason: String },

    /// The detector produced a type the dispatcher does not handle.
    #[error("unexpected file type: {0}")]
    UnknownType(FileType),

    /// The cancellation token fired; partial output was discarded.
    #[error("comparison cancelled")]
    Cancelled,
}

impl DiffError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    pub(crate) fn archive(name: impl Into<String>, reason: impl ToString) -> Self {
        Self::Archive {
            name: name.into(),
            reason: reason.to_string(),
        }
    }
}

/// Convenience alias for engine results.
pub type DiffResult<T> = Result<T, DiffError>;
