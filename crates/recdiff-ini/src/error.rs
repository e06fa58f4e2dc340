//! Error types for the INI crate.

/// Errors raised while parsing an INI stream.
///
/// Line numbers are 1-based.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum IniError {
    /// A line began with `[` but carried no closing `]` and no separator.
    #[error("unclosed section header at line {line}")]
    UnclosedSection { line: usize },

    /// A `[]` header with an empty name.
    #[error("empty section name at line {line}")]
    EmptySectionName { line: usize },

    /// A non-blank, non-comment line with neither `=` nor `:`.
    #[error("no key/value separator at line {line}")]
    NoSeparator { line: usize },

    /// A separator with nothing before it.
    #[error("empty key at line {line}")]
    EmptyKey { line: usize },
}

/// Convenience alias for INI results.
pub type IniResult<T> = Result<T, IniError>;
