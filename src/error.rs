// Domain errors - every one of these aborts the run

use thiserror::Error;

/// Errors with a domain meaning, as opposed to plain I/O or CSV failures
/// which propagate through `anyhow` with context attached.
///
/// All of them are fatal: there is no skip-bad-rows mode and no retry.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UnifyError {
    /// A file in the data directory has no entry in the configuration.
    #[error("File name {0} not found in configuration")]
    UnconfiguredFile(String),

    /// A configured file name maps to a bank tag we have no transformer for.
    #[error("Unknown bank tag `{tag}` configured for file {file}")]
    UnknownBankTag { file: String, tag: String },

    /// An input row is missing a field its bank layout requires.
    #[error("Missing field `{field}` in {context}")]
    MissingField { field: String, context: String },

    /// The configured output format is not supported.
    #[error("Unsupported output format `{0}` (only `csv` is supported)")]
    UnsupportedFormat(String),

    /// The configured header does not have one title per output column.
    #[error("Expected exactly {expected} output column titles, got {actual}")]
    ColumnTitleCount { expected: usize, actual: usize },
}
