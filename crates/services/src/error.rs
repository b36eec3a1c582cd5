//! Shared error types for the services crate.

use std::path::PathBuf;

use thiserror::Error;

use quiz_core::model::{ConfigurationError, QuestionError};

/// Why a single bank row was rejected.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseErrorKind {
    #[error("expected {expected} columns, found {found}")]
    ColumnCount { expected: usize, found: usize },

    #[error("answer must be one of A-D, got {raw:?}")]
    InvalidAnswer { raw: String },

    #[error(transparent)]
    Question(#[from] QuestionError),
}

/// A malformed row in a question bank.
///
/// `row` counts data rows from 1 (the header is not a row); `line` is the
/// physical line in the source text.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("row {row} (line {line}): {kind}")]
pub struct ParseError {
    pub row: usize,
    pub line: u64,
    pub kind: ParseErrorKind,
}

/// Errors emitted while loading a question bank.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum BankError {
    #[error("failed to open question bank {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

/// Errors emitted by the quiz session engine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
}
