use std::fmt;

use crate::{record::RecordKind, solid::GeometryError, FORMAT_VERSION};

/// Errors that abort a decode.
///
/// Nothing is retried or skipped: once the record stream is misaligned there's no safe place to
/// resume, so every variant is fatal to the current run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported format version {0}; only {} is supported", FORMAT_VERSION)]
    UnsupportedVersion(i64),
    #[error("line {line}: malformed record: {reason}")]
    MalformedRecord { line: usize, reason: String },
    #[error("input ends early: {0}")]
    TruncatedInput(Truncation),
    #[error("line {line}: primitive begun while the one opened on line {open} is still open")]
    NestedPrimitive { line: usize, open: usize },
    #[error("line {line}: `{kind}` record outside of a primitive")]
    NoOpenPrimitive { line: usize, kind: RecordKind },
    #[error("line {line}: invalid parameters: {source}")]
    InvalidParameters {
        line: usize,
        #[source]
        source: GeometryError,
    },
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Mesh(#[from] hedron::Error),
    #[error("mesh sink rejected a mesh")]
    Sink(#[source] Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl Error {
    #[inline]
    pub(crate) fn malformed(line: usize, reason: impl Into<String>) -> Self {
        Self::MalformedRecord {
            line,
            reason: reason.into(),
        }
    }
}

/// What was missing when the input ran out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    /// One of the two header lines is absent.
    MissingHeader(&'static str),
    /// The header promised more records than the input holds.
    MissingRecords { expected: usize, found: usize },
    /// A primitive was begun on `line` and never ended.
    UnmatchedBegin { line: usize },
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Truncation::MissingHeader(field) => write!(f, "missing header line `{field}`"),
            Truncation::MissingRecords { expected, found } => {
                write!(f, "expected {expected} records, found {found}")
            }
            Truncation::UnmatchedBegin { line } => {
                write!(f, "primitive begun on line {line} is never ended")
            }
        }
    }
}
