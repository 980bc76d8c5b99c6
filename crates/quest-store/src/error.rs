// error.rs — Error types for the goal store.
//
// Expected failure modes are explicit enum variants; nothing here is
// meant to be caught-and-ignored by the store itself. Skipped lines
// during a load are not errors at all — they surface as LoadWarning
// values on the (successful) load result.

use std::fmt;

use thiserror::Error;

use quest_goal::GoalError;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A file I/O operation failed.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    /// The requested goal index is out of range.
    #[error("no goal at index {id} (store has {count})")]
    NotFound { id: usize, count: usize },

    /// Failed to serialize an event for a notification sink.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Why a single record line could not be parsed.
///
/// One value per skipped line; the variants mirror the parse contract
/// step that failed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Fewer fields than the variant requires.
    #[error("expected at least {expected} fields, found {found}")]
    InsufficientFields { expected: usize, found: usize },

    /// A numeric field did not parse as an integer.
    #[error("field `{field}` is not a valid integer: {value:?}")]
    InvalidNumeric {
        field: &'static str,
        value: String,
    },

    /// The completion flag did not parse as a boolean.
    #[error("field `completed` is not a valid boolean: {value:?}")]
    InvalidBool { value: String },

    /// The variant tag is not one of the known goal kinds.
    #[error("unknown goal variant: {tag:?}")]
    UnknownVariant { tag: String },

    /// The fields parsed but violate a model invariant (e.g. zero target).
    #[error("invalid goal record: {0}")]
    InvalidGoal(#[from] GoalError),
}

/// A skipped line from an otherwise-successful load.
///
/// `line` is the 1-based line number in the source file (the score line
/// is line 1, so goal records start at line 2).
#[derive(Debug, PartialEq, Eq)]
pub struct LoadWarning {
    pub line: usize,
    pub reason: ParseError,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.reason)
    }
}
