// error.rs — Error types for goal construction.

use thiserror::Error;

/// Errors that can occur when constructing a goal.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum GoalError {
    /// The goal name is empty (or whitespace only).
    #[error("goal name must not be empty")]
    EmptyName,

    /// A checklist goal needs a positive target count.
    #[error("checklist target must be positive, got {0}")]
    InvalidTarget(u32),
}
