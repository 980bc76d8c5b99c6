//! # quest-goal
//!
//! Goal variants and scoring semantics for Questlog.
//!
//! A [`Goal`] is a trackable objective with a scoring rule. The closed set
//! of variants lives in [`GoalKind`]:
//!
//! - `Simple` — done once, awards its base points once.
//! - `Eternal` — never finishes, awards its base points on every event.
//! - `Checklist` — done `target` times, with a one-time bonus on the event
//!   that reaches the target.
//!
//! This crate is the leaf of the workspace: pure types and rules, no file
//! I/O. Persistence and the collection live in `quest-store`.

pub mod error;
pub mod goal;
pub mod rank;

pub use error::GoalError;
pub use goal::{Goal, GoalKind};
pub use rank::Rank;
