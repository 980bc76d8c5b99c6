//! # quest-store
//!
//! Goal collection, scoring, and persistence for Questlog.
//!
//! A [`GoalStore`] owns the ordered collection of goals plus the session
//! score. Goals are addressed from the outside by their 1-based insertion
//! index ([`GoalId`]), valid only for the current session.
//!
//! Persistence uses a line-oriented pipe-delimited text format (see
//! [`codec`]). Loading is resilient: a malformed line is skipped with a
//! recorded [`LoadWarning`] instead of aborting the whole load.
//!
//! ## Key components
//!
//! - [`GoalStore`] — the collection, score, and save/load operations
//! - [`codec`] — pure encode/parse for the wire format
//! - [`QuestEvent`] — events emitted at key store operations
//! - [`EventDispatcher`] / [`NotificationSink`] — event fan-out (JSONL
//!   logging via [`LogSink`])

pub mod codec;
pub mod error;
pub mod events;
pub mod store;

pub use error::{LoadWarning, ParseError, StoreError};
pub use events::{EventDispatcher, LogSink, NotificationSink, QuestEvent};
pub use store::{EventOutcome, GoalId, GoalStore, LoadReport};
