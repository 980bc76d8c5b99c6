// events.rs — Event model and notification dispatch.
//
// The store emits events at key operations (goal created, event recorded,
// goal completed, save/load). Notification sinks subscribe to these; the
// always-on sink appends JSONL to a file.
//
// The dispatcher is synchronous and fire-and-forget: a failing sink is
// logged and skipped so it can never block a store operation.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::StoreError;
use crate::store::GoalId;

/// Events emitted by the store at key operations.
///
/// Each variant carries a random `event_id` and a UTC timestamp so sinks
/// can correlate and order events without extra context.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "event_type", rename_all = "snake_case")]
pub enum QuestEvent {
    /// A new goal was added to the collection.
    GoalCreated {
        event_id: Uuid,
        goal_id: GoalId,
        name: String,
        variant: String,
        timestamp: DateTime<Utc>,
    },

    /// One event of progress was recorded against a goal.
    EventRecorded {
        event_id: Uuid,
        goal_id: GoalId,
        name: String,
        points: i64,
        total_score: i64,
        timestamp: DateTime<Utc>,
    },

    /// A recorded event completed its goal.
    GoalCompleted {
        event_id: Uuid,
        goal_id: GoalId,
        name: String,
        timestamp: DateTime<Utc>,
    },

    /// The collection was written to disk.
    GoalsSaved {
        event_id: Uuid,
        path: String,
        goal_count: usize,
        score: i64,
        timestamp: DateTime<Utc>,
    },

    /// The collection was replaced from disk.
    GoalsLoaded {
        event_id: Uuid,
        path: String,
        goal_count: usize,
        skipped: usize,
        timestamp: DateTime<Utc>,
    },
}

impl QuestEvent {
    /// Get the event type name as a string.
    pub fn event_type(&self) -> &str {
        match self {
            QuestEvent::GoalCreated { .. } => "goal_created",
            QuestEvent::EventRecorded { .. } => "event_recorded",
            QuestEvent::GoalCompleted { .. } => "goal_completed",
            QuestEvent::GoalsSaved { .. } => "goals_saved",
            QuestEvent::GoalsLoaded { .. } => "goals_loaded",
        }
    }

    pub fn goal_created(goal_id: GoalId, name: &str, variant: &str) -> Self {
        QuestEvent::GoalCreated {
            event_id: Uuid::new_v4(),
            goal_id,
            name: name.to_string(),
            variant: variant.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn event_recorded(goal_id: GoalId, name: &str, points: i64, total_score: i64) -> Self {
        QuestEvent::EventRecorded {
            event_id: Uuid::new_v4(),
            goal_id,
            name: name.to_string(),
            points,
            total_score,
            timestamp: Utc::now(),
        }
    }

    pub fn goal_completed(goal_id: GoalId, name: &str) -> Self {
        QuestEvent::GoalCompleted {
            event_id: Uuid::new_v4(),
            goal_id,
            name: name.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn goals_saved(path: &Path, goal_count: usize, score: i64) -> Self {
        QuestEvent::GoalsSaved {
            event_id: Uuid::new_v4(),
            path: path.display().to_string(),
            goal_count,
            score,
            timestamp: Utc::now(),
        }
    }

    pub fn goals_loaded(path: &Path, goal_count: usize, skipped: usize) -> Self {
        QuestEvent::GoalsLoaded {
            event_id: Uuid::new_v4(),
            path: path.display().to_string(),
            goal_count,
            skipped,
            timestamp: Utc::now(),
        }
    }
}

/// Trait for receiving store events.
///
/// Implementations decide what to do with each event: append to a log
/// file, update a display, etc.
pub trait NotificationSink: Send {
    /// Handle an event. Errors are logged but don't stop the store.
    fn send(&self, event: &QuestEvent) -> Result<(), StoreError>;
}

/// Logs events as JSONL to a file (always-on sink).
pub struct LogSink {
    path: PathBuf,
}

impl LogSink {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

impl NotificationSink for LogSink {
    fn send(&self, event: &QuestEvent) -> Result<(), StoreError> {
        // Ensure parent directory exists.
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.display().to_string(),
                source,
            })?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| StoreError::Io {
                path: self.path.display().to_string(),
                source,
            })?;

        let json = serde_json::to_string(event)?;
        writeln!(file, "{}", json).map_err(|source| StoreError::Io {
            path: self.path.display().to_string(),
            source,
        })?;

        Ok(())
    }
}

/// Dispatches events to multiple sinks.
///
/// Errors from individual sinks are logged (via tracing) but don't
/// prevent other sinks from receiving the event.
#[derive(Default)]
pub struct EventDispatcher {
    sinks: Vec<Box<dyn NotificationSink>>,
}

impl EventDispatcher {
    /// Create a new dispatcher with no sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a notification sink.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.sinks.push(sink);
    }

    /// Dispatch an event to all sinks.
    pub fn dispatch(&self, event: &QuestEvent) {
        for sink in &self.sinks {
            if let Err(e) = sink.send(event) {
                tracing::warn!("notification sink error: {}", e);
            }
        }
    }
}
