// goal.rs — Goal: a trackable objective with a scoring rule.
//
// The three variants form a closed set, so every operation is a single
// exhaustive match over GoalKind — the compiler flags any variant a new
// rule forgets to handle.
//
// Scoring rules per variant:
//   Simple    — awards `points` once, on the event that completes it.
//   Eternal   — awards `points` on every event, never completes.
//   Checklist — awards `points` per event up to `target` events, plus
//               `bonus` exactly on the event that reaches the target.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::GoalError;

/// Variant-specific state for a goal.
///
/// `#[serde(tag = "kind")]` makes this serialize as `{"kind": "simple", ...}`
/// — clean and readable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum GoalKind {
    /// One-shot goal: complete after the first recorded event.
    Simple { completed: bool },

    /// Recurring goal: never reaches a terminal state.
    Eternal,

    /// Counted goal: complete after `target` recorded events, with a
    /// one-time `bonus` awarded when the count first reaches the target.
    Checklist {
        target: u32,
        bonus: i64,
        completed_count: u32,
    },
}

/// A trackable objective with a scoring rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Goal {
    /// Display name. Not required to be unique.
    pub name: String,

    /// Short free-text description.
    pub description: String,

    /// Base points awarded per recorded event. Conventionally positive,
    /// but any sign is accepted.
    pub points: i64,

    /// Variant-specific completion state.
    pub kind: GoalKind,
}

impl Goal {
    /// Create a new simple (one-shot) goal.
    pub fn simple(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Self::build(name, description, points, GoalKind::Simple { completed: false })
    }

    /// Create a new eternal (recurring) goal.
    pub fn eternal(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Result<Self, GoalError> {
        Self::build(name, description, points, GoalKind::Eternal)
    }

    /// Create a new checklist goal with zero progress.
    ///
    /// `target` must be positive; a zero target would make the goal
    /// trivially complete before its first event. `bonus` may be zero.
    pub fn checklist(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target: u32,
        bonus: i64,
    ) -> Result<Self, GoalError> {
        if target == 0 {
            return Err(GoalError::InvalidTarget(target));
        }
        Self::build(
            name,
            description,
            points,
            GoalKind::Checklist {
                target,
                bonus,
                completed_count: 0,
            },
        )
    }

    /// Rehydrate a simple goal with a known completion flag.
    ///
    /// Used when restoring from a save file. Unlike [`Goal::simple`], the
    /// name is not validated — files written by older tools may carry
    /// empty names, and rejecting them on load would lose the record.
    pub fn simple_with_state(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        completed: bool,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            kind: GoalKind::Simple { completed },
        }
    }

    /// Rehydrate an eternal goal. See [`Goal::simple_with_state`].
    pub fn eternal_with_state(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            points,
            kind: GoalKind::Eternal,
        }
    }

    /// Rehydrate a checklist goal with known progress.
    ///
    /// The target invariant still holds on this path: a restored goal with
    /// `target == 0` would be ambiguous (complete without any event), so
    /// it is rejected and the caller records a warning instead.
    pub fn checklist_with_progress(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        target: u32,
        bonus: i64,
        completed_count: u32,
    ) -> Result<Self, GoalError> {
        if target == 0 {
            return Err(GoalError::InvalidTarget(target));
        }
        Ok(Self {
            name: name.into(),
            description: description.into(),
            points,
            kind: GoalKind::Checklist {
                target,
                bonus,
                completed_count,
            },
        })
    }

    fn build(
        name: impl Into<String>,
        description: impl Into<String>,
        points: i64,
        kind: GoalKind,
    ) -> Result<Self, GoalError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(GoalError::EmptyName);
        }
        Ok(Self {
            name,
            description: description.into(),
            points,
            kind,
        })
    }

    /// Record one event of progress and return the points it earned.
    ///
    /// May return 0: a simple goal that is already done, or a checklist
    /// goal already at its target, awards nothing. The checklist bonus is
    /// paid exactly once, on the increment that reaches the target.
    pub fn record_event(&mut self) -> i64 {
        match &mut self.kind {
            GoalKind::Simple { completed } => {
                if *completed {
                    0
                } else {
                    *completed = true;
                    self.points
                }
            }
            GoalKind::Eternal => self.points,
            GoalKind::Checklist {
                target,
                bonus,
                completed_count,
            } => {
                if *completed_count >= *target {
                    return 0;
                }
                *completed_count += 1;
                if *completed_count == *target {
                    self.points + *bonus
                } else {
                    self.points
                }
            }
        }
    }

    /// Whether the goal has reached its terminal state.
    ///
    /// Eternal goals never do.
    pub fn is_complete(&self) -> bool {
        match &self.kind {
            GoalKind::Simple { completed } => *completed,
            GoalKind::Eternal => false,
            GoalKind::Checklist {
                target,
                completed_count,
                ..
            } => completed_count >= target,
        }
    }

    /// Human-readable status line: completion marker, name, description,
    /// and for checklist goals the progress fraction.
    pub fn describe(&self) -> String {
        let marker = if self.is_complete() { "[X]" } else { "[ ]" };
        match &self.kind {
            GoalKind::Checklist {
                target,
                completed_count,
                ..
            } => format!(
                "{} {} ({}) -- Currently completed {}/{} times",
                marker, self.name, self.description, completed_count, target
            ),
            _ => format!("{} {} ({})", marker, self.name, self.description),
        }
    }

    /// Stable variant tag, also used as the first field of the wire format.
    pub fn variant_tag(&self) -> &'static str {
        match &self.kind {
            GoalKind::Simple { .. } => "SimpleGoal",
            GoalKind::Eternal => "EternalGoal",
            GoalKind::Checklist { .. } => "ChecklistGoal",
        }
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.describe())
    }
}
