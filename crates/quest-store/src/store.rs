// store.rs — GoalStore: the goal collection, session score, and persistence.
//
// The save format is line-oriented text: the first line is the total
// score, every further line one encoded goal record (see codec.rs).
// Saving writes a sibling temp file and renames it into place so a failed
// write never truncates an existing save. Loading is resilient: malformed
// record lines are skipped with per-line warnings, and the in-memory
// collection is replaced wholesale only once the whole file has been read.
//
// Single-owner by construction: one caller (an interactive shell, say)
// drives the store for the process lifetime, so there is no locking.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use quest_goal::{Goal, Rank};

use crate::codec;
use crate::error::{LoadWarning, ParseError, StoreError};
use crate::events::{EventDispatcher, NotificationSink, QuestEvent};

/// External handle for a goal: its 1-based position in insertion order.
///
/// Ids are stable for the session only — a reload reassigns them by the
/// insertion order of the loaded file.
pub type GoalId = usize;

/// Result of recording one event of progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventOutcome {
    /// Progress was recorded and `points` were added to the score.
    Recorded { points: i64 },

    /// The goal was already complete — nothing changed, nothing awarded.
    /// Informational, not an error.
    AlreadyComplete,
}

impl EventOutcome {
    /// Points this outcome added to the score (0 for `AlreadyComplete`).
    pub fn points(&self) -> i64 {
        match self {
            EventOutcome::Recorded { points } => *points,
            EventOutcome::AlreadyComplete => 0,
        }
    }
}

/// Result of a successful load.
///
/// A load with a non-empty `warnings` list is a partial load: the
/// collection holds every line that parsed, and each skipped line is
/// reported here for the caller to display.
#[derive(Debug)]
pub struct LoadReport {
    /// How many goal records were loaded.
    pub goals_loaded: usize,

    /// The loaded score (0 if the score line was missing or unparsable).
    pub score: i64,

    /// One entry per skipped or defaulted line, in file order.
    pub warnings: Vec<LoadWarning>,
}

impl LoadReport {
    /// True if any line was skipped or defaulted.
    pub fn is_partial(&self) -> bool {
        !self.warnings.is_empty()
    }
}

/// The live goal collection plus the accumulated session score.
#[derive(Default)]
pub struct GoalStore {
    goals: Vec<Goal>,
    score: i64,
    dispatcher: EventDispatcher,
}

impl GoalStore {
    /// Create an empty store with no notification sinks.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a notification sink for store events.
    pub fn add_sink(&mut self, sink: Box<dyn NotificationSink>) {
        self.dispatcher.add_sink(sink);
    }

    /// Append a goal and return its id.
    ///
    /// Input validation happens in the [`Goal`] constructors — a failed
    /// construction never reaches the store, so the collection is
    /// untouched by invalid input.
    pub fn create(&mut self, goal: Goal) -> GoalId {
        self.goals.push(goal);
        let id = self.goals.len();
        let goal = &self.goals[id - 1];
        self.dispatcher
            .dispatch(&QuestEvent::goal_created(id, &goal.name, goal.variant_tag()));
        id
    }

    /// All goals in insertion order.
    pub fn goals(&self) -> &[Goal] {
        &self.goals
    }

    /// Look up a goal by id.
    pub fn get(&self, id: GoalId) -> Option<&Goal> {
        if id == 0 {
            return None;
        }
        self.goals.get(id - 1)
    }

    /// `(id, describe())` pairs in insertion order — the display listing.
    pub fn list(&self) -> Vec<(GoalId, String)> {
        self.goals
            .iter()
            .enumerate()
            .map(|(i, g)| (i + 1, g.describe()))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.goals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.goals.is_empty()
    }

    /// The accumulated session score.
    pub fn score(&self) -> i64 {
        self.score
    }

    /// Rank derived from the current score.
    pub fn rank(&self) -> Rank {
        Rank::for_score(self.score)
    }

    /// Record one event of progress against the goal with the given id.
    ///
    /// Fails with [`StoreError::NotFound`] for an out-of-range id (score
    /// untouched). A goal that is already complete yields
    /// [`EventOutcome::AlreadyComplete`] with zero side effect; otherwise
    /// the award is added to the score and returned.
    pub fn record_event(&mut self, id: GoalId) -> Result<EventOutcome, StoreError> {
        let count = self.goals.len();
        let goal = id
            .checked_sub(1)
            .and_then(|i| self.goals.get_mut(i))
            .ok_or(StoreError::NotFound { id, count })?;

        if goal.is_complete() {
            return Ok(EventOutcome::AlreadyComplete);
        }

        let points = goal.record_event();
        let completed = goal.is_complete();
        let name = goal.name.clone();

        self.score += points;
        tracing::debug!(goal = %name, points, total = self.score, "recorded event");

        self.dispatcher
            .dispatch(&QuestEvent::event_recorded(id, &name, points, self.score));
        if completed {
            self.dispatcher.dispatch(&QuestEvent::goal_completed(id, &name));
        }

        Ok(EventOutcome::Recorded { points })
    }

    /// Write the score and every goal to `path`.
    ///
    /// The content goes to a sibling `.tmp` file first and is renamed
    /// into place, so an existing save survives a failed write.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), StoreError> {
        let path = path.as_ref();
        let tmp = tmp_path(path);

        let io_err = |p: &Path| {
            let p = p.display().to_string();
            move |source| StoreError::Io { path: p, source }
        };

        {
            let file = File::create(&tmp).map_err(io_err(&tmp))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", self.score).map_err(io_err(&tmp))?;
            for goal in &self.goals {
                writeln!(writer, "{}", codec::encode(goal)).map_err(io_err(&tmp))?;
            }
            writer.flush().map_err(io_err(&tmp))?;
        }

        fs::rename(&tmp, path).map_err(io_err(path))?;

        tracing::debug!(path = %path.display(), goals = self.goals.len(), "saved goals");
        self.dispatcher
            .dispatch(&QuestEvent::goals_saved(path, self.goals.len(), self.score));
        Ok(())
    }

    /// Replace the collection and score with the contents of `path`.
    ///
    /// A missing or unreadable file fails with [`StoreError::Io`] and
    /// leaves the current state untouched. Otherwise the load always
    /// succeeds: an unparsable score line defaults the score to 0, and
    /// each malformed record line is skipped, both with a recorded
    /// warning. The returned [`LoadReport`] lists every warning so the
    /// caller can display them.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport, StoreError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|source| StoreError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let mut warnings = Vec::new();
        let mut lines = content.lines();

        // Line 1 is the score. An empty file counts as a missing score
        // line: default to 0 with a warning and keep going.
        let first = lines.next().unwrap_or("");
        let score = match first.trim().parse::<i64>() {
            Ok(score) => score,
            Err(_) => {
                tracing::warn!(value = %first, "score line missing or unparsable, defaulting to 0");
                warnings.push(LoadWarning {
                    line: 1,
                    reason: ParseError::InvalidNumeric {
                        field: "score",
                        value: first.to_string(),
                    },
                });
                0
            }
        };

        let mut goals = Vec::new();
        let mut skipped = 0usize;
        for (idx, line) in lines.enumerate() {
            let line_no = idx + 2; // records start after the score line
            match codec::parse(line) {
                Ok(goal) => goals.push(goal),
                Err(reason) => {
                    tracing::warn!(line = line_no, %reason, "skipping malformed goal record");
                    skipped += 1;
                    warnings.push(LoadWarning {
                        line: line_no,
                        reason,
                    });
                }
            }
        }

        // Wholesale replace — prior state is discarded, not merged.
        self.goals = goals;
        self.score = score;

        tracing::debug!(
            path = %path.display(),
            goals = self.goals.len(),
            skipped,
            "loaded goals"
        );
        self.dispatcher
            .dispatch(&QuestEvent::goals_loaded(path, self.goals.len(), skipped));

        Ok(LoadReport {
            goals_loaded: self.goals.len(),
            score,
            warnings,
        })
    }
}

/// Sibling temp path for an atomic save: `<path>.tmp`.
fn tmp_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_owned();
    os.push(".tmp");
    PathBuf::from(os)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn seeded_store() -> GoalStore {
        let mut store = GoalStore::new();
        store.create(Goal::simple("Marathon", "26.2 miles", 1000).unwrap());
        store.create(Goal::eternal("Scriptures", "daily reading", 100).unwrap());
        store.create(Goal::checklist("Temple", "attend", 50, 10, 500).unwrap());
        store
    }

    #[test]
    fn create_returns_one_based_ids() {
        let mut store = GoalStore::new();
        let a = store.create(Goal::simple("A", "a", 1).unwrap());
        let b = store.create(Goal::simple("B", "b", 2).unwrap());
        assert_eq!((a, b), (1, 2));
        assert_eq!(store.get(1).unwrap().name, "A");
        assert_eq!(store.get(0), None);
        assert_eq!(store.get(3), None);
    }

    #[test]
    fn list_is_insertion_ordered() {
        let store = seeded_store();
        let listing = store.list();
        assert_eq!(listing.len(), 3);
        assert_eq!(listing[0].0, 1);
        assert!(listing[0].1.contains("Marathon"));
        assert!(listing[2].1.contains("0/10"));
    }

    #[test]
    fn record_event_accumulates_score() {
        let mut store = seeded_store();
        assert_eq!(store.record_event(1).unwrap(), EventOutcome::Recorded { points: 1000 });
        assert_eq!(store.record_event(2).unwrap(), EventOutcome::Recorded { points: 100 });
        assert_eq!(store.score(), 1100);
    }

    #[test]
    fn record_event_on_complete_goal_is_a_no_op() {
        let mut store = seeded_store();
        store.record_event(1).unwrap();
        let outcome = store.record_event(1).unwrap();
        assert_eq!(outcome, EventOutcome::AlreadyComplete);
        assert_eq!(outcome.points(), 0);
        assert_eq!(store.score(), 1000);
    }

    #[test]
    fn record_event_out_of_range_leaves_score_unchanged() {
        let mut store = seeded_store();
        let err = store.record_event(99).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 99, count: 3 }));
        let err = store.record_event(0).unwrap_err();
        assert!(matches!(err, StoreError::NotFound { id: 0, count: 3 }));
        assert_eq!(store.score(), 0);
    }

    #[test]
    fn invalid_goal_never_reaches_collection() {
        let mut store = GoalStore::new();
        // Validation happens before create: a zero-target checklist fails
        // at construction and the collection stays empty.
        assert!(Goal::checklist("Bad", "zero target", 10, 0, 50).is_err());
        assert!(store.is_empty());
        store.create(Goal::simple("Good", "fine", 10).unwrap());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn rank_follows_score() {
        use quest_goal::Rank;

        let mut store = GoalStore::new();
        assert_eq!(store.rank(), Rank::NoviceSeeker);
        store.create(Goal::eternal("Grind", "points", 1_000).unwrap());
        store.record_event(1).unwrap();
        assert_eq!(store.rank(), Rank::ApprenticeDisciple);
    }

    #[test]
    fn save_writes_score_then_records() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.txt");

        let mut store = seeded_store();
        store.record_event(1).unwrap();
        store.save(&path).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "1000");
        assert_eq!(lines[1], "SimpleGoal|Marathon|26.2 miles|1000|true");
        assert_eq!(lines[2], "EternalGoal|Scriptures|daily reading|100");
        assert_eq!(lines[3], "ChecklistGoal|Temple|attend|50|10|500|0");
    }

    #[test]
    fn save_leaves_no_temp_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.txt");

        seeded_store().save(&path).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("goals.txt")]);
    }

    #[test]
    fn save_to_unwritable_destination_fails() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("goals.txt");
        let err = seeded_store().save(&path).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
    }

    #[test]
    fn load_missing_file_fails_and_keeps_state() {
        let dir = tempdir().unwrap();
        let mut store = seeded_store();
        let err = store.load(dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, StoreError::Io { .. }));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn load_replaces_collection_wholesale() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.txt");

        let mut small = GoalStore::new();
        small.create(Goal::simple("Only", "one", 10).unwrap());
        small.save(&path).unwrap();

        // A store with more goals and a score loses both on load.
        let mut store = seeded_store();
        store.record_event(1).unwrap();
        let report = store.load(&path).unwrap();

        assert!(!report.is_partial());
        assert_eq!(store.len(), 1);
        assert_eq!(store.score(), 0);
        assert_eq!(store.get(1).unwrap().name, "Only");
    }

    #[test]
    fn load_empty_file_defaults_score_with_warning() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("empty.txt");
        fs::write(&path, "").unwrap();

        let mut store = seeded_store();
        let report = store.load(&path).unwrap();

        assert!(report.is_partial());
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 1);
        assert_eq!(report.score, 0);
        assert!(store.is_empty());
    }

    #[test]
    fn load_unparsable_score_defaults_to_zero_but_keeps_goals() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("goals.txt");
        fs::write(&path, "not-a-score\nEternalGoal|Read|daily|50\n").unwrap();

        let mut store = GoalStore::new();
        let report = store.load(&path).unwrap();

        assert_eq!(report.score, 0);
        assert_eq!(report.goals_loaded, 1);
        assert_eq!(report.warnings.len(), 1);
        assert_eq!(report.warnings[0].line, 1);
    }

    #[test]
    fn events_flow_to_registered_sink() {
        let dir = tempdir().unwrap();
        let log = dir.path().join("events.jsonl");
        let save = dir.path().join("goals.txt");

        let mut store = GoalStore::new();
        store.add_sink(Box::new(crate::events::LogSink::new(&log)));

        store.create(Goal::simple("A", "a", 10).unwrap());
        store.record_event(1).unwrap();
        store.save(&save).unwrap();
        store.load(&save).unwrap();

        let content = fs::read_to_string(&log).unwrap();
        assert!(content.contains("\"goal_created\""));
        assert!(content.contains("\"event_recorded\""));
        assert!(content.contains("\"goal_completed\""));
        assert!(content.contains("\"goals_saved\""));
        assert!(content.contains("\"goals_loaded\""));
    }
}
