// codec.rs — Line codec for the goal save format.
//
// One record per line, fields separated by `|`, first field the variant
// tag:
//
//   SimpleGoal|<name>|<description>|<points>|<completed:bool>
//   EternalGoal|<name>|<description>|<points>
//   ChecklistGoal|<name>|<description>|<points>|<target>|<bonus>|<completedCount>
//
// Known limitation: there is no escaping. A `|` inside name or
// description shifts every later field and corrupts that record. The
// format is inherited as-is; callers should keep the delimiter out of
// free-text fields.
//
// Parsing is a pure function over one line — no file I/O here — so the
// per-line recovery in GoalStore::load stays trivially testable.

use quest_goal::{Goal, GoalKind};

use crate::error::ParseError;

/// Field delimiter for the wire format.
pub const DELIMITER: char = '|';

/// Encode one goal as a single record line (no trailing newline).
pub fn encode(goal: &Goal) -> String {
    match &goal.kind {
        GoalKind::Simple { completed } => format!(
            "SimpleGoal|{}|{}|{}|{}",
            goal.name, goal.description, goal.points, completed
        ),
        GoalKind::Eternal => format!(
            "EternalGoal|{}|{}|{}",
            goal.name, goal.description, goal.points
        ),
        GoalKind::Checklist {
            target,
            bonus,
            completed_count,
        } => format!(
            "ChecklistGoal|{}|{}|{}|{}|{}|{}",
            goal.name, goal.description, goal.points, target, bonus, completed_count
        ),
    }
}

/// Parse one record line back into a goal.
///
/// The contract is applied strictly in order: split, check the common
/// field count, parse the points, then dispatch on the variant tag for
/// the variant-specific fields. Extra trailing fields are ignored for
/// every variant (forward-compatible).
pub fn parse(line: &str) -> Result<Goal, ParseError> {
    let fields: Vec<&str> = line.split(DELIMITER).collect();

    if fields.len() < 4 {
        return Err(ParseError::InsufficientFields {
            expected: 4,
            found: fields.len(),
        });
    }

    let tag = fields[0];
    let name = fields[1];
    let description = fields[2];
    let points = parse_int::<i64>(fields[3], "points")?;

    match tag {
        "SimpleGoal" => {
            if fields.len() < 5 {
                return Err(ParseError::InsufficientFields {
                    expected: 5,
                    found: fields.len(),
                });
            }
            let completed = parse_bool(fields[4])?;
            Ok(Goal::simple_with_state(name, description, points, completed))
        }
        "EternalGoal" => Ok(Goal::eternal_with_state(name, description, points)),
        "ChecklistGoal" => {
            if fields.len() < 7 {
                return Err(ParseError::InsufficientFields {
                    expected: 7,
                    found: fields.len(),
                });
            }
            let target = parse_int::<u32>(fields[4], "target")?;
            let bonus = parse_int::<i64>(fields[5], "bonus")?;
            let completed_count = parse_int::<u32>(fields[6], "completedCount")?;
            let goal = Goal::checklist_with_progress(
                name,
                description,
                points,
                target,
                bonus,
                completed_count,
            )?;
            Ok(goal)
        }
        _ => Err(ParseError::UnknownVariant {
            tag: tag.to_string(),
        }),
    }
}

fn parse_int<T: std::str::FromStr>(value: &str, field: &'static str) -> Result<T, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumeric {
        field,
        value: value.to_string(),
    })
}

/// Case-insensitive boolean parse: files written by other tools may carry
/// `True`/`False` rather than Rust's lowercase forms.
fn parse_bool(value: &str) -> Result<bool, ParseError> {
    if value.eq_ignore_ascii_case("true") {
        Ok(true)
    } else if value.eq_ignore_ascii_case("false") {
        Ok(false)
    } else {
        Err(ParseError::InvalidBool {
            value: value.to_string(),
        })
    }
}
