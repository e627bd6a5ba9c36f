//! Task model for workdone.
//!
//! A task is a description, a completion flag and a [`TaskKind`]. Each task
//! serializes to one line of the store:
//!
//! ```text
//! T / 0 / read book
//! D / 1 / submit report / 2019-12-01 18:00
//! E / 0 / team dinner / 2019-12-01 18:00 to 2019-12-01 20:00
//! ```

use std::fmt;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::error::{Error, Result};

/// Separator between fields of a stored task line
pub const FIELD_SEPARATOR: &str = " / ";

/// Input/storage pattern for a single timestamp, as shown to users
pub const TIME_PATTERN: &str = "yyyy-MM-dd HH:mm";

/// Input/storage pattern for an event window, as shown to users
pub const WINDOW_PATTERN: &str = "yyyy-MM-dd HH:mm to yyyy-MM-dd HH:mm";

const INPUT_FORMAT: &str = "%Y-%m-%d %H:%M";
const DISPLAY_FORMAT: &str = "%b %d %Y %H:%M";
const WINDOW_SEPARATOR: &str = " to ";

/// The fixed variant of a task
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TaskKind {
    ToDo,
    Deadline {
        due: NaiveDateTime,
    },
    Event {
        start: NaiveDateTime,
        end: NaiveDateTime,
    },
}

impl TaskKind {
    /// Single-letter tag used in listings and in the store
    pub fn letter(&self) -> char {
        match self {
            TaskKind::ToDo => 'T',
            TaskKind::Deadline { .. } => 'D',
            TaskKind::Event { .. } => 'E',
        }
    }

    /// Normalize a user-typed kind letter, accepting either case
    pub fn from_letter(value: &str) -> Option<char> {
        match value {
            "T" | "t" => Some('T'),
            "D" | "d" => Some('D'),
            "E" | "e" => Some('E'),
            _ => None,
        }
    }
}

/// One to-do, deadline or event entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Task {
    pub description: String,
    pub done: bool,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    fn new(description: &str, kind: TaskKind) -> Self {
        Self {
            description: description.trim().to_string(),
            done: false,
            kind,
        }
    }

    /// Create a plain to-do
    pub fn todo(description: &str) -> Self {
        Self::new(description, TaskKind::ToDo)
    }

    /// Create a deadline, parsing `due` as `yyyy-MM-dd HH:mm`
    pub fn deadline(description: &str, due: &str) -> Result<Self> {
        let due = parse_time(due).ok_or(Error::InvalidTimeFormat {
            expected: TIME_PATTERN,
        })?;
        Ok(Self::new(description, TaskKind::Deadline { due }))
    }

    /// Create an event, parsing `window` as `<start> to <end>`
    pub fn event(description: &str, window: &str) -> Result<Self> {
        let (start, end) = parse_window(window).ok_or(Error::InvalidTimeFormat {
            expected: WINDOW_PATTERN,
        })?;
        Ok(Self::new(description, TaskKind::Event { start, end }))
    }

    /// Mark the task as done. Marking twice has no further effect.
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    pub fn contains_keyword(&self, keyword: &str) -> bool {
        self.description.contains(keyword)
    }

    /// Due time, for deadlines only
    pub fn due(&self) -> Option<NaiveDateTime> {
        match self.kind {
            TaskKind::Deadline { due } => Some(due),
            _ => None,
        }
    }

    /// Serialize to one newline-terminated store line
    pub fn to_file_line(&self) -> String {
        let done = if self.done { "1" } else { "0" };
        let mut fields = vec![
            self.kind.letter().to_string(),
            done.to_string(),
            self.description.clone(),
        ];
        match &self.kind {
            TaskKind::ToDo => {}
            TaskKind::Deadline { due } => fields.push(due.format(INPUT_FORMAT).to_string()),
            TaskKind::Event { start, end } => fields.push(format!(
                "{}{WINDOW_SEPARATOR}{}",
                start.format(INPUT_FORMAT),
                end.format(INPUT_FORMAT)
            )),
        }
        let mut line = fields.join(FIELD_SEPARATOR);
        line.push('\n');
        line
    }

    /// Rebuild a task from one store line (without its trailing newline)
    pub fn from_file_line(line: &str) -> Result<Self> {
        let corrupt = |reason: &str| Error::CorruptRecord {
            line: line.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = line.splitn(3, FIELD_SEPARATOR);
        let letter = parts.next().unwrap_or_default();
        let done = match parts.next() {
            Some("1") => true,
            Some("0") => false,
            Some(_) => return Err(corrupt("done flag must be 0 or 1")),
            None => return Err(corrupt("missing done flag")),
        };
        let rest = parts.next().ok_or_else(|| corrupt("missing description"))?;

        let mut task = match letter {
            "T" => Task::todo(rest),
            "D" | "E" => {
                let (description, time) = rest
                    .rsplit_once(FIELD_SEPARATOR)
                    .ok_or_else(|| corrupt("missing time field"))?;
                let parsed = if letter == "D" {
                    Task::deadline(description, time)
                } else {
                    Task::event(description, time)
                };
                parsed.map_err(|_| corrupt("unreadable time field"))?
            }
            _ => return Err(corrupt("unknown task kind")),
        };
        if task.description.is_empty() {
            return Err(corrupt("empty description"));
        }
        task.done = done;
        Ok(task)
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.done { 'X' } else { ' ' };
        write!(f, "[{}][{}] {}", self.kind.letter(), mark, self.description)?;
        match &self.kind {
            TaskKind::ToDo => Ok(()),
            TaskKind::Deadline { due } => write!(f, " (by: {})", due.format(DISPLAY_FORMAT)),
            TaskKind::Event { start, end } => write!(
                f,
                " (at: {} to {})",
                start.format(DISPLAY_FORMAT),
                end.format(DISPLAY_FORMAT)
            ),
        }
    }
}

fn parse_time(raw: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(raw.trim(), INPUT_FORMAT).ok()
}

fn parse_window(raw: &str) -> Option<(NaiveDateTime, NaiveDateTime)> {
    let mut bounds = raw.trim().split(WINDOW_SEPARATOR);
    let start = parse_time(bounds.next()?)?;
    let end = parse_time(bounds.next()?)?;
    if bounds.next().is_some() {
        return None;
    }
    Some((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn todo_display_and_line() {
        let task = Task::todo("read book");
        assert_eq!(task.to_string(), "[T][ ] read book");
        assert_eq!(task.to_file_line(), "T / 0 / read book\n");
    }

    #[test]
    fn deadline_display_uses_month_name() {
        let mut task = Task::deadline("submit ", " 2019-12-01 18:00").unwrap();
        task.mark_done();
        assert_eq!(task.to_string(), "[D][X] submit (by: Dec 01 2019 18:00)");
        assert_eq!(task.to_file_line(), "D / 1 / submit / 2019-12-01 18:00\n");
    }

    #[test]
    fn event_display_shows_window() {
        let task = Task::event("party", "2019-12-01 18:00 to 2019-12-01 20:00").unwrap();
        assert_eq!(
            task.to_string(),
            "[E][ ] party (at: Dec 01 2019 18:00 to Dec 01 2019 20:00)"
        );
        assert!(task.due().is_none());
    }

    #[test]
    fn bad_times_are_rejected() {
        assert!(matches!(
            Task::deadline("x", "tomorrow"),
            Err(Error::InvalidTimeFormat {
                expected: TIME_PATTERN
            })
        ));
        assert!(matches!(
            Task::event("x", "2019-12-01 18:00"),
            Err(Error::InvalidTimeFormat {
                expected: WINDOW_PATTERN
            })
        ));
        assert!(Task::event("x", "2019-12-01 18:00 to 2019-12-01 19:00 to 2019-12-01 20:00").is_err());
    }

    #[test]
    fn mark_done_is_idempotent() {
        let mut task = Task::todo("laundry");
        task.mark_done();
        let once = task.clone();
        task.mark_done();
        assert_eq!(task, once);
    }

    #[test]
    fn keyword_match_is_case_sensitive() {
        let task = Task::todo("read Book");
        assert!(task.contains_keyword("Book"));
        assert!(!task.contains_keyword("book"));
    }

    #[test]
    fn file_line_round_trips_every_kind() {
        let mut event = Task::event("a / b", "2020-01-01 09:00 to 2020-01-01 10:30").unwrap();
        event.mark_done();
        let tasks = [
            Task::todo("plain"),
            Task::deadline("due soon", "2021-06-30 23:59").unwrap(),
            event,
        ];
        for task in tasks {
            let line = task.to_file_line();
            let back = Task::from_file_line(line.trim_end_matches('\n')).unwrap();
            assert_eq!(back, task);
        }
    }

    #[test]
    fn corrupt_lines_are_reported() {
        for line in ["X / 0 / what", "T / 2 / bad flag", "D / 0 / no time", "T"] {
            assert!(
                matches!(Task::from_file_line(line), Err(Error::CorruptRecord { .. })),
                "{line}"
            );
        }
    }
}
