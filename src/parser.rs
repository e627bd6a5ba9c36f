//! Command-line grammar.
//!
//! The first whitespace-delimited word picks the command; the rest of the
//! line is handed to that command's rule. Literal commands (`bye`, `list`,
//! `sort`, `clear done`) must make up the whole trimmed line.

use crate::command::{task_index, Command};
use crate::error::{Error, Result};
use crate::task::{Task, TaskKind, TIME_PATTERN, WINDOW_PATTERN};

/// Which timed task a `deadline`/`event` line builds
#[derive(Debug, Clone, Copy)]
enum Timed {
    Deadline,
    Event,
}

impl Timed {
    fn command(self) -> &'static str {
        match self {
            Timed::Deadline => "deadline",
            Timed::Event => "event",
        }
    }

    fn separator(self) -> &'static str {
        match self {
            Timed::Deadline => "/by",
            Timed::Event => "/at",
        }
    }

    fn pattern(self) -> &'static str {
        match self {
            Timed::Deadline => TIME_PATTERN,
            Timed::Event => WINDOW_PATTERN,
        }
    }

    fn missing(self, field: &'static str) -> Error {
        Error::MissingDetail {
            field,
            command: self.command(),
            usage: format!(
                "{} <task description> {} {}",
                self.command(),
                self.separator(),
                self.pattern()
            ),
        }
    }
}

/// Parse one raw input line into a [`Command`]
pub fn parse(raw: &str) -> Result<Command> {
    let line = raw.trim();
    match line {
        "bye" => return Ok(Command::Exit),
        "list" => return Ok(Command::List { hidden: Vec::new() }),
        "sort" => return Ok(Command::Sort),
        "clear done" => return Ok(Command::ClearDone),
        _ => {}
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "done" => Ok(Command::Done {
            index: task_index(rest)?,
        }),
        "delete" => Ok(Command::Delete {
            index: task_index(rest)?,
        }),
        "todo" => {
            if rest.is_empty() {
                return Err(Error::MissingDetail {
                    field: "description",
                    command: "todo",
                    usage: "todo <task description>".to_string(),
                });
            }
            Ok(Command::Add {
                task: Task::todo(rest),
            })
        }
        "deadline" => parse_timed(rest, Timed::Deadline),
        "event" => parse_timed(rest, Timed::Event),
        "find" => {
            if rest.is_empty() {
                return Err(Error::MissingDetail {
                    field: "keyword",
                    command: "find",
                    usage: "find <keyword>".to_string(),
                });
            }
            Ok(Command::Find {
                keyword: rest.to_string(),
            })
        }
        "hide" => parse_hidden(rest),
        _ => Err(Error::InvalidCommand),
    }
}

fn parse_timed(rest: &str, timed: Timed) -> Result<Command> {
    if rest.is_empty() {
        return Err(timed.missing("description"));
    }

    let parts: Vec<&str> = rest.split(timed.separator()).collect();
    let (description, time) = match parts.as_slice() {
        [_] => return Err(timed.missing("time")),
        [description, time] => (description.trim(), time.trim()),
        _ => {
            return Err(Error::MultipleTimeSlots {
                command: timed.command(),
            })
        }
    };
    if description.is_empty() {
        return Err(timed.missing("description"));
    }
    if time.is_empty() {
        return Err(timed.missing("time"));
    }

    let task = match timed {
        Timed::Deadline => Task::deadline(description, time)?,
        Timed::Event => Task::event(description, time)?,
    };
    Ok(Command::Add { task })
}

fn parse_hidden(rest: &str) -> Result<Command> {
    if rest.is_empty() {
        return Err(Error::MissingDetail {
            field: "kind",
            command: "hide",
            usage: "hide <T|D|E>...".to_string(),
        });
    }

    let mut hidden = Vec::new();
    for kind in rest.split(|ch: char| ch.is_whitespace() || ch == ',') {
        if kind.is_empty() {
            continue;
        }
        let letter =
            TaskKind::from_letter(kind).ok_or_else(|| Error::InvalidTaskKind(kind.to_string()))?;
        if !hidden.contains(&letter) {
            hidden.push(letter);
        }
    }
    Ok(Command::List { hidden })
}
