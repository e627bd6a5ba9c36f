//! Typed commands and their execution.
//!
//! A [`Command`] carries everything captured at parse time. `execute` applies
//! it to a [`TaskList`] and its [`Storage`] together and returns the
//! response text. Storage is written before the list grows or shrinks, so a
//! failed write leaves the list length unchanged.

use serde::Serialize;

use crate::error::{Error, Result};
use crate::storage::Storage;
use crate::task::Task;
use crate::task_list::TaskList;

const LIST_HEADER: &str = "Here are the tasks in your list:\n";
const FIND_HEADER: &str = "Here are the tasks I found:\n";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "command", rename_all = "snake_case")]
pub enum Command {
    Exit,
    /// Show the list, leaving out tasks whose kind letter is in `hidden`
    List {
        hidden: Vec<char>,
    },
    Done {
        index: usize,
    },
    Delete {
        index: usize,
    },
    Add {
        task: Task,
    },
    Find {
        keyword: String,
    },
    Sort,
    ClearDone,
}

impl Command {
    /// Short name used in logs and JSON output
    pub fn name(&self) -> &'static str {
        match self {
            Command::Exit => "bye",
            Command::List { .. } => "list",
            Command::Done { .. } => "done",
            Command::Delete { .. } => "delete",
            Command::Add { .. } => "add",
            Command::Find { .. } => "find",
            Command::Sort => "sort",
            Command::ClearDone => "clear done",
        }
    }

    /// Whether the session keeps reading commands after this one
    pub fn continues_session(&self) -> bool {
        !matches!(self, Command::Exit)
    }

    pub fn execute(&self, tasks: &mut TaskList, storage: &Storage) -> Result<String> {
        match self {
            Command::Exit => Ok("Bye. Hope to see you again soon!\n".to_string()),
            Command::List { hidden } => Ok(with_listing(
                LIST_HEADER.to_string(),
                tasks.render_filtered(|task| !hidden.contains(&task.kind.letter())),
            )),
            Command::Find { keyword } => Ok(with_listing(
                FIND_HEADER.to_string(),
                tasks.render_filtered(|task| task.contains_keyword(keyword)),
            )),
            Command::Add { task } => add(tasks, storage, task),
            Command::Delete { index } => delete(tasks, storage, *index),
            Command::Done { index } => mark_done(tasks, storage, *index),
            Command::Sort => sort(tasks, storage),
            Command::ClearDone => clear_done(tasks, storage),
        }
    }
}

fn add(tasks: &mut TaskList, storage: &Storage, task: &Task) -> Result<String> {
    storage.append(task)?;
    tasks.add(task.clone());
    Ok(format!(
        "Got it. I've added this task:\n  {task}\nNow you have {} tasks in the list.\n",
        tasks.len()
    ))
}

fn delete(tasks: &mut TaskList, storage: &Storage, index: usize) -> Result<String> {
    // The list may have shrunk since the command was parsed.
    tasks.get(index)?;
    storage.remove_at(index)?;
    let task = tasks.remove_at(index)?;
    Ok(format!(
        "Noted. I've removed this task:\n  {task}\nNow you have {} tasks in the list.\n",
        tasks.len()
    ))
}

fn mark_done(tasks: &mut TaskList, storage: &Storage, index: usize) -> Result<String> {
    let task = tasks.get_mut(index)?;
    task.mark_done();
    let shown = task.to_string();
    storage.rewrite_all(tasks.as_slice())?;
    Ok(format!("Nice! I've marked this task as done:\n  {shown}\n"))
}

/// Deadlines by due time first, then everything else in its existing order.
fn sort(tasks: &mut TaskList, storage: &Storage) -> Result<String> {
    let (mut deadlines, others): (Vec<Task>, Vec<Task>) = tasks
        .iter()
        .cloned()
        .partition(|task| task.due().is_some());
    // sort_by_key is stable, so equal due times keep their order.
    deadlines.sort_by_key(|task| task.due());

    let sorted: Vec<Task> = deadlines.into_iter().chain(others).collect();
    storage.rewrite_all(&sorted)?;
    tasks.drain();
    for task in sorted {
        tasks.add(task);
    }

    let header = format!("Noted. I've sorted all the tasks with deadline.\n{LIST_HEADER}");
    Ok(with_listing(header, tasks.render_filtered(|_| true)))
}

fn clear_done(tasks: &mut TaskList, storage: &Storage) -> Result<String> {
    let mut index = 0;
    while index < tasks.len() {
        if tasks.get(index)?.done {
            storage.remove_at(index)?;
            tasks.remove_at(index)?;
        } else {
            index += 1;
        }
    }
    Ok("Noted. I've removed the tasks you've done.\n".to_string())
}

fn with_listing(mut message: String, listing: String) -> String {
    if !listing.is_empty() {
        message.push_str(&listing);
        message.push('\n');
    }
    message
}

/// Map a 1-based task number typed by the user to a list index
pub(crate) fn task_index(raw: &str) -> Result<usize> {
    match raw.trim().parse::<usize>() {
        Ok(number) if number > 0 => Ok(number - 1),
        _ => Err(Error::InvalidTaskNumber),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn setup() -> (TempDir, TaskList, Storage) {
        let temp = TempDir::new().unwrap();
        let storage = Storage::in_dir(temp.path());
        let tasks = TaskList::from_tasks(storage.load().unwrap());
        (temp, tasks, storage)
    }

    fn add_all(tasks: &mut TaskList, storage: &Storage, items: Vec<Task>) {
        for task in items {
            Command::Add { task }.execute(tasks, storage).unwrap();
        }
    }

    fn file_lines(storage: &Storage) -> Vec<String> {
        std::fs::read_to_string(storage.path())
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn add_reports_count() {
        let (_temp, mut tasks, storage) = setup();
        let message = Command::Add {
            task: Task::todo("read book"),
        }
        .execute(&mut tasks, &storage)
        .unwrap();
        assert_eq!(
            message,
            "Got it. I've added this task:\n  [T][ ] read book\nNow you have 1 tasks in the list.\n"
        );
        assert_eq!(file_lines(&storage), vec!["T / 0 / read book"]);
    }

    #[test]
    fn delete_revalidates_index() {
        let (_temp, mut tasks, storage) = setup();
        add_all(&mut tasks, &storage, vec![Task::todo("a"), Task::todo("b")]);

        let err = Command::Delete { index: 4 }
            .execute(&mut tasks, &storage)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTaskNumber));
        assert_eq!(tasks.len(), 2);
        assert_eq!(file_lines(&storage).len(), 2);

        let message = Command::Delete { index: 0 }
            .execute(&mut tasks, &storage)
            .unwrap();
        assert!(message.starts_with("Noted. I've removed this task:\n  [T][ ] a\n"));
        assert_eq!(file_lines(&storage), vec!["T / 0 / b"]);
    }

    #[test]
    fn done_twice_writes_same_content() {
        let (_temp, mut tasks, storage) = setup();
        add_all(&mut tasks, &storage, vec![Task::todo("a")]);

        Command::Done { index: 0 }
            .execute(&mut tasks, &storage)
            .unwrap();
        let first = file_lines(&storage);
        Command::Done { index: 0 }
            .execute(&mut tasks, &storage)
            .unwrap();

        assert_eq!(file_lines(&storage), first);
        assert_eq!(first, vec!["T / 1 / a"]);
    }

    #[test]
    fn list_hides_kinds() {
        let (_temp, mut tasks, storage) = setup();
        add_all(
            &mut tasks,
            &storage,
            vec![
                Task::todo("a"),
                Task::deadline("b", "2020-01-01 10:00").unwrap(),
            ],
        );
        let message = Command::List { hidden: vec!['T'] }
            .execute(&mut tasks, &storage)
            .unwrap();
        assert_eq!(
            message,
            "Here are the tasks in your list:\n1.[D][ ] b (by: Jan 01 2020 10:00)\n"
        );
    }

    #[test]
    fn sort_orders_deadlines_first() {
        let (_temp, mut tasks, storage) = setup();
        add_all(
            &mut tasks,
            &storage,
            vec![
                Task::todo("t1"),
                Task::deadline("late", "2021-05-01 10:00").unwrap(),
                Task::event("e1", "2020-01-01 10:00 to 2020-01-01 11:00").unwrap(),
                Task::deadline("early", "2020-05-01 10:00").unwrap(),
                Task::todo("t2"),
                Task::deadline("late twin", "2021-05-01 10:00").unwrap(),
            ],
        );

        Command::Sort.execute(&mut tasks, &storage).unwrap();

        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["early", "late", "late twin", "t1", "e1", "t2"]);
        let reloaded = storage.load().unwrap();
        assert_eq!(reloaded, tasks.as_slice());
    }

    #[test]
    fn clear_done_keeps_pending_in_order() {
        let (_temp, mut tasks, storage) = setup();
        add_all(
            &mut tasks,
            &storage,
            vec![
                Task::todo("x"),
                Task::todo("keep 1"),
                Task::todo("y"),
                Task::todo("z"),
                Task::todo("keep 2"),
            ],
        );
        for index in [0, 2, 3] {
            Command::Done { index }
                .execute(&mut tasks, &storage)
                .unwrap();
        }

        Command::ClearDone.execute(&mut tasks, &storage).unwrap();

        let order: Vec<&str> = tasks.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(order, vec!["keep 1", "keep 2"]);
        assert_eq!(file_lines(&storage), vec!["T / 0 / keep 1", "T / 0 / keep 2"]);
    }

    #[test]
    fn only_exit_ends_session() {
        assert!(!Command::Exit.continues_session());
        assert!(Command::Sort.continues_session());
    }

    #[test]
    fn task_index_is_one_based() {
        assert_eq!(task_index("1").unwrap(), 0);
        assert!(task_index("0").is_err());
        assert!(task_index("-2").is_err());
        assert!(task_index("two").is_err());
    }
}
