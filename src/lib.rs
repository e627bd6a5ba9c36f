//! workdone - Personal Task Tracker Library
//!
//! This library provides the core of the workdone CLI: turning short text
//! commands into typed commands and keeping an ordered task list in sync with
//! a flat file.
//!
//! # Core Concepts
//!
//! - **Tasks**: to-dos, deadlines and events with a completion flag
//! - **Task list**: the in-memory ordered sequence, numbered from 1 for users
//! - **Storage**: one text file, one task per line, same order as the list
//! - **Commands**: parsed requests that update list and file together
//! - **Session**: owner of the list and its storage
//!
//! # Module Organization
//!
//! - `cli`: Command-line interface using clap
//! - `command`: Command variants and their execution
//! - `config`: Configuration loading from `.workdone.toml`
//! - `error`: Error types and result aliases
//! - `output`: JSON and human output helpers
//! - `parser`: Text grammar for commands
//! - `session`: List + storage owner used by every driver
//! - `storage`: Flat-file persistence
//! - `task`: Task model
//! - `task_list`: Ordered in-memory list

pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod output;
pub mod parser;
pub mod session;
pub mod storage;
pub mod task;
pub mod task_list;

pub use error::{Error, Result};
