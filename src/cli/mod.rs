//! Command-line interface for workdone
//!
//! This module defines the CLI structure using clap derive macros.
//! Each subcommand is defined in its own submodule.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::config::Config;
use crate::error::Result;
use crate::storage::Storage;

mod exec;
mod init;
mod shell;

pub use shell::run_loop;

/// workdone - personal task tracker
///
/// Keeps to-dos, deadlines and events in a plain text file and manages them
/// with short commands such as `todo read book` or `done 2`.
#[derive(Parser, Debug)]
#[command(name = "workdone")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Base directory holding `.workdone.toml` and `data/` (defaults to current directory)
    #[arg(long, global = true, env = "WORKDONE_DIR")]
    pub dir: Option<PathBuf>,

    /// Task file to use instead of the configured one
    #[arg(long, global = true, env = "WORKDONE_FILE")]
    pub file: Option<PathBuf>,

    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read commands from stdin until `bye` (the default)
    Shell,

    /// Run the given command lines in order and exit
    Exec {
        /// Command lines, e.g. "todo read book" "list"
        #[arg(required = true)]
        lines: Vec<String>,
    },

    /// Write a default config and create the task file
    Init,

    /// Print the resolved task file path
    Path,
}

/// Where a run reads its config and tasks from
#[derive(Debug, Clone)]
pub struct Context {
    pub base_dir: PathBuf,
    pub config: Config,
    pub storage: Storage,
}

impl Context {
    pub fn resolve(dir: Option<PathBuf>, file: Option<PathBuf>) -> Result<Self> {
        let base_dir = match dir {
            Some(dir) => dir,
            None => std::env::current_dir()?,
        };
        let config = Config::load_from_dir(&base_dir);
        let path = file.unwrap_or_else(|| config.data_file(&base_dir));
        Ok(Self {
            base_dir,
            config,
            storage: Storage::new(path),
        })
    }
}

impl Cli {
    /// Execute the CLI command
    pub fn run(self) -> Result<()> {
        let context = Context::resolve(self.dir, self.file)?;
        let options = crate::output::OutputOptions {
            json: self.json,
            quiet: self.quiet,
        };

        match self.command.unwrap_or(Commands::Shell) {
            Commands::Shell => shell::run(&context),
            Commands::Exec { lines } => exec::run(&context, &lines, options),
            Commands::Init => init::run(&context, options),
            Commands::Path => {
                #[derive(serde::Serialize)]
                struct PathReport<'a> {
                    path: &'a std::path::Path,
                }

                let path = context.storage.path();
                let human = format!("{}\n", path.display());
                crate::output::emit_success(options, "path", &PathReport { path }, Some(&human))
            }
        }
    }
}
