//! workdone init command implementation
//!
//! Writes a default `.workdone.toml` and creates the task file.

use std::path::{Path, PathBuf};

use crate::config::{Config, CONFIG_FILE};
use crate::error::{Error, Result};
use crate::output::{emit_success, OutputOptions};

use super::Context;

#[derive(serde::Serialize)]
struct InitReport {
    dir: PathBuf,
    data_file: PathBuf,
    created: InitCreated,
    tasks: usize,
}

#[derive(serde::Serialize)]
struct InitCreated {
    config: bool,
    data_file: bool,
}

pub fn run(context: &Context, options: OutputOptions) -> Result<()> {
    let created_config = ensure_config(&context.base_dir)?;
    let data_file = context.storage.path().to_path_buf();
    let created_data_file = !data_file.exists();
    let tasks = context.storage.load()?.len();

    let report = InitReport {
        dir: context.base_dir.clone(),
        data_file: data_file.clone(),
        created: InitCreated {
            config: created_config,
            data_file: created_data_file,
        },
        tasks,
    };

    let mut created_items = Vec::new();
    if created_config {
        created_items.push(CONFIG_FILE.to_string());
    }
    if created_data_file {
        created_items.push(data_file.display().to_string());
    }

    let human = if created_items.is_empty() {
        format!("workdone init: nothing to do ({tasks} tasks)\n")
    } else {
        format!("workdone init: created {}\n", created_items.join(", "))
    };

    emit_success(options, "init", &report, Some(human.as_str()))
}

fn ensure_config(base_dir: &Path) -> Result<bool> {
    let config_path = base_dir.join(CONFIG_FILE);
    if config_path.exists() {
        if !config_path.is_file() {
            return Err(Error::InvalidConfig(format!(
                "{CONFIG_FILE} exists but is not a file: {}",
                config_path.display()
            )));
        }
        return Ok(false);
    }

    std::fs::create_dir_all(base_dir)?;
    Config::default().save(&config_path)?;
    Ok(true)
}
