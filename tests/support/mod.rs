#![allow(dead_code)]

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;
use workdone::session::Session;

pub struct TestDir {
    dir: TempDir,
}

impl TestDir {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    pub fn data_file(&self) -> PathBuf {
        self.dir.path().join("data").join("workdone.txt")
    }

    pub fn session(&self) -> Session {
        Session::open_in(self.path()).expect("open session")
    }

    pub fn write_file(&self, rel_path: &str, contents: &str) -> std::io::Result<PathBuf> {
        let path = self.dir.path().join(rel_path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, contents)?;
        Ok(path)
    }

    pub fn write_config(&self, contents: &str) -> std::io::Result<PathBuf> {
        self.write_file(".workdone.toml", contents)
    }

    pub fn data_lines(&self) -> Vec<String> {
        fs::read_to_string(self.data_file())
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }
}

pub fn workdone_cmd(dir: &TestDir) -> Command {
    let mut cmd = Command::cargo_bin("workdone").expect("binary");
    cmd.current_dir(dir.path());
    cmd.env_remove("WORKDONE_DIR");
    cmd.env_remove("WORKDONE_FILE");
    cmd.env_remove("RUST_LOG");
    cmd
}
