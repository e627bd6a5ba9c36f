mod support;

use predicates::str::contains;
use serde_json::Value;

use support::{workdone_cmd, TestDir};

#[test]
fn workdone_help_works() {
    let dir = TestDir::new();
    workdone_cmd(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("personal task tracker"));
}

#[test]
fn subcommand_help_works() {
    let dir = TestDir::new();
    for cmd in ["shell", "exec", "init", "path"] {
        workdone_cmd(&dir).arg(cmd).arg("--help").assert().success();
    }
}

#[test]
fn exec_adds_and_lists() {
    let dir = TestDir::new();

    workdone_cmd(&dir)
        .args(["exec", "todo read book", "list"])
        .assert()
        .success()
        .stdout(contains("Now you have 1 tasks in the list."))
        .stdout(contains("1.[T][ ] read book"));

    assert_eq!(dir.data_lines(), vec!["T / 0 / read book"]);
}

#[test]
fn exec_invalid_command_exits_with_user_error() {
    let dir = TestDir::new();

    workdone_cmd(&dir)
        .args(["exec", "todo ok", "frobnicate", "todo never"])
        .assert()
        .code(2)
        .stderr(contains("I don't know what that means"));

    assert_eq!(dir.data_lines(), vec!["T / 0 / ok"]);
}

#[test]
fn exec_json_reports_command() -> Result<(), Box<dyn std::error::Error>> {
    let dir = TestDir::new();

    let output = workdone_cmd(&dir)
        .args(["--json", "exec", "deadline submit /by 2019-12-01 18:00"])
        .output()?;
    assert!(output.status.success());

    let payload: Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(payload["schema_version"], "workdone.v1");
    assert_eq!(payload["command"], "add");
    assert_eq!(payload["status"], "success");
    assert_eq!(payload["data"]["continues"], true);
    Ok(())
}

#[test]
fn shell_reads_stdin_until_bye() {
    let dir = TestDir::new();

    workdone_cmd(&dir)
        .arg("shell")
        .write_stdin("todo a\ntodo b\ndelete 1\nbye\ntodo c\n")
        .assert()
        .success()
        .stdout(contains("____"))
        .stdout(contains("Noted. I've removed this task:\n  [T][ ] a"))
        .stdout(contains("Bye. Hope to see you again soon!"));

    assert_eq!(dir.data_lines(), vec!["T / 0 / b"]);
}

#[test]
fn file_flag_overrides_location() {
    let dir = TestDir::new();
    let custom = dir.path().join("elsewhere").join("tasks.txt");

    workdone_cmd(&dir)
        .arg("--file")
        .arg(&custom)
        .args(["exec", "todo x"])
        .assert()
        .success();

    assert_eq!(std::fs::read_to_string(&custom).unwrap(), "T / 0 / x\n");
    assert!(!dir.data_file().exists());
}

#[test]
fn init_writes_config_and_data_file() {
    let dir = TestDir::new();

    workdone_cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("workdone init: created"));

    assert!(dir.path().join(".workdone.toml").exists());
    assert!(dir.data_file().exists());

    workdone_cmd(&dir)
        .arg("init")
        .assert()
        .success()
        .stdout(contains("nothing to do"));
}

#[test]
fn path_prints_data_file() {
    let dir = TestDir::new();
    workdone_cmd(&dir)
        .arg("path")
        .assert()
        .success()
        .stdout(contains("workdone.txt"));
}
