//! End-to-end tests of the sinklog binary

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

fn sinklog(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("sinklog").unwrap();
    cmd.current_dir(dir.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_emit_console() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["emit", "warn", "disk", "almost", "full"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("[WARN] ["))
        .stdout(predicate::str::contains(
            "[emit.rs : commands::emit::execute : ",
        ))
        .stdout(predicate::str::ends_with("] : disk almost full\n"));
}

#[test]
fn test_emit_below_threshold_is_silent() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["--level", "error", "emit", "info", "quiet"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());
}

#[test]
fn test_emit_file_mode() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["--method", "file", "--dir", "out", "--file", "svc.log"])
        .args(["emit", "error", "boom 42"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let main = fs::read_to_string(dir.path().join("out/svc.log")).unwrap();
    let err = fs::read_to_string(dir.path().join("out/svc_err.log")).unwrap();
    assert!(main.starts_with("[ERROR] ["));
    assert!(main.ends_with("] : boom 42\n"));
    assert_eq!(main, err);
}

#[test]
fn test_config_file_in_working_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("sinklog.toml"),
        "method = \"file\"\nlevel = \"debug\"\ndirectory = \"logs\"\nfile_name = \"app.log\"\n",
    )
    .unwrap();

    sinklog(&dir).args(["emit", "debug", "from config"]).assert().success();

    let main = fs::read_to_string(dir.path().join("logs/app.log")).unwrap();
    assert!(main.contains("] : from config"));
    let err = fs::read_to_string(dir.path().join("logs/app_err.log")).unwrap();
    assert!(err.is_empty());
}

#[test]
fn test_fatal_exits_after_writing() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["--method", "file", "emit", "fatal", "cannot continue"])
        .assert()
        .code(1);

    let main = fs::read_to_string(dir.path().join("logs/app.log")).unwrap();
    assert!(main.starts_with("[FATAL] ["));
    assert!(main.ends_with("] : cannot continue\n"));
    let err = fs::read_to_string(dir.path().join("logs/app_err.log")).unwrap();
    assert_eq!(main, err);
}

#[test]
fn test_panic_unwinds_with_message() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["--method", "file", "emit", "panic", "state corrupted"])
        .assert()
        .code(101)
        .stderr(predicate::str::contains("panic: state corrupted"));

    let main = fs::read_to_string(dir.path().join("logs/app.log")).unwrap();
    assert!(main.starts_with("[PANIC] ["));
}

#[test]
fn test_invalid_method_and_level() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["--method", "syslog", "emit", "info", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid output method: syslog"));

    sinklog(&dir)
        .args(["--level", "loud", "emit", "info", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid log level: loud"));

    sinklog(&dir)
        .args(["emit", "notice", "x"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid log level: notice"));
}

#[test]
fn test_tail_with_grep() {
    let dir = TempDir::new().unwrap();
    for message in ["alpha one", "beta two", "alpha three"] {
        sinklog(&dir)
            .args(["--method", "file", "emit", "info", message])
            .assert()
            .success();
    }

    sinklog(&dir)
        .args(["--method", "file", "tail", "-n", "2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("beta two"))
        .stdout(predicate::str::contains("alpha three"))
        .stdout(predicate::str::contains("alpha one").not());

    sinklog(&dir)
        .args(["--method", "file", "--json", "tail", "--grep", "^\\[INFO\\].*alpha"])
        .assert()
        .success()
        .stdout(predicate::str::contains("alpha one"))
        .stdout(predicate::str::contains("beta two").not());
}

#[test]
fn test_tail_continues_into_backups() {
    let dir = TempDir::new().unwrap();
    for message in ["first", "second", "third", "fourth"] {
        sinklog(&dir)
            .args(["--method", "file", "--max-size", "10", "emit", "info", message])
            .assert()
            .success();
    }

    // Every emit after the first rotated, so the current file holds one line
    sinklog(&dir)
        .args(["--method", "file", "--max-size", "10", "tail", "-n", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("first").not())
        .stdout(predicate::str::contains("second"))
        .stdout(predicate::str::contains("third"))
        .stdout(predicate::str::contains("fourth"));
}

#[test]
fn test_tail_requires_file_method() {
    let dir = TempDir::new().unwrap();

    sinklog(&dir)
        .args(["tail"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("tail needs the file output method"));
}

#[test]
fn test_check_json_lists_backups() {
    let dir = TempDir::new().unwrap();
    for _ in 0..3 {
        sinklog(&dir)
            .args(["--method", "file", "--max-size", "10", "emit", "error", "rotate me"])
            .assert()
            .success();
    }

    let output = sinklog(&dir)
        .args(["--method", "file", "--max-size", "10", "--json", "check"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["method"], "file");
    assert_eq!(json["threshold"], "info");
    assert!(json["files"]["directory"].as_str().unwrap().ends_with("logs"));
    assert_eq!(json["files"]["max_file_size"], 10);
    assert_eq!(json["files"]["main"]["exists"], true);
    assert_eq!(json["files"]["main"]["backups"].as_array().unwrap().len(), 2);
    assert_eq!(json["files"]["error"]["backups"].as_array().unwrap().len(), 2);
}

#[test]
fn test_check_console_has_no_files() {
    let dir = TempDir::new().unwrap();

    let output = sinklog(&dir)
        .args(["--json", "check"])
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let json: serde_json::Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(json["method"], "console");
    assert!(json.get("files").is_none());
}
