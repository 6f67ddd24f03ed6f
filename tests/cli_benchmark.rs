//! CLI integration tests
//!
//! Drive the compiled binary and check the stdout/stderr/exit-code contract.

#![cfg(feature = "cli")]

mod common;

use common::{is_timing_line, write_pattern_image, ALL_TASKS};
use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn run_cli<I, S>(args: I) -> Output
where
    I: IntoIterator<Item = S>,
    S: AsRef<std::ffi::OsStr>,
{
    Command::new(env!("CARGO_BIN_EXE_imgop-bench"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .expect("Failed to execute CLI")
}

fn stdout_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr_of(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn test_resize_prints_single_timing_line() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_pattern_image(temp_dir.path(), "input.png", 100, 100);

    let output = run_cli([Path::new("resize").as_os_str(), input.as_os_str()]);

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr_of(&output));
    let stdout = stdout_of(&output);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 1, "stdout: {:?}", stdout);
    assert!(is_timing_line(lines[0]), "unexpected timing line {:?}", lines[0]);
    assert!(stdout.ends_with('\n'));
}

#[test]
fn test_every_task_succeeds() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_pattern_image(temp_dir.path(), "pattern.png", 64, 48);

    for task in ALL_TASKS {
        let output = run_cli([Path::new(task).as_os_str(), input.as_os_str()]);
        assert_eq!(
            output.status.code(),
            Some(0),
            "task {} failed: {}",
            task,
            stderr_of(&output)
        );
        let stdout = stdout_of(&output);
        assert!(is_timing_line(stdout.trim_end()), "task {} printed {:?}", task, stdout);
    }
}

#[test]
fn test_missing_file_fails_with_path_on_stderr() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let missing = temp_dir.path().join("does_not_exist.png");

    let output = run_cli([Path::new("blur").as_os_str(), missing.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    let expected = format!("Failed to load image: {}", missing.display());
    assert!(
        stderr_of(&output).contains(&expected),
        "stderr: {}",
        stderr_of(&output)
    );
}

#[test]
fn test_corrupt_file_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let corrupt = temp_dir.path().join("corrupt.jpg");
    std::fs::write(&corrupt, [0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10]).unwrap();

    let output = run_cli([Path::new("GaussianBlur").as_os_str(), corrupt.as_os_str()]);

    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr_of(&output).contains("Failed to load image"));
}

#[test]
fn test_missing_arguments() {
    let output = run_cli(Vec::<&str>::new());
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr_of(&output).contains("Missing required arguments"));

    let output = run_cli(["blur"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(!stderr_of(&output).is_empty());
}

#[test]
fn test_unknown_task() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_pattern_image(temp_dir.path(), "input.png", 16, 16);

    let output = run_cli([Path::new("foo").as_os_str(), input.as_os_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(output.stdout.is_empty());
    assert!(stderr_of(&output).contains("foo"));
}

#[test]
fn test_task_names_are_case_sensitive() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_pattern_image(temp_dir.path(), "input.png", 16, 16);

    let output = run_cli([Path::new("canny").as_os_str(), input.as_os_str()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr_of(&output).contains("canny"));
}

#[test]
fn test_help_and_version() {
    let output = run_cli(["--help"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains("TASK"));

    let output = run_cli(["--version"]);
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout_of(&output).contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_list_tasks() {
    let output = run_cli(["--list-tasks"]);
    assert_eq!(output.status.code(), Some(0));

    let stdout = stdout_of(&output);
    let names: Vec<&str> = stdout
        .lines()
        .filter_map(|line| line.split_whitespace().next())
        .collect();
    assert_eq!(names, ALL_TASKS);
}

#[test]
fn test_show_config_is_json() {
    let output = run_cli(["--show-config"]);
    assert_eq!(output.status.code(), Some(0));

    let value: serde_json::Value =
        serde_json::from_slice(&output.stdout).expect("--show-config must print JSON");
    assert_eq!(value["blur_size"], 11);
    assert_eq!(value["resize_width"], 2000);
    assert_eq!(value["resize_height"], 2000);
}

#[test]
fn test_verbose_logging_stays_off_stdout() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let input = write_pattern_image(temp_dir.path(), "input.png", 32, 32);

    let output = run_cli([
        Path::new("-vv").as_os_str(),
        Path::new("cvtColor").as_os_str(),
        input.as_os_str(),
    ]);
    assert_eq!(output.status.code(), Some(0));
    let stdout = stdout_of(&output);
    assert_eq!(stdout.lines().count(), 1);
    assert!(is_timing_line(stdout.trim_end()));
}
