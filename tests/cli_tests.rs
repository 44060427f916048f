use std::fs;
use std::io::Write;
use std::process::{Command, Stdio};

const BIN: &str = env!("CARGO_BIN_EXE_micro-logger");

#[test]
fn queued_lines_land_before_process_exit() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("logs").join("exit.log");

    let mut child = Command::new(BIN)
        .current_dir(dir.path())
        .args(["--log-file", path.to_str().unwrap(), "--sender", "exit"])
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .unwrap();

    {
        let mut stdin = child.stdin.take().unwrap();
        for i in 0..500 {
            writeln!(stdin, "line {i}").unwrap();
        }
    }

    let output = child.wait_with_output().unwrap();
    assert!(output.status.success());
    assert!(output.stdout.is_empty(), "file-only logging must not print");
    assert!(
        !String::from_utf8_lossy(&output.stderr).contains("Failed to write"),
        "unexpected write failure: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let content = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines.len(), 500);
    assert!(lines[0].ends_with("[INFO] [exit] line 0"));
    assert!(lines[499].ends_with("[INFO] [exit] line 499"));
}

#[test]
fn single_message_is_written_with_level() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("one.log");

    let output = Command::new(BIN)
        .current_dir(dir.path())
        .args([
            "--log-file",
            path.to_str().unwrap(),
            "--level",
            "success",
            "deploy",
            "finished",
        ])
        .output()
        .unwrap();
    assert!(output.status.success());

    let content = fs::read_to_string(&path).unwrap();
    assert!(content.trim_end().ends_with("[SUCCESS] deploy finished"));
}
