use std::io::Write;
use std::process::Command;

fn tt() -> Command {
    Command::new(env!("CARGO_BIN_EXE_tt"))
}

fn write_source(dir: &std::path::Path, name: &str, contents: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    path
}

#[test]
fn segment_prints_one_line_per_segment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "a.rs", "fn a() {}\nfn b() {}\n");

    let output = tt()
        .args(["--lines-per-segment", "1", "segment"])
        .arg(&path)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert_eq!(stdout.lines().count(), 2);
    assert!(stdout.lines().next().unwrap().starts_with('0'));
}

#[test]
fn replay_completes_all_correct_segment() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "a.txt", "abc");

    let output = tt()
        .args([
            "replay",
            path.to_str().unwrap(),
            "--segment",
            "0",
            "--keys",
            "abc",
        ])
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("complete=true"));
    assert!(stdout.contains("correct_chars=3"));
    assert!(stdout.contains("wpm="));
}

#[test]
fn replay_appends_attempt_to_history() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "a.txt", "ab");
    let history = dir.path().join("attempts.json");

    let output = tt()
        .args([
            "replay",
            path.to_str().unwrap(),
            "--segment",
            "0",
            "--keys",
            "ab",
            "--history",
        ])
        .arg(&history)
        .output()
        .unwrap();
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(history.exists());
    let raw = std::fs::read_to_string(&history).unwrap();
    assert!(raw.contains("\"schemaVersion\""));
    assert!(raw.contains("\"attempts\""));
}

#[test]
fn replay_out_of_range_segment_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_source(dir.path(), "a.txt", "ab");

    let output = tt()
        .args([
            "replay",
            path.to_str().unwrap(),
            "--segment",
            "9",
            "--keys",
            "ab",
        ])
        .output()
        .unwrap();
    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("out of range"));
}
