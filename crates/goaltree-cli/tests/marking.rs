use std::fs;
use std::process::Command;

use serde_json::Value;
use tempfile::TempDir;

fn bin(repo: &TempDir) -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_goaltree"));
    cmd.current_dir(repo.path()).env("GOALTREE_HOME", repo.path());
    cmd
}

fn stdout(output: std::process::Output) -> String {
    assert!(output.status.success());
    String::from_utf8(output.stdout).expect("utf8")
}

#[test]
fn completing_all_children_completes_the_auto_parent() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a.b"]).output().expect("new"));
    stdout(bin(&repo).args(["goals.json", "-n", "a.c"]).output().expect("new"));
    stdout(bin(&repo).args(["goals.json", "-c", "a.b"]).output().expect("mark b"));
    stdout(bin(&repo).args(["goals.json", "-c", "a.c"]).output().expect("mark c"));

    let out = stdout(bin(&repo).args(["goals.json", "-p", "a"]).output().expect("progress"));
    assert_eq!(out, "100%\n");

    // The stored mode stays "auto"; only the explicit children changed.
    let text = fs::read_to_string(repo.path().join("goals.json")).expect("read");
    let data: Value = serde_json::from_str(&text).expect("json");
    assert_eq!(data[0]["done"], "auto");
    assert_eq!(data[0]["children"][0]["done"], true);
    assert_eq!(data[0]["children"][1]["done"], true);
}

#[test]
fn marking_an_auto_goal_is_refused() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a.b"]).output().expect("new"));

    let complete = stdout(bin(&repo).args(["goals.json", "-c", "a"]).output().expect("complete"));
    assert_eq!(
        complete,
        "Cannot mark autocomplete goal as done; must mark all children as done\n"
    );

    let incomplete = stdout(bin(&repo).args(["goals.json", "-i", "a"]).output().expect("incomplete"));
    assert_eq!(
        incomplete,
        "Cannot mark autocomplete goal as undone; must mark a child as undone\n"
    );
}

#[test]
fn unmarking_a_child_reopens_the_auto_parent() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a.b"]).output().expect("new"));
    stdout(bin(&repo).args(["goals.json", "-c", "a.b"]).output().expect("mark"));
    stdout(bin(&repo).args(["goals.json", "-i", "a.b"]).output().expect("unmark"));

    let out = stdout(bin(&repo).args(["goals.json", "-p", "a"]).output().expect("progress"));
    assert_eq!(out, "0%\n");
}

#[test]
fn marking_a_missing_goal_reports_it() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a"]).output().expect("new"));
    let out = stdout(bin(&repo).args(["goals.json", "-c", "nope"]).output().expect("mark"));
    assert_eq!(out, "No such goal to mark: nope\n");
}

#[test]
fn one_failed_operation_does_not_stop_the_others() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a.b"]).output().expect("new"));

    let out = stdout(
        bin(&repo)
            .args(["goals.json", "-d", "nope", "-c", "a", "-p", "a", "-l"])
            .output()
            .expect("combined"),
    );
    assert!(out.contains("No such goal to delete: nope"), "stdout: {out}");
    assert!(out.contains("Cannot mark autocomplete goal as done"), "stdout: {out}");
    assert!(out.contains("0%"), "stdout: {out}");
    assert!(out.contains("a (auto)"), "stdout: {out}");
}
