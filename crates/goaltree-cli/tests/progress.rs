use std::process::Command;

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
fn progress_reports_share_of_done_children() {
    let repo = TempDir::new().expect("repo");
    for child in ["a.one", "a.two", "a.three", "a.four"] {
        stdout(bin(&repo).args(["goals.json", "-n", child]).output().expect("new"));
    }
    stdout(bin(&repo).args(["goals.json", "-c", "a.one"]).output().expect("mark"));
    stdout(bin(&repo).args(["goals.json", "-c", "a.two"]).output().expect("mark"));

    let out = stdout(bin(&repo).args(["goals.json", "-p", "a"]).output().expect("progress"));
    assert_eq!(out, "50%\n");
}

#[test]
fn progress_of_explicit_goals_is_all_or_nothing() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a"]).output().expect("new"));
    stdout(bin(&repo).args(["goals.json", "-n", "b"]).output().expect("new"));
    stdout(bin(&repo).args(["goals.json", "-c", "a"]).output().expect("mark"));

    let done = stdout(bin(&repo).args(["goals.json", "-p", "a"]).output().expect("progress"));
    assert_eq!(done, "100%\n");
    let pending = stdout(bin(&repo).args(["goals.json", "-p", "b"]).output().expect("progress"));
    assert_eq!(pending, "0%\n");
}

#[test]
fn progress_of_missing_goal_names_the_specifier() {
    let repo = TempDir::new().expect("repo");
    stdout(bin(&repo).args(["goals.json", "-n", "a"]).output().expect("new"));

    let out = stdout(bin(&repo).args(["goals.json", "-p", "ghost"]).output().expect("progress"));
    assert_eq!(out, "No such goal to print progress: ghost\n");
}
