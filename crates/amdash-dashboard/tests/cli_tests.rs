/*
[INPUT]:  Built amdash binary
[OUTPUT]: Test results for the command-line surface
[POS]:    Integration tests - binary entry point
[UPDATE]: When subcommands or error reporting change
*/

use std::process::Command;

use uuid::Uuid;

fn amdash() -> Command {
    let data_dir = std::env::temp_dir().join(format!("amdash-cli-{}", Uuid::new_v4()));
    let mut command = Command::new(env!("CARGO_BIN_EXE_amdash"));
    command
        .env("AMDASH_DATA_DIR", &data_dir)
        .env("XDG_CONFIG_HOME", &data_dir)
        .env("RUST_LOG", "error");
    command
}

#[test]
fn help_lists_commands() {
    let output = amdash()
        .arg("--help")
        .output()
        .expect("Failed to start amdash binary");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for command in [
        "login",
        "logout",
        "whoami",
        "tracks",
        "select-track",
        "dashboard",
        "tasks",
        "submit",
        "mentees",
        "select-mentee",
        "review",
        "leaderboard",
    ] {
        assert!(stdout.contains(command), "missing {command} in:\n{stdout}");
    }
}

#[test]
fn dashboard_without_login_prints_recovery_hint() {
    let output = amdash()
        .args(["--api-url", "http://127.0.0.1:9", "dashboard"])
        .output()
        .expect("Failed to start amdash binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("not logged in"), "stderr: {stderr}");
    assert!(stderr.contains("amdash login"), "stderr: {stderr}");
}

#[test]
fn review_rejects_unknown_action() {
    let output = amdash()
        .args(["review", "1", "--action", "promote", "--feedback", "x"])
        .output()
        .expect("Failed to start amdash binary");

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("promote"), "stderr: {stderr}");
}
