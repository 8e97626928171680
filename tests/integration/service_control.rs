#[path = "common/mod.rs"]
mod common;

use std::{fs, process::Command as StdCommand};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::tempdir;

#[test]
fn stop_without_a_pid_file_reports_already_stopped() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("already stopped"));
}

#[test]
fn stop_with_a_stale_pid_file_reports_already_stopped_and_cleans_up() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");
    fs::write(&pid_path, "999999").expect("failed to write stale pid");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("stop")
        .assert()
        .success()
        .stdout(predicate::str::contains("already stopped"));

    assert!(!pid_path.exists(), "stale pid file should be cleaned up");
}

#[cfg(target_os = "linux")]
#[test]
fn stop_terminates_a_running_daemon() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");

    let mut sleeper = StdCommand::new("sleep")
        .arg("30")
        .spawn()
        .expect("failed to spawn sleeper");
    fs::write(&pid_path, sleeper.id().to_string()).expect("failed to write pid file");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--pid-file")
        .arg(&pid_path)
        .args(["stop", "--timeout", "5s"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Stopped homecontrol"));

    let status = sleeper.wait().expect("failed to reap sleeper");
    assert!(!status.success(), "sleeper should have died to SIGINT");
}

#[test]
fn stop_reports_a_timeout_when_the_daemon_ignores_sigint() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");

    let mut stubborn = StdCommand::new("sh")
        .args(["-c", "trap '' INT; sleep 10"])
        .spawn()
        .expect("failed to spawn stubborn child");
    fs::write(&pid_path, stubborn.id().to_string()).expect("failed to write pid file");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--pid-file")
        .arg(&pid_path)
        .args(["stop", "--timeout", "500ms"])
        .assert()
        .success()
        .stdout(predicate::str::contains("did not exit within"));

    assert!(
        common::is_process_alive(stubborn.id()),
        "the daemon was not stopped, so it should still be alive"
    );

    stubborn.kill().expect("failed to kill stubborn child");
    stubborn.wait().expect("failed to reap stubborn child");
}

#[test]
fn start_launches_the_daemon_and_reports_success() {
    let temp = tempdir().expect("failed to create tempdir");
    let stub = common::write_stub_daemon(temp.path());
    let pid_path = temp.path().join(".homecontrol/homecontrol.pid");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--program")
        .arg(&stub)
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Started"));

    let pid = common::read_pid(&pid_path);
    assert!(common::is_process_alive(pid), "daemon should be running");

    common::kill_quietly(pid);
}

#[test]
fn start_reports_failure_when_the_launch_exits_nonzero() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .args(["--program", "false"])
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("Failed to start"));
}

#[test]
fn start_skips_the_launch_when_the_daemon_is_already_running() {
    let temp = tempdir().expect("failed to create tempdir");
    let pid_path = temp.path().join("homecontrol.pid");

    let mut sleeper = StdCommand::new("sleep")
        .arg("30")
        .spawn()
        .expect("failed to spawn sleeper");
    fs::write(&pid_path, sleeper.id().to_string()).expect("failed to write pid file");

    // The program is `false`; if the launch ran anyway the output would be a
    // failure report instead.
    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .args(["--program", "false"])
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .arg("start")
        .assert()
        .success()
        .stdout(predicate::str::contains("already running"));

    sleeper.kill().expect("failed to kill sleeper");
    sleeper.wait().expect("failed to reap sleeper");
}

#[cfg(target_os = "linux")]
#[test]
fn restart_stops_the_running_daemon_before_starting_a_new_one() {
    let temp = tempdir().expect("failed to create tempdir");
    let stub = common::write_stub_daemon(temp.path());
    let pid_path = temp.path().join(".homecontrol/homecontrol.pid");
    fs::create_dir_all(pid_path.parent().unwrap()).expect("failed to create pid dir");

    let mut old_daemon = StdCommand::new("sleep")
        .arg("30")
        .spawn()
        .expect("failed to spawn old daemon");
    fs::write(&pid_path, old_daemon.id().to_string()).expect("failed to write pid file");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--program")
        .arg(&stub)
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .args(["restart", "--timeout", "5s"])
        .output()
        .expect("failed to run restart");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stop_at = stdout
        .find("Stopped")
        .expect("restart should report the stop first");
    let start_at = stdout
        .find("Started")
        .expect("restart should report the start");
    assert!(
        stop_at < start_at,
        "stop must complete before start begins: {stdout}"
    );

    let status = old_daemon.wait().expect("failed to reap old daemon");
    assert!(!status.success(), "old daemon should have died to SIGINT");

    let new_pid = common::read_pid(&pid_path);
    assert!(common::is_process_alive(new_pid), "new daemon should be running");
    common::kill_quietly(new_pid);
}

#[test]
fn restart_runs_start_even_when_there_was_nothing_to_stop() {
    let temp = tempdir().expect("failed to create tempdir");
    let stub = common::write_stub_daemon(temp.path());
    let pid_path = temp.path().join(".homecontrol/homecontrol.pid");

    let output = Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--program")
        .arg(&stub)
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .arg("restart")
        .output()
        .expect("failed to run restart");

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stop_at = stdout
        .find("already stopped")
        .expect("restart should report the stop outcome first");
    let start_at = stdout
        .find("Started")
        .expect("restart should still start the daemon");
    assert!(stop_at < start_at);

    let pid = common::read_pid(&pid_path);
    common::kill_quietly(pid);
}

#[test]
fn reload_is_accepted_as_an_alias_for_restart() {
    let temp = tempdir().expect("failed to create tempdir");
    let stub = common::write_stub_daemon(temp.path());
    let pid_path = temp.path().join(".homecontrol/homecontrol.pid");

    Command::new(assert_cmd::cargo::cargo_bin!("hcctl"))
        .arg("--program")
        .arg(&stub)
        .arg("--pid-file")
        .arg(&pid_path)
        .arg("--working-dir")
        .arg(temp.path())
        .arg("reload")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("already stopped")
                .and(predicate::str::contains("Started")),
        );

    let pid = common::read_pid(&pid_path);
    common::kill_quietly(pid);
}
