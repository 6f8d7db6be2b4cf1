// End-to-end runs of the launcher binary
#![cfg(unix)]

use std::fs;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

const LAUNCHER: &str = env!("CARGO_BIN_EXE_ambassador-launcher");

fn launcher(config_dir: &Path) -> Command {
    let mut cmd = Command::new(LAUNCHER);
    for var in [
        "AMBASSADOR_DRAIN_TIME",
        "AMBASSADOR_SHUTDOWN_TIME",
        "AMBASSADOR_ENVOY_BINARY",
        "AMBASSADOR_REQUIRE_CONFIG",
        "RESTART_EPOCH",
    ] {
        cmd.env_remove(var);
    }
    cmd.env("AMBASSADOR_CONFIG_DIR", config_dir)
        .env("RUST_LOG", "off");
    cmd
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

#[test]
fn test_execs_proxy_with_newest_config() {
    let dir = tempdir().expect("tempdir");
    for name in ["envoy1.json", "envoy2.json", "envoy10.json"] {
        fs::write(dir.path().join(name), b"{}").expect("write");
    }

    // echo stands in for envoy: whatever it prints is the argv it received
    let output = launcher(dir.path())
        .env("AMBASSADOR_ENVOY_BINARY", "/bin/echo")
        .env("AMBASSADOR_DRAIN_TIME", "30")
        .env("RESTART_EPOCH", "2")
        .output()
        .expect("run launcher");

    assert!(output.status.success());
    assert_eq!(
        stdout(&output),
        format!(
            "--allow-deprecated-v1-api -c {} --restart-epoch 2 --drain-time-s 30 --parent-shutdown-time-s 10\n",
            dir.path().join("envoy10.json").display()
        )
    );
}

#[test]
fn test_successful_launch_writes_nothing_to_stderr() {
    let dir = tempdir().expect("tempdir");
    fs::write(dir.path().join("envoy3.json"), b"{}").expect("write");

    let output = launcher(dir.path())
        .env_remove("RUST_LOG")
        .env("AMBASSADOR_ENVOY_BINARY", "/bin/true")
        .output()
        .expect("run launcher");

    assert!(output.status.success());
    assert!(
        output.stderr.is_empty(),
        "unexpected stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn test_exit_code_is_the_proxy_exit_code() {
    let dir = tempdir().expect("tempdir");
    let output = launcher(dir.path())
        .env("AMBASSADOR_ENVOY_BINARY", "/bin/false")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_missing_proxy_binary_exits_127() {
    let dir = tempdir().expect("tempdir");
    let output = launcher(dir.path())
        .env("AMBASSADOR_ENVOY_BINARY", dir.path().join("envoy"))
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(127));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Error:"));
}

#[test]
fn test_dry_run_with_empty_directory() {
    let dir = tempdir().expect("tempdir");
    let output = launcher(dir.path())
        .args(["--dry-run", "--json"])
        .output()
        .expect("run launcher");

    assert!(output.status.success());
    let plan: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json plan");
    assert_eq!(plan["program"], "/usr/local/bin/envoy");
    assert_eq!(plan["args"][1], "-c");
    assert_eq!(plan["args"][2], "");
    assert_eq!(plan["args"][4], "");
    assert_eq!(plan["args"][6], "5");
}

#[test]
fn test_require_config_fails_before_exec() {
    let dir = tempdir().expect("tempdir");
    let output = launcher(dir.path())
        .env("AMBASSADOR_ENVOY_BINARY", "/bin/echo")
        .env("AMBASSADOR_REQUIRE_CONFIG", "true")
        .output()
        .expect("run launcher");

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
}
