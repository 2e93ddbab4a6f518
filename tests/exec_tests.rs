//! Exec command tests

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_exec_runs_command_and_prints_capture() {
    let env = TestEnv::new();
    env.write_unit_raw(
        &env.core_plugins_dir(),
        "tools",
        "commands:\n  - name: chief.hello\n    run: echo composed $((40 + 2))\n",
    );

    env.chief()
        .args(["exec", "chief.hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("composed 42"));
}

#[test]
fn test_exec_resolves_alias() {
    let env = TestEnv::new();
    env.write_unit_raw(
        &env.core_plugins_dir(),
        "tools",
        "commands:\n  - name: chief.hello\n    run: echo via alias\n",
    );
    env.write_config("CHIEF_CFG_ALIAS=\"cf\"\n");

    env.chief()
        .args(["exec", "cf.hello"])
        .assert()
        .success()
        .stdout(predicate::str::contains("via alias"));
}

#[test]
fn test_exec_unknown_command_fails() {
    let env = TestEnv::new();
    env.write_unit(&env.core_plugins_dir(), "tools", &["chief.real"]);

    env.chief()
        .args(["exec", "chief.imaginary"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown command: chief.imaginary"));
}

#[test]
fn test_exec_propagates_failure_exit() {
    let env = TestEnv::new();
    env.write_unit_raw(
        &env.core_plugins_dir(),
        "tools",
        "commands:\n  - name: chief.fail\n    run: exit 3\n",
    );

    env.chief()
        .args(["exec", "chief.fail"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("exited with status 3"));
}

#[test]
fn test_exec_timeout_kills_long_running_command() {
    let env = TestEnv::new();
    env.write_unit_raw(
        &env.core_plugins_dir(),
        "tools",
        "commands:\n  - name: chief.slow\n    run: sleep 30\n",
    );

    env.chief()
        .args(["exec", "chief.slow", "--timeout", "1"])
        .timeout(std::time::Duration::from_secs(15))
        .assert()
        .failure()
        .stderr(predicate::str::contains("timed out after 1s"));
}

#[test]
fn test_exec_yes_bypasses_confirmation() {
    let env = TestEnv::new();
    env.write_unit_raw(
        &env.core_plugins_dir(),
        "tools",
        "commands:\n  - name: chief.guarded\n    run: echo ran anyway\n    confirm: true\n",
    );

    env.chief()
        .args(["exec", "chief.guarded", "-y"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ran anyway"));
}
