//! Configuration init and reconciliation tests

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_config_init_writes_template() {
    let env = TestEnv::new();
    std::fs::remove_file(&env.config_path).expect("remove seeded config");

    env.chief().args(["config", "init"]).assert().success();

    let content = env.read_config();
    assert!(content.contains("CHIEF_CFG_PLUGINS_TYPE=\"local\""));
    assert!(content.contains("CHIEF_CFG_HINTS=true"));
}

#[test]
fn test_config_init_refuses_to_overwrite() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_ALIAS=\"cf\"\n");

    env.chief()
        .args(["config", "init"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));
    assert_eq!(env.read_config(), "CHIEF_CFG_ALIAS=\"cf\"\n");
}

#[test]
fn test_update_appends_missing_keys() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_VERBOSE=true\n");

    env.chief()
        .args(["config", "update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("add CHIEF_CFG_HINTS=true"));

    let content = env.read_config();
    // user override untouched, new keys present with defaults
    assert!(content.contains("CHIEF_CFG_VERBOSE=true"));
    assert!(content.contains("CHIEF_CFG_PLUGINS_GIT_BRANCH=\"main\""));
}

#[test]
fn test_update_migrates_renamed_keys() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_PLUGINS_ROOT=\"/opt/plugins\"\n");

    env.chief()
        .args(["config", "update"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "rename CHIEF_CFG_PLUGINS_ROOT -> CHIEF_CFG_PLUGINS_PATH",
        ));

    let content = env.read_config();
    assert!(content.contains("CHIEF_CFG_PLUGINS_PATH=\"/opt/plugins\""));
    assert!(!content.contains("CHIEF_CFG_PLUGINS_ROOT"));
}

#[test]
fn test_update_preserves_custom_keys_and_comments() {
    let env = TestEnv::new();
    env.write_config("# my own notes\nCUSTOM_KEY=\"z\"\n");

    env.chief().args(["config", "update"]).assert().success();

    let content = env.read_config();
    assert!(content.contains("# my own notes"));
    assert!(content.contains("CUSTOM_KEY=\"z\""));
}

#[test]
fn test_update_twice_is_noop() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_VERBOSE=true\n");

    env.chief().args(["config", "update"]).assert().success();
    let after_first = env.read_config();
    let backups_after_first = count_backups(&env);
    assert_eq!(backups_after_first, 1);

    env.chief()
        .args(["config", "update"])
        .assert()
        .success()
        .stdout(predicate::str::contains("up to date"));
    assert_eq!(env.read_config(), after_first);
    // no second backup: the no-op run never writes
    assert_eq!(count_backups(&env), 1);
}

#[test]
fn test_update_dry_run_writes_nothing() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_VERBOSE=true\n");

    env.chief()
        .args(["config", "update", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("dry run: nothing written"));

    assert_eq!(env.read_config(), "CHIEF_CFG_VERBOSE=true\n");
    assert_eq!(count_backups(&env), 0);
}

#[test]
fn test_update_no_backup_flag() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_VERBOSE=true\n");

    env.chief()
        .args(["config", "update", "--no-backup"])
        .assert()
        .success();
    assert_eq!(count_backups(&env), 0);
}

#[test]
fn test_update_respects_backup_config_key() {
    let env = TestEnv::new();
    env.write_config("CHIEF_CFG_CONFIG_BACKUP=false\n");

    env.chief().args(["config", "update"]).assert().success();
    assert_eq!(count_backups(&env), 0);
}

fn count_backups(env: &TestEnv) -> usize {
    std::fs::read_dir(&env.root)
        .expect("read root")
        .filter(|e| {
            e.as_ref()
                .expect("dir entry")
                .file_name()
                .to_string_lossy()
                .ends_with(".bak")
        })
        .count()
}
