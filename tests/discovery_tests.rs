//! Unit discovery order and filtering tests, through the list command

mod common;

use common::TestEnv;
use predicates::prelude::*;

#[test]
fn test_units_listed_in_lexicographic_order() {
    let env = TestEnv::new();
    env.write_unit(&env.core_plugins_dir(), "c_tools", &["chief.c"]);
    env.write_unit(&env.core_plugins_dir(), "a_tools", &["chief.a"]);
    env.write_unit(&env.core_plugins_dir(), "b_tools", &["chief.b"]);

    env.chief()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::function(|out: &str| {
            let a = out.find("a_tools");
            let b = out.find("b_tools");
            let c = out.find("c_tools");
            matches!((a, b, c), (Some(a), Some(b), Some(c)) if a < b && b < c)
        }));
}

#[test]
fn test_ordering_marker_forces_precedence() {
    let env = TestEnv::new();
    // both units claim the same command; the 00_ prefix must win
    env.write_unit(&env.core_plugins_dir(), "zz_late", &["chief.shared"]);
    env.write_unit(&env.core_plugins_dir(), "00_early", &["chief.shared"]);

    env.chief()
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("kept 00_early"));
}

#[test]
fn test_non_matching_files_ignored() {
    let env = TestEnv::new();
    env.write_unit(&env.core_plugins_dir(), "real", &["chief.x"]);
    std::fs::write(env.core_plugins_dir().join("README.md"), "# not a unit\n")
        .expect("write file");
    std::fs::write(
        env.core_plugins_dir().join("almost_chief-plugin.yml"),
        "commands: []\n",
    )
    .expect("write file");

    env.chief()
        .arg("reload")
        .assert()
        .success()
        .stdout(predicate::str::contains("1 unit(s)"));
}

#[test]
fn test_missing_user_plugins_dir_is_empty_not_error() {
    let env = TestEnv::new();
    env.write_unit(&env.core_plugins_dir(), "core", &["chief.x"]);
    env.write_config(&format!(
        "CHIEF_CFG_PLUGINS_PATH=\"{}\"\n",
        env.root.join("never_created").display()
    ));

    env.chief().arg("reload").assert().success();
}

#[test]
fn test_user_units_compose_after_core() {
    let env = TestEnv::new();
    env.write_unit(&env.core_plugins_dir(), "core", &["chief.core_cmd"]);
    env.write_unit(&env.user_plugins_dir(), "mine", &["chief.mine"]);
    env.write_config(&format!(
        "CHIEF_CFG_PLUGINS_PATH=\"{}\"\n",
        env.user_plugins_dir().display()
    ));

    env.chief()
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("core"))
        .stdout(predicate::str::contains("(user-local)"))
        .stdout(predicate::str::contains("mine"));
}
