//! Common test utilities for Chief integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// Fixed unit filename suffix, as the binary expects it
pub const UNIT_SUFFIX: &str = "_chief-plugin.yaml";

/// A throwaway chief installation: root, core plugins dir, config file
pub struct TestEnv {
    /// Temporary directory backing the installation
    #[allow(dead_code)]
    pub temp: TempDir,
    pub root: PathBuf,
    pub config_path: PathBuf,
}

impl TestEnv {
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let root = temp.path().to_path_buf();
        std::fs::create_dir_all(root.join("libs/core/plugins"))
            .expect("Failed to create core plugins directory");
        let config_path = root.join("chief.conf");
        std::fs::write(&config_path, "").expect("Failed to write config file");
        Self {
            temp,
            root,
            config_path,
        }
    }

    /// Command with CHIEF_PATH/CHIEF_CONFIG pointing into this environment
    #[allow(deprecated)]
    pub fn chief(&self) -> Command {
        let mut cmd = Command::cargo_bin("chief").expect("chief binary");
        cmd.env("CHIEF_PATH", &self.root)
            .env("CHIEF_CONFIG", &self.config_path);
        cmd
    }

    pub fn core_plugins_dir(&self) -> PathBuf {
        self.root.join("libs/core/plugins")
    }

    /// User plugins directory wired into the config by [`Self::write_config`]
    pub fn user_plugins_dir(&self) -> PathBuf {
        self.root.join("user_plugins")
    }

    pub fn write_config(&self, content: &str) {
        std::fs::write(&self.config_path, content).expect("Failed to write config file");
    }

    pub fn read_config(&self) -> String {
        std::fs::read_to_string(&self.config_path).expect("Failed to read config file")
    }

    /// Write a minimal unit manifest declaring the given command names
    pub fn write_unit(&self, dir: &Path, name: &str, commands: &[&str]) {
        let mut body = String::from("commands:\n");
        for cmd in commands {
            body.push_str(&format!("  - name: {cmd}\n    run: \"true\"\n"));
        }
        if commands.is_empty() {
            body = "commands: []\n".to_string();
        }
        std::fs::create_dir_all(dir).expect("Failed to create unit directory");
        std::fs::write(dir.join(format!("{name}{UNIT_SUFFIX}")), body)
            .expect("Failed to write unit file");
    }

    /// Write a unit file with explicit YAML content
    pub fn write_unit_raw(&self, dir: &Path, name: &str, content: &str) {
        std::fs::create_dir_all(dir).expect("Failed to create unit directory");
        std::fs::write(dir.join(format!("{name}{UNIT_SUFFIX}")), content)
            .expect("Failed to write unit file");
    }
}

/// Init a git repository with a pinned initial branch
#[allow(dead_code)]
pub fn init_git_repo(path: &Path, branch: &str) -> git2::Repository {
    let mut opts = git2::RepositoryInitOptions::new();
    opts.initial_head(&format!("refs/heads/{branch}"));
    git2::Repository::init_opts(path, &opts).expect("Failed to init repository")
}

/// Write a file and commit it, returning the commit SHA
#[allow(dead_code)]
pub fn commit_file(repo: &git2::Repository, name: &str, content: &str, message: &str) -> String {
    let workdir = repo.workdir().expect("bare repository");
    std::fs::write(workdir.join(name), content).expect("Failed to write file");

    let mut index = repo.index().expect("index");
    index.add_path(Path::new(name)).expect("add");
    index.write().expect("index write");
    let tree_id = index.write_tree().expect("write tree");
    let tree = repo.find_tree(tree_id).expect("find tree");

    let sig = git2::Signature::now("Test", "test@test.com").expect("signature");
    let parent = repo.head().ok().and_then(|h| h.peel_to_commit().ok());
    let parents: Vec<&git2::Commit> = parent.iter().collect();
    repo.commit(Some("HEAD"), &sig, &sig, message, &tree, &parents)
        .expect("commit")
        .to_string()
}
