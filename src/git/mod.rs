//! Git operations for the remote plugins working copy
//!
//! This module handles:
//! - Cloning the configured repository at its tracked branch
//! - Fetching and fast-forwarding (never merging)
//! - Switching the checked-out branch
//! - Working-copy status (dirty detection)
//! - Remote tip queries via `git ls-remote`, which never touch the
//!   working copy
//!
//! Authentication is delegated entirely to git's native system: SSH keys
//! from ~/.ssh/, the SSH agent, credential helpers.

use std::path::Path;
use std::process::Command;

use git2::{
    Cred, CredentialType, ErrorClass, FetchOptions, RemoteCallbacks, Repository, StatusOptions,
    build::RepoBuilder,
};

use crate::error::{ChiefError, Result};

/// Interpret a git2 error and provide a more user-friendly message
fn interpret_git_error(err: &git2::Error) -> String {
    let class = err.class();
    let message = err.message().to_lowercase();

    // More specific patterns first
    if message.contains("not found") || message.contains("404") {
        "Repository not found".to_string()
    } else if message.contains("authentication") || message.contains("credentials") {
        "Authentication failed".to_string()
    } else if message.contains("permission denied") || message.contains("access denied") {
        "Permission denied".to_string()
    } else if message.contains("connection")
        || message.contains("network")
        || message.contains("timeout")
        || message.contains("timed out")
    {
        "Network error".to_string()
    } else if class == ErrorClass::Http {
        format!("HTTP error: {}", err.message())
    } else if class == ErrorClass::Ssh {
        format!("SSH error: {}", err.message())
    } else {
        err.message().to_string()
    }
}

/// Set up authentication callbacks for git operations
fn setup_auth_callbacks(callbacks: &mut RemoteCallbacks) {
    callbacks.credentials(|url, username_from_url, allowed_types| {
        if allowed_types.contains(CredentialType::DEFAULT) {
            return Cred::default();
        }

        if allowed_types.contains(CredentialType::SSH_KEY) {
            if let Some(username) = username_from_url {
                if let Ok(cred) = Cred::ssh_key_from_agent(username) {
                    return Ok(cred);
                }

                let home = dirs::home_dir().unwrap_or_default();
                let ssh_dir = home.join(".ssh");
                for key_name in &["id_ed25519", "id_rsa", "id_ecdsa"] {
                    let private_key = ssh_dir.join(key_name);
                    let public_key = ssh_dir.join(format!("{key_name}.pub"));
                    if private_key.exists() {
                        let public_key_path = public_key.exists().then_some(public_key.as_path());
                        if let Ok(cred) =
                            Cred::ssh_key(username, public_key_path, &private_key, None)
                        {
                            return Ok(cred);
                        }
                    }
                }
            }
        }

        if allowed_types.contains(CredentialType::USER_PASS_PLAINTEXT) {
            if let Ok(config) = git2::Config::open_default() {
                if let Ok(cred) = Cred::credential_helper(&config, url, username_from_url) {
                    return Ok(cred);
                }
            }
            if let Ok(cred) = Cred::userpass_plaintext("", "") {
                return Ok(cred);
            }
        }

        Err(git2::Error::new(
            git2::ErrorCode::Auth,
            git2::ErrorClass::Http,
            "authentication failed",
        ))
    });
}

/// Clone `url` at `branch` into `target`
pub fn clone_branch(url: &str, branch: &str, target: &Path) -> Result<Repository> {
    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);

    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    let mut builder = RepoBuilder::new();
    builder.fetch_options(fetch_options);
    builder.branch(branch);

    builder.clone(url, target).map_err(|e| {
        let reason = interpret_git_error(&e);
        ChiefError::GitCloneFailed {
            url: url.to_string(),
            reason,
        }
    })
}

/// Open an existing repository
pub fn open(path: &Path) -> Result<Repository> {
    Repository::open(path).map_err(|e| ChiefError::GitOpenFailed {
        path: path.display().to_string(),
        reason: e.message().to_string(),
    })
}

/// Get the symbolic name of HEAD (e.g. "main")
///
/// Returns `None` when HEAD is detached.
pub fn head_branch_name(repo: &Repository) -> Result<Option<String>> {
    let head = repo.head().map_err(|e| ChiefError::GitOperationFailed {
        message: format!("Failed to resolve HEAD: {}", e.message()),
    })?;
    if head.is_branch() {
        Ok(head.shorthand().map(ToString::to_string))
    } else {
        Ok(None)
    }
}

/// Full SHA of the commit HEAD points at
pub fn head_commit(repo: &Repository) -> Result<String> {
    let commit = repo
        .head()
        .and_then(|h| h.peel_to_commit())
        .map_err(|e| ChiefError::GitOperationFailed {
            message: format!("Failed to resolve HEAD commit: {}", e.message()),
        })?;
    Ok(commit.id().to_string())
}

/// Any uncommitted working-copy change, untracked files included,
/// ignored files excluded.
pub fn is_dirty(repo: &Repository) -> Result<bool> {
    let mut opts = StatusOptions::new();
    opts.include_untracked(true)
        .recurse_untracked_dirs(true)
        .exclude_submodules(true);

    let statuses = repo
        .statuses(Some(&mut opts))
        .map_err(|e| ChiefError::GitOperationFailed {
            message: format!("Failed to read working-copy status: {}", e.message()),
        })?;
    Ok(!statuses.is_empty())
}

/// Fetch `branch` from origin
pub fn fetch_branch(repo: &Repository, branch: &str) -> Result<()> {
    let mut remote = repo
        .find_remote("origin")
        .map_err(|e| ChiefError::GitFetchFailed {
            reason: e.message().to_string(),
        })?;

    let mut callbacks = RemoteCallbacks::new();
    setup_auth_callbacks(&mut callbacks);
    let mut fetch_options = FetchOptions::new();
    fetch_options.remote_callbacks(callbacks);

    remote
        .fetch(&[branch], Some(&mut fetch_options), None)
        .map_err(|e| ChiefError::GitFetchFailed {
            reason: interpret_git_error(&e),
        })
}

/// Outcome of a fast-forward attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastForward {
    UpToDate,
    Advanced,
    /// Local branch has commits the remote tip does not
    Diverged,
}

/// Fast-forward the checked-out `branch` to the fetched remote tip.
///
/// Never merges: a diverged branch is reported, not resolved.
pub fn fast_forward(repo: &Repository, branch: &str) -> Result<FastForward> {
    let op_failed = |e: git2::Error| ChiefError::GitOperationFailed {
        message: format!("Fast-forward failed: {}", e.message()),
    };

    let remote_ref = repo
        .find_reference(&format!("refs/remotes/origin/{branch}"))
        .map_err(op_failed)?;
    let annotated = repo
        .reference_to_annotated_commit(&remote_ref)
        .map_err(op_failed)?;

    let (analysis, _) = repo.merge_analysis(&[&annotated]).map_err(op_failed)?;
    if analysis.is_up_to_date() {
        return Ok(FastForward::UpToDate);
    }
    if !analysis.is_fast_forward() {
        return Ok(FastForward::Diverged);
    }

    let refname = format!("refs/heads/{branch}");
    repo.find_reference(&refname)
        .and_then(|mut r| {
            r.set_target(annotated.id(), "chief: fast-forward")?;
            repo.set_head(&refname)
        })
        .map_err(op_failed)?;
    // Safe checkout: a conflicting local edit fails the operation instead
    // of being overwritten, even under a forced sync.
    repo.checkout_head(Some(git2::build::CheckoutBuilder::new().safe()))
        .map_err(op_failed)?;

    Ok(FastForward::Advanced)
}

/// Checkout `branch`, creating the local branch from origin if needed.
///
/// Runs a safe checkout: conflicting local edits fail loudly rather than
/// being overwritten.
pub fn checkout_branch(repo: &Repository, branch: &str) -> Result<()> {
    let checkout_failed = |e: git2::Error| ChiefError::GitCheckoutFailed {
        branch: branch.to_string(),
        reason: e.message().to_string(),
    };

    let refname = format!("refs/heads/{branch}");
    if repo.find_reference(&refname).is_err() {
        let remote_ref = repo
            .find_reference(&format!("refs/remotes/origin/{branch}"))
            .map_err(checkout_failed)?;
        let commit = remote_ref.peel_to_commit().map_err(checkout_failed)?;
        let mut local = repo.branch(branch, &commit, false).map_err(checkout_failed)?;
        local
            .set_upstream(Some(&format!("origin/{branch}")))
            .map_err(checkout_failed)?;
    }

    repo.set_head(&refname).map_err(checkout_failed)?;
    repo.checkout_head(Some(git2::build::CheckoutBuilder::new().safe()))
        .map_err(checkout_failed)
}

fn parse_sha_from_output(stdout: &str, git_ref: &str) -> Result<String> {
    let sha = stdout
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().next())
        .ok_or_else(|| ChiefError::GitOperationFailed {
            message: format!("git ls-remote returned no output for '{git_ref}'"),
        })?;

    if sha.len() != 40 || !sha.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ChiefError::GitOperationFailed {
            message: format!("invalid SHA from ls-remote: {sha}"),
        });
    }
    Ok(sha.to_string())
}

/// Resolve the remote tip of `branch` via `git ls-remote`, without any
/// mutation of the local working copy.
///
/// An absent git CLI is a missing dependency, fatal for this query only.
pub fn remote_tip(url: &str, branch: &str) -> Result<String> {
    let output = Command::new("git")
        .args(["ls-remote", "--exit-code", url, branch])
        .output()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ChiefError::MissingDependency {
                    tool: "git".to_string(),
                }
            } else {
                ChiefError::GitOperationFailed {
                    message: format!("git ls-remote failed: {e}"),
                }
            }
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(ChiefError::GitOperationFailed {
            message: format!("git ls-remote: {}", stderr.trim()),
        });
    }

    parse_sha_from_output(&String::from_utf8_lossy(&output.stdout), branch)
}
