//! Error types and handling for Chief
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! The taxonomy follows the subsystems: environment preconditions,
//! configuration parsing/reconciliation, unit loading, git synchronization,
//! and external command execution. Unit load failures are deliberately not
//! propagated through this type during composition; they are recorded on the
//! unit itself so one broken plugin never aborts the pass.

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for Chief operations
#[derive(Error, Diagnostic, Debug)]
pub enum ChiefError {
    // Environment preconditions
    #[error("Required environment value {name} is not set")]
    #[diagnostic(
        code(chief::env::not_configured),
        help("Export {name} in the hosting session or pass the matching command-line option")
    )]
    EnvironmentNotConfigured { name: String },

    #[error("Core plugins directory not found: {path}")]
    #[diagnostic(
        code(chief::units::core_dir_missing),
        help("The installation root must contain libs/core/plugins; check CHIEF_PATH")
    )]
    CorePluginsDirMissing { path: String },

    // Configuration errors
    #[error("Configuration file not found: {path}")]
    #[diagnostic(
        code(chief::config::not_found),
        help("Run 'chief config init' to create one from the built-in template")
    )]
    ConfigNotFound { path: String },

    #[error("Failed to read configuration file {path}: {reason}")]
    #[diagnostic(code(chief::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Malformed configuration at {path} line {line}: {reason}")]
    #[diagnostic(
        code(chief::config::parse_error),
        help("Boolean keys take unquoted true/false; string and path keys take quoted values")
    )]
    ConfigParseError {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Failed to write configuration file {path}: {reason}")]
    #[diagnostic(code(chief::config::write_failed))]
    ConfigWriteFailed { path: String, reason: String },

    #[error("Configuration file already exists: {path}")]
    #[diagnostic(
        code(chief::config::already_exists),
        help("Remove the file first, or use 'chief config update' to reconcile it")
    )]
    ConfigAlreadyExists { path: String },

    // Unit errors
    #[error("Failed to load unit '{unit}': {reason}")]
    #[diagnostic(code(chief::units::load_failed))]
    UnitLoadFailed { unit: String, reason: String },

    #[error("Unknown command: {name}")]
    #[diagnostic(
        code(chief::session::command_not_found),
        help("Run 'chief list --commands' to see registered commands and aliases")
    )]
    CommandNotFound { name: String },

    // Sync errors
    #[error("Required tool '{tool}' is not available")]
    #[diagnostic(
        code(chief::sync::missing_dependency),
        help("Install {tool} and make sure it is on PATH")
    )]
    MissingDependency { tool: String },

    #[error("Remote plugins working copy has uncommitted local changes: {path}")]
    #[diagnostic(
        code(chief::sync::blocked_by_local_changes),
        help(
            "Commit or stash your changes, disable CHIEF_CFG_PLUGINS_GIT_AUTOUPDATE, or re-run with --force"
        )
    )]
    SyncBlocked { path: String },

    #[error("Local branch '{branch}' has commits not on the remote; refusing to merge")]
    #[diagnostic(
        code(chief::sync::diverged),
        help("Push or rebase your local commits, then sync again")
    )]
    SyncDiverged { branch: String },

    #[error("No remote plugins repository configured")]
    #[diagnostic(
        code(chief::sync::not_configured),
        help("Set CHIEF_CFG_PLUGINS_TYPE=\"remote\" and CHIEF_CFG_PLUGINS_GIT_REPO in the configuration")
    )]
    SyncNotConfigured,

    // Git errors
    #[error("Failed to clone repository {url}: {reason}")]
    #[diagnostic(
        code(chief::git::clone_failed),
        help("Check that the URL is correct and you have access to the repository")
    )]
    GitCloneFailed { url: String, reason: String },

    #[error("Failed to open repository at {path}: {reason}")]
    #[diagnostic(code(chief::git::open_failed))]
    GitOpenFailed { path: String, reason: String },

    #[error("Failed to fetch from remote: {reason}")]
    #[diagnostic(code(chief::git::fetch_failed))]
    GitFetchFailed { reason: String },

    #[error("Failed to checkout branch '{branch}': {reason}")]
    #[diagnostic(code(chief::git::checkout_failed))]
    GitCheckoutFailed { branch: String, reason: String },

    #[error("Git operation failed: {message}")]
    #[diagnostic(code(chief::git::operation_failed))]
    GitOperationFailed { message: String },

    // External command execution
    #[error("'{label}' timed out after {secs}s")]
    #[diagnostic(
        code(chief::exec::timed_out),
        help("Raise the limit with --timeout, or check that the underlying program can finish")
    )]
    OperationTimedOut { label: String, secs: u64 },

    #[error("'{label}' exited with status {code}")]
    #[diagnostic(code(chief::exec::failed))]
    CommandFailed { label: String, code: i32 },

    // Generic I/O
    #[error("{message}")]
    #[diagnostic(code(chief::io::error))]
    IoError { message: String },
}

impl ChiefError {
    /// Wrap an I/O error with operation context
    pub fn io(operation: &str, err: &std::io::Error) -> Self {
        ChiefError::IoError {
            message: format!("{operation}: {err}"),
        }
    }
}

/// Result type alias for Chief operations
pub type Result<T> = std::result::Result<T, ChiefError>;
