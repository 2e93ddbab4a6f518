//! Run an external command behind a progress spinner
//!
//! The child runs detached with its stdout and stderr captured into a
//! private temporary file while the foreground polls for completion and
//! renders a spinner. The capture is read exactly once, after the child has
//! exited, so there is no concurrent read/write on it. An optional timeout
//! makes the wait interruptible: on expiry the child is killed and the
//! operation reports a timeout instead of blocking forever.

use std::io::ErrorKind;
use std::process::{Command, Stdio};
use std::time::{Duration, Instant};

use indicatif::{ProgressBar, ProgressStyle};
use tempfile::NamedTempFile;

use crate::error::{ChiefError, Result};

const POLL_INTERVAL: Duration = Duration::from_millis(80);

/// Captured result of a finished child process
#[derive(Debug)]
pub struct CommandOutput {
    /// Process exit code; -1 when terminated by a signal
    pub code: i32,
    /// Interleaved stdout + stderr
    pub output: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == 0
    }
}

fn spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    pb.set_message(label.to_string());
    pb.enable_steady_tick(Duration::from_millis(100));
    pb
}

/// Run `program` with `args`, spinner up, output captured.
///
/// `timeout` of `None` waits indefinitely. A program that cannot be found
/// is a missing dependency, not an I/O error.
pub fn run_with_progress(
    label: &str,
    program: &str,
    args: &[String],
    timeout: Option<Duration>,
) -> Result<CommandOutput> {
    let capture = NamedTempFile::new()
        .map_err(|e| ChiefError::io("Failed to create capture file", &e))?;
    let writer = capture
        .reopen()
        .map_err(|e| ChiefError::io("Failed to open capture file", &e))?;
    // one file description, shared cursor, so the two streams interleave
    let writer_err = writer
        .try_clone()
        .map_err(|e| ChiefError::io("Failed to open capture file", &e))?;

    let mut child = Command::new(program)
        .args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::from(writer))
        .stderr(Stdio::from(writer_err))
        .spawn()
        .map_err(|e| {
            if e.kind() == ErrorKind::NotFound {
                ChiefError::MissingDependency {
                    tool: program.to_string(),
                }
            } else {
                ChiefError::io("Failed to spawn command", &e)
            }
        })?;

    let pb = spinner(label);
    let started = Instant::now();
    let status = loop {
        match child
            .try_wait()
            .map_err(|e| ChiefError::io("Failed to poll command", &e))?
        {
            Some(status) => break status,
            None => {
                if let Some(limit) = timeout {
                    if started.elapsed() >= limit {
                        let _ = child.kill();
                        let _ = child.wait();
                        pb.finish_and_clear();
                        return Err(ChiefError::OperationTimedOut {
                            label: label.to_string(),
                            secs: limit.as_secs(),
                        });
                    }
                }
                std::thread::sleep(POLL_INTERVAL);
            }
        }
    };
    pb.finish_and_clear();

    let output = std::fs::read_to_string(capture.path())
        .map_err(|e| ChiefError::io("Failed to read captured output", &e))?;

    Ok(CommandOutput {
        code: status.code().unwrap_or(-1),
        output,
    })
}

/// Run a shell glue line (a unit command's `run` value)
pub fn run_shell_with_progress(
    label: &str,
    line: &str,
    timeout: Option<Duration>,
) -> Result<CommandOutput> {
    #[cfg(windows)]
    {
        run_with_progress(label, "cmd", &["/C".to_string(), line.to_string()], timeout)
    }
    #[cfg(not(windows))]
    {
        run_with_progress(label, "sh", &["-c".to_string(), line.to_string()], timeout)
    }
}
