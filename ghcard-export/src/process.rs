//! Subprocess execution for external converters.

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::{Duration, Instant};
use tokio::process::Command;
use tracing::{debug, instrument, warn};

use crate::error::ProcessError;

// ============================================================================
// Process Output
// ============================================================================

/// Output from a process execution.
#[derive(Debug, Clone)]
pub struct ProcessOutput {
    /// Standard output content.
    pub stdout: String,
    /// Standard error content.
    pub stderr: String,
    /// Exit code (0 = success, -1 when killed by a signal).
    pub exit_code: i32,
    /// How long the command took to execute.
    pub duration: Duration,
}

impl ProcessOutput {
    /// Returns true if the command succeeded (exit code 0).
    pub fn success(&self) -> bool {
        self.exit_code == 0
    }
}

// ============================================================================
// Process Runner
// ============================================================================

/// Runs external programs with a timeout.
#[derive(Debug, Clone, Default)]
pub struct ProcessRunner;

impl ProcessRunner {
    /// Creates a new process runner.
    pub fn new() -> Self {
        Self
    }

    /// Runs `program` with `args`, killing it if it outlives `timeout`.
    ///
    /// # Errors
    ///
    /// - [`ProcessError::NotFound`] if the program cannot be spawned because it does not exist
    /// - [`ProcessError::Timeout`] if it runs too long
    /// - [`ProcessError::Io`] for other spawn or wait failures
    #[instrument(skip_all, fields(program = %program.display(), timeout = ?timeout))]
    pub async fn run<S: AsRef<OsStr>>(
        &self,
        program: &Path,
        args: &[S],
        timeout: Duration,
    ) -> Result<ProcessOutput, ProcessError> {
        debug!(argc = args.len(), "Running command");
        let start = Instant::now();

        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(timeout, command.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!("Command not found");
                return Err(ProcessError::NotFound(program.display().to_string()));
            }
            Ok(Err(e)) => return Err(e.into()),
            Err(_) => {
                warn!("Command timed out");
                return Err(ProcessError::Timeout(timeout));
            }
        };

        let result = ProcessOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            exit_code: output.status.code().unwrap_or(-1),
            duration: start.elapsed(),
        };

        debug!(
            exit_code = result.exit_code,
            duration = ?result.duration,
            stderr_len = result.stderr.len(),
            "Command completed"
        );

        Ok(result)
    }

    /// Find the path to a command. Absolute and relative paths are checked as-is.
    pub fn which(&self, cmd: &str) -> Option<PathBuf> {
        which::which(cmd).ok()
    }
}
