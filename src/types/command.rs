//! Result of one analysis-tool invocation.

use serde::Serialize;

/// Captured outcome of an external command.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    /// The command that was executed (display form).
    command: String,
    /// Whether the command succeeded (exit code 0).
    passed: bool,
    /// Process exit code (-1 if unavailable, e.g., killed by signal).
    exit_code: i32,
    /// Standard output.
    stdout: String,
    /// Standard error.
    stderr: String,
    /// Execution time in milliseconds.
    duration_ms: u64,
}

impl CommandResult {
    /// Creates a new command result.
    #[must_use]
    pub fn new(
        command: String,
        exit_code: i32,
        stdout: String,
        stderr: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            command,
            passed: exit_code == 0,
            exit_code,
            stdout,
            stderr,
            duration_ms,
        }
    }

    /// A command that never ran. Counts as failed with exit code -1 and
    /// carries `reason` on stderr.
    #[must_use]
    pub fn not_started(command: String, reason: String) -> Self {
        Self::new(command, -1, String::new(), reason, 0)
    }

    /// The command that was executed.
    #[must_use]
    pub fn command(&self) -> &str {
        &self.command
    }

    /// Whether the command succeeded (exit code 0).
    #[must_use]
    pub fn passed(&self) -> bool {
        self.passed
    }

    /// Process exit code.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Standard output.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Standard error.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// Execution time in milliseconds.
    #[must_use]
    pub fn duration_ms(&self) -> u64 {
        self.duration_ms
    }

    /// Stderr lines that survive `is_noise`.
    pub fn stderr_lines_without<'a>(
        &'a self,
        is_noise: impl Fn(&str) -> bool + 'a,
    ) -> impl Iterator<Item = &'a str> + 'a {
        self.stderr.lines().filter(move |line| !is_noise(line))
    }
}
