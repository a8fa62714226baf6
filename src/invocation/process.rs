//! Running one analysis invocation and capturing its output.

use super::builder::TidyInvocation;
use crate::types::CommandResult;
use std::process::Command;
use std::time::Instant;
use tracing::debug;

/// Runs one invocation to completion. Implementations must be callable from
/// many worker threads at once.
pub trait Invoker: Send + Sync {
    fn invoke(&self, invocation: &TidyInvocation) -> CommandResult;
}

/// Spawns the real tool as a child process.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl Invoker for ProcessInvoker {
    fn invoke(&self, invocation: &TidyInvocation) -> CommandResult {
        run_captured(invocation)
    }
}

/// Runs `invocation` with stdout and stderr captured separately. A process
/// that cannot be spawned becomes a failed result with exit code -1.
#[must_use]
pub fn run_captured(invocation: &TidyInvocation) -> CommandResult {
    let start = Instant::now();
    let display = invocation.display();

    if invocation.program().is_empty() {
        return CommandResult::not_started(display, "Empty command".to_string());
    }

    let output = Command::new(invocation.program())
        .args(invocation.arguments())
        .output();

    let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);

    let result = match output {
        Ok(output) => {
            let exit_code = output.status.code().unwrap_or(-1);
            let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
            CommandResult::new(display, exit_code, stdout, stderr, duration_ms)
        }
        Err(e) => CommandResult::not_started(display, format!("Failed to execute: {e}")),
    };

    debug!(
        command = result.command(),
        exit_code = result.exit_code(),
        duration_ms,
        "invocation finished"
    );
    result
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn inv(args: &[&str]) -> TidyInvocation {
        TidyInvocation::from_args(args.iter().map(|s| (*s).to_string()).collect())
    }

    #[test]
    fn stdout_is_captured() {
        let r = ProcessInvoker.invoke(&inv(&["echo", "hello world"]));
        assert!(r.passed());
        assert_eq!(r.stdout(), "hello world\n");
        assert_eq!(r.command(), "echo hello world");
    }

    #[test]
    fn stderr_captured_separately() {
        let r = ProcessInvoker.invoke(&inv(&["sh", "-c", "echo out; echo err >&2; exit 3"]));
        assert!(!r.passed());
        assert_eq!(r.exit_code(), 3);
        assert_eq!(r.stdout(), "out\n");
        assert_eq!(r.stderr(), "err\n");
    }

    #[test]
    fn nonexistent_program_returns_error() {
        let r = ProcessInvoker.invoke(&inv(&["nonexistent_binary_xyz_123"]));
        assert!(!r.passed());
        assert_eq!(r.exit_code(), -1);
        assert!(r.stderr().contains("Failed to execute"));
    }

    #[test]
    fn empty_command_returns_error() {
        let r = ProcessInvoker.invoke(&inv(&[]));
        assert_eq!(r.exit_code(), -1);
        assert!(r.stderr().contains("Empty command"));
    }
}
