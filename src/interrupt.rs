//! Ctrl-C handling.
//!
//! An interrupt removes the fix-export directory and then kills the whole
//! process group, so running clang-tidy children die with us.

use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// Message printed when the run is interrupted.
pub const GOODBYE: &str = "Ctrl-C detected, goodbye.";

/// Installs the process-wide interrupt handler. Call at most once.
///
/// # Errors
/// Returns error if a handler is already installed or the OS refuses.
pub fn install(export_dir: Option<PathBuf>) -> Result<()> {
    ctrlc::set_handler(move || {
        eprintln!("\n{GOODBYE}");
        if let Some(dir) = &export_dir {
            let _ = fs::remove_dir_all(dir);
        }
        terminate();
    })?;
    Ok(())
}

#[cfg(unix)]
fn terminate() -> ! {
    use nix::sys::signal::{kill, Signal};
    use nix::unistd::Pid;

    // Pid 0 addresses every process in our group.
    let _ = kill(Pid::from_raw(0), Signal::SIGKILL);
    std::process::exit(1)
}

#[cfg(not(unix))]
fn terminate() -> ! {
    std::process::exit(1)
}
