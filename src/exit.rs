// src/exit.rs
//! Process exit codes for `tidyfan`.
//!
//! Scripts only need to tell a clean run from a failed one.

use colored::Colorize;
use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum TidyExit {
    /// Every invocation succeeded and no merge or apply step failed.
    Success = 0,
    /// At least one file failed, a fix step failed, or setup failed.
    Failure = 1,
}

impl TidyExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }

    #[must_use]
    pub fn is_success(self) -> bool {
        self == Self::Success
    }
}

impl Termination for TidyExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}

/// Maps the outcome of a run to the process exit code, printing a top-level
/// error in red on the way.
impl From<anyhow::Result<TidyExit>> for TidyExit {
    fn from(res: anyhow::Result<TidyExit>) -> Self {
        match res {
            Ok(code) => code,
            Err(e) => {
                eprintln!("{} {e}", "Error:".red());
                Self::Failure
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_zero_and_one() {
        assert_eq!(TidyExit::Success.code(), 0);
        assert_eq!(TidyExit::Failure.code(), 1);
    }

    #[test]
    fn error_result_maps_to_failure() {
        let res: anyhow::Result<TidyExit> = Err(anyhow::anyhow!("boom"));
        assert_eq!(TidyExit::from(res), TidyExit::Failure);
    }

    #[test]
    fn ok_result_keeps_code() {
        let res: anyhow::Result<TidyExit> = Ok(TidyExit::Success);
        assert!(TidyExit::from(res).is_success());
    }
}
