// src/exit.rs
//! Standardized process exit codes for `gatex`.
//!
//! Provides a stable contract for scripts and automation.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GatexExit {
    /// Operation completed successfully.
    Success = 0,
    /// Generic error (I/O, solver, cancellation).
    Error = 1,
    /// Input validation failed (catalog, pattern entry, batch file, config).
    InvalidInput = 2,
    /// `check` found at least one forbidden occurrence.
    Violations = 3,
    /// `repair` left at least one graph infeasible or with residual occurrences.
    Unrepaired = 4,
}

impl GatexExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for GatexExit {
    #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
    fn report(self) -> std::process::ExitCode {
        std::process::ExitCode::from(self.code() as u8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_stable() {
        assert_eq!(GatexExit::Success.code(), 0);
        assert_eq!(GatexExit::InvalidInput.code(), 2);
        assert_eq!(GatexExit::Unrepaired.code(), 4);
    }
}
