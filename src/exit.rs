// src/exit.rs
//! Process exit codes for `gadgets`.
//!
//! Provides a stable contract for scripts and CI.

use std::process::Termination;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum GadgetsExit {
    /// Nothing to report.
    Success = 0,
    /// Generic error (I/O, parse failure).
    Error = 1,
    /// Bad configuration or arguments.
    InvalidInput = 2,
    /// The scan reported at least one problem.
    ProblemsFound = 3,
    /// A fix could not be applied.
    FixFailure = 4,
}

impl GadgetsExit {
    #[must_use]
    pub fn code(self) -> i32 {
        self as i32
    }
}

impl Termination for GadgetsExit {
    fn report(self) -> std::process::ExitCode {
        #[allow(clippy::cast_sign_loss, clippy::cast_possible_truncation)]
        std::process::ExitCode::from(self.code() as u8)
    }
}
