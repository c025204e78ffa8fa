//! Launching one child process and blocking until it exits.

use std::process::{Command, ExitStatus};
use std::time::Instant;

use crate::command::Invocation;
use crate::error::{AppError, EXIT_FAILURE};

/// Result of a finished child.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildOutcome {
    /// Exit code, or `None` when the child was terminated by a signal.
    pub code: Option<i32>,
    pub elapsed_secs: f64,
}

impl ChildOutcome {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }

    /// Exit code the runner should finish with after this child.
    pub fn runner_exit_code(&self) -> u8 {
        match self.code {
            Some(0) => 0,
            Some(code) => u8::try_from(code).ok().filter(|c| *c != 0).unwrap_or(EXIT_FAILURE),
            None => EXIT_FAILURE,
        }
    }
}

/// Spawn `invocation` with inherited stdio and wait for it.
///
/// A spawn failure (missing interpreter, permissions) is an error; a child
/// that runs and exits nonzero is a successful `ChildOutcome`.
pub fn run_blocking(invocation: &Invocation) -> Result<ChildOutcome, AppError> {
    tracing::info!(command = %invocation, "spawning child process");
    let started = Instant::now();

    let status: ExitStatus = Command::new(&invocation.program)
        .args(&invocation.args)
        .status()
        .map_err(|e| {
            AppError::failure(format!(
                "Exception while launching '{}': {e}",
                invocation.program.to_string_lossy()
            ))
        })?;

    let outcome = ChildOutcome {
        code: status.code(),
        elapsed_secs: started.elapsed().as_secs_f64(),
    };
    tracing::info!(code = ?outcome.code, elapsed_secs = outcome.elapsed_secs, "child process exited");
    Ok(outcome)
}

/// Map a finished child to the runner's result, printing the summary line.
pub fn report(label: &str, outcome: &ChildOutcome) -> Result<(), AppError> {
    if outcome.success() {
        println!("{label} finished in {:.1}s.", outcome.elapsed_secs);
        return Ok(());
    }

    let code = outcome
        .code
        .map(|c| c.to_string())
        .unwrap_or_else(|| "terminated by signal".to_string());
    Err(AppError::new(
        outcome.runner_exit_code(),
        format!("Error while running {label}. Return code: {code}"),
    ))
}
