//! External tool invocation.
//!
//! `ToolRunner` is the seam between the pure report parsers and the process
//! that produces their input. `TsharkRunner` runs the real binary,
//! `ReplayRunner` serves recorded output, and embedders may supply their own.

mod replay;
mod tshark;

pub use replay::ReplayRunner;
pub use tshark::{TsharkQuery, TsharkRunner};

use std::ffi::OsString;

use thiserror::Error;

/// Raw result of one tool run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl ToolOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    /// Stdout of a successful run, or the tool's diagnostics as an error.
    pub fn into_stdout(self) -> Result<String, ToolError> {
        if self.success() {
            return Ok(self.stdout);
        }
        Err(ToolError::Failed {
            status: self
                .exit_code
                .map(|code| format!("exit code {code}"))
                .unwrap_or_else(|| "a signal".to_string()),
            stderr: self.stderr.trim().to_string(),
        })
    }
}

pub trait ToolRunner {
    fn run(&self, args: &[OsString]) -> Result<ToolOutput, ToolError>;
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("failed to launch {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("tool terminated with {status}: {stderr}")]
    Failed { status: String, stderr: String },
}
