//! External command runner.
//!
//! Wraps `std::process::Command` with captured stdout/stderr and structured
//! errors, plus a `PATH` lookup used for the startup tool check.

use crate::error::{Result, SweepError};
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Captured output of a tool invocation.
#[derive(Debug, Clone)]
pub struct ToolOutput {
    /// Exit code, or `None` when terminated by a signal.
    pub code: Option<i32>,
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl ToolOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    /// The most useful diagnostic text: stderr, or stdout when stderr is empty.
    pub fn message(&self) -> &str {
        if self.stderr.is_empty() {
            &self.stdout
        } else {
            &self.stderr
        }
    }
}

/// Run `program` with `args`, capturing its output.
///
/// Exit codes listed in `accepted_codes` (besides 0) are treated as success;
/// anything else becomes `SweepError::CommandFailed`.
pub fn run_tool(program: &str, args: &[&str], accepted_codes: &[i32]) -> Result<ToolOutput> {
    tracing::debug!(program, ?args, "running tool");

    let output = Command::new(program).args(args).output().map_err(|e| {
        SweepError::CommandFailed(format!("failed to execute {}: {}", program, e))
    })?;

    let tool_output = ToolOutput::from_output(&output);
    let code = tool_output.code;

    match code {
        Some(0) => Ok(tool_output),
        Some(code) if accepted_codes.contains(&code) => Ok(tool_output),
        code => Err(SweepError::CommandFailed(format!(
            "{} {} failed (exit code {}): {}",
            program,
            args.first().unwrap_or(&""),
            code.map_or_else(|| "signal".to_string(), |c| c.to_string()),
            tool_output.message()
        ))),
    }
}

/// Resolve `program` the way the shell would.
///
/// Names containing a `/` are checked directly; bare names are searched in
/// `search_path` (normally the value of `PATH`).
pub fn find_program(program: &str, search_path: Option<&OsStr>) -> Option<PathBuf> {
    if program.contains('/') {
        let path = Path::new(program);
        return is_executable(path).then(|| path.to_path_buf());
    }

    std::env::split_paths(search_path?)
        .map(|dir| dir.join(program))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
