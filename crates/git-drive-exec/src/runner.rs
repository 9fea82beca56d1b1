// Copyright 2026 Oxide Computer Company

//! The process boundary: running git and collecting its exit code.

use crate::{GitEnvError, Invocation, SpawnError};
use camino::{Utf8Path, Utf8PathBuf};
use git_drive::ExitCode;
use std::process::{Command, Stdio};
use tracing::debug;

/// Reads the git binary path from `var`, falling back to `default` if the
/// variable is unset or empty.
///
/// The value is trimmed of leading and trailing whitespace.
///
/// Returns an error if the variable is set but is not valid UTF-8.
fn read_git_env(
    var: &'static str,
    default: &str,
) -> Result<String, GitEnvError> {
    match std::env::var(var) {
        Ok(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Ok(default.to_string())
            } else {
                Ok(trimmed.to_string())
            }
        }
        Err(std::env::VarError::NotPresent) => Ok(default.to_string()),
        Err(std::env::VarError::NotUnicode(value)) => {
            Err(GitEnvError::NonUtf8 { var, value })
        }
    }
}

/// What a finished run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunOutput {
    /// How the process ended.
    pub exit: ExitCode,
    /// Standard output, if the invocation asked for it.
    pub stdout: Option<String>,
}

/// Runs one git invocation to completion.
///
/// This is the only place where [`Git`](crate::Git) touches processes.
/// Implement it to substitute git in tests.
pub trait CommandRunner {
    /// Runs `invocation`, blocking until it finishes.
    ///
    /// Returns an error only if the process could not be started. A
    /// process that starts and fails is reported through
    /// [`RunOutput::exit`].
    fn run(&self, invocation: &Invocation) -> Result<RunOutput, SpawnError>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput, SpawnError> {
        (**self).run(invocation)
    }
}

/// Runs the real git binary in a fixed working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProcessRunner {
    binary: String,
    working_dir: Utf8PathBuf,
}

impl ProcessRunner {
    /// Creates a runner for `binary`, run in `working_dir`.
    pub fn new(
        binary: impl Into<String>,
        working_dir: impl Into<Utf8PathBuf>,
    ) -> Self {
        ProcessRunner { binary: binary.into(), working_dir: working_dir.into() }
    }

    /// Creates a runner using the `$GIT` environment variable or `"git"`.
    ///
    /// Returns an error if `$GIT` is set but is not valid UTF-8.
    pub fn from_env(
        working_dir: impl Into<Utf8PathBuf>,
    ) -> Result<Self, GitEnvError> {
        let binary = read_git_env("GIT", "git")?;
        Ok(ProcessRunner::new(binary, working_dir))
    }

    /// Returns the path to the git binary.
    pub fn binary(&self) -> &str {
        &self.binary
    }

    /// Returns the directory git runs in.
    pub fn working_dir(&self) -> &Utf8Path {
        &self.working_dir
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<RunOutput, SpawnError> {
        debug!(
            binary = %self.binary,
            working_dir = %self.working_dir,
            command = %invocation,
            "running git"
        );

        // stdin is closed so that git never blocks on a prompt (e.g., for
        // credentials during clone or push).
        let output = Command::new(&self.binary)
            .current_dir(&self.working_dir)
            .args(invocation.args())
            .stdin(Stdio::null())
            .output()
            .map_err(|source| SpawnError {
                binary_path: self.binary.clone(),
                working_dir: self.working_dir.clone(),
                command_line: invocation.command_line(),
                source,
            })?;

        let exit = ExitCode::from(output.status);
        if exit.success() {
            debug!(command = %invocation, %exit, "git finished");
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            debug!(
                command = %invocation,
                %exit,
                stderr = stderr.trim(),
                "git failed"
            );
        }

        let stdout = invocation
            .captures_stdout()
            .then(|| String::from_utf8_lossy(&output.stdout).into_owned());
        Ok(RunOutput { exit, stdout })
    }
}
