// Copyright 2026 Oxide Computer Company

//! Argument lists for a single git run.

use git_drive::join_args;
use std::fmt;

/// The arguments for one run of git, and whether its stdout is wanted.
///
/// Arguments are kept as a list and handed to the process one by one, so
/// values containing spaces or quotes need no escaping. The joined form
/// from [`command_line`](Self::command_line) is only for display.
///
/// # Examples
///
/// ```
/// use git_drive_exec::Invocation;
///
/// let branch: Option<&str> = None;
/// let invocation = Invocation::new("clone")
///     .arg_if(true, "-n")
///     .arg_pair_opt("-b", branch)
///     .arg("https://example.com/repo.git");
/// assert_eq!(
///     invocation.command_line(),
///     "clone -n https://example.com/repo.git",
/// );
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    args: Vec<String>,
    capture_stdout: bool,
}

impl Invocation {
    /// Starts an invocation of `subcommand`.
    pub fn new(subcommand: impl Into<String>) -> Self {
        Invocation { args: vec![subcommand.into()], capture_stdout: false }
    }

    /// Appends an argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Appends `arg` if `condition` holds.
    pub fn arg_if(self, condition: bool, arg: impl Into<String>) -> Self {
        if condition { self.arg(arg) } else { self }
    }

    /// Appends `arg` if it is present.
    pub fn arg_opt(self, arg: Option<impl Into<String>>) -> Self {
        match arg {
            Some(arg) => self.arg(arg),
            None => self,
        }
    }

    /// Appends `flag` followed by `value`, if `value` is present.
    pub fn arg_pair_opt(
        self,
        flag: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        match value {
            Some(value) => self.arg(flag).arg(value),
            None => self,
        }
    }

    /// Appends each of `args`.
    pub fn extend<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Requests that stdout be captured and returned.
    pub fn capture_stdout(mut self) -> Self {
        self.capture_stdout = true;
        self
    }

    /// Returns the arguments, starting with the subcommand.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Returns true if stdout should be captured.
    pub fn captures_stdout(&self) -> bool {
        self.capture_stdout
    }

    /// Returns the arguments joined with single spaces.
    pub fn command_line(&self) -> String {
        join_args(self.args.iter().map(Some))
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}
