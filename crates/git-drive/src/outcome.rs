// Copyright 2026 Oxide Computer Company

//! Exit codes and decoded command results.

use crate::{CommitSummaryParseError, RefExpr};
use std::{fmt, process::ExitStatus, str::FromStr};

/// How a git process ended.
///
/// Converts to `bool`: `true` only for a zero exit code.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExitCode {
    /// The process exited with this code.
    Exited(i32),
    /// The process was terminated without an exit code (e.g., by a
    /// signal).
    Terminated,
    /// The process could not be started.
    NotStarted,
}

impl ExitCode {
    /// Returns true if the process exited with code 0.
    pub fn success(self) -> bool {
        matches!(self, ExitCode::Exited(0))
    }

    /// Returns the numeric exit code, if the process exited normally.
    pub fn code(self) -> Option<i32> {
        match self {
            ExitCode::Exited(code) => Some(code),
            ExitCode::Terminated | ExitCode::NotStarted => None,
        }
    }
}

impl From<i32> for ExitCode {
    fn from(code: i32) -> Self {
        ExitCode::Exited(code)
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status.code() {
            Some(code) => ExitCode::Exited(code),
            None => ExitCode::Terminated,
        }
    }
}

impl From<ExitCode> for bool {
    fn from(code: ExitCode) -> Self {
        code.success()
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitCode::Exited(code) => write!(f, "exit code {code}"),
            ExitCode::Terminated => write!(f, "terminated without exit code"),
            ExitCode::NotStarted => write!(f, "not started"),
        }
    }
}

/// The abbreviated hash and subject of a commit, as printed by
/// `git log -1 --oneline --no-decorate`.
///
/// The hash is kept as a number together with the number of hex digits git
/// printed, so that an abbreviation with leading zeros (`0a1b2c3`) can be
/// handed back to git unchanged.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommitSummary {
    hash: u64,
    digits: usize,
    message: String,
}

impl CommitSummary {
    /// Creates a summary from its parts.
    ///
    /// The abbreviation is taken to be `hash` in hex without leading zeros.
    pub fn new(hash: u64, message: impl Into<String>) -> Self {
        let digits = format!("{hash:x}").len();
        CommitSummary { hash, digits, message: message.into() }
    }

    /// Returns the abbreviated hash.
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the abbreviated hash as git printed it, including leading
    /// zeros.
    pub fn abbrev(&self) -> String {
        format!("{:0width$x}", self.hash, width = self.digits)
    }

    /// Returns the commit subject.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Returns a ref expression pointing at this commit.
    ///
    /// The expression names the abbreviation as git printed it. A numeric
    /// [`RefExpr::from_hash64`] would drop leading zeros and name a
    /// different prefix.
    pub fn to_ref_expr(&self) -> RefExpr {
        RefExpr::named(self.abbrev())
    }
}

impl fmt::Display for CommitSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.abbrev(), self.message)
    }
}

impl FromStr for CommitSummary {
    type Err = CommitSummaryParseError;

    /// Parses a single `<hash> <message>` line.
    ///
    /// The hash is everything before the first space. The message is the
    /// rest of the line, which equals the remaining space-separated tokens
    /// rejoined with single spaces.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (hash, message) = s.split_once(' ').ok_or_else(|| {
            CommitSummaryParseError::MissingMessage(s.to_owned())
        })?;
        // from_str_radix also accepts a leading '+', which git never
        // prints.
        let is_hex = !hash.is_empty()
            && hash.len() <= 16
            && hash.bytes().all(|b| b.is_ascii_hexdigit());
        if !is_hex {
            return Err(CommitSummaryParseError::InvalidHash(hash.to_owned()));
        }
        let digits = hash.len();
        let hash = u64::from_str_radix(hash, 16).map_err(|_| {
            CommitSummaryParseError::InvalidHash(hash.to_owned())
        })?;
        Ok(CommitSummary { hash, digits, message: message.to_owned() })
    }
}

/// The result of running one git command.
///
/// # Invariants
///
/// `summary` is only ever present when the exit code is a success.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommandOutcome {
    exit: ExitCode,
    summary: Option<CommitSummary>,
}

impl CommandOutcome {
    /// Creates an outcome for a command that reports only its status.
    pub fn status(exit: ExitCode) -> Self {
        CommandOutcome { exit, summary: None }
    }

    /// Decodes the captured output of `git log -1 --oneline
    /// --no-decorate`.
    ///
    /// Only the first line of `stdout` is considered, and only when `exit`
    /// is a success. Output that does not parse yields no summary rather
    /// than an error.
    pub fn decode(exit: ExitCode, stdout: Option<&str>) -> Self {
        let summary = if exit.success() {
            stdout
                .and_then(|out| out.lines().next())
                .and_then(|line| line.parse().ok())
        } else {
            None
        };
        CommandOutcome { exit, summary }
    }

    /// Attaches a summary obtained by a follow-up command.
    ///
    /// The summary is dropped if this outcome is not a success.
    pub fn with_summary(self, summary: Option<CommitSummary>) -> Self {
        let summary = if self.exit.success() { summary } else { None };
        CommandOutcome { exit: self.exit, summary }
    }

    /// Returns true if the command exited with code 0.
    pub fn succeeded(&self) -> bool {
        self.exit.success()
    }

    /// Returns how the command ended.
    pub fn exit(&self) -> ExitCode {
        self.exit
    }

    /// Returns the decoded commit summary, if any.
    pub fn summary(&self) -> Option<&CommitSummary> {
        self.summary.as_ref()
    }

    /// Consumes the outcome, returning the summary.
    pub fn into_summary(self) -> Option<CommitSummary> {
        self.summary
    }
}

impl From<CommandOutcome> for bool {
    fn from(outcome: CommandOutcome) -> Self {
        outcome.succeeded()
    }
}
