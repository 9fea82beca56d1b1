// Copyright 2026 Oxide Computer Company

//! The command surface: one method per git subcommand.

use crate::{
    AddTarget, CloneOptions, CommandRunner, CommitOptions, InitOptions,
    Invocation, OpenError, ProcessRunner, PushOptions, ResetOptions,
    RunOutput, TagOptions, UserConfig, options::last_commit_invocation,
};
use camino::Utf8PathBuf;
use fs_err as fs;
use git_drive::{CommandOutcome, CommitSummary, ExitCode};
use std::io;
use tracing::{debug, warn};

/// Runs git subcommands through a [`CommandRunner`].
///
/// Every method runs git synchronously and reports the result as a
/// [`CommandOutcome`]. A failing command, or one that could not be started
/// at all, is a falsy outcome rather than an `Err`.
///
/// # Examples
///
/// ```no_run
/// use git_drive::{RefExpr, ResetMode};
/// use git_drive_exec::{CommitOptions, Git, ResetOptions};
///
/// let git = Git::open(".").expect("working directory exists");
///
/// let outcome = git.commit(&CommitOptions {
///     capture_summary: true,
///     ..CommitOptions::new("update docs")
/// });
/// if let Some(summary) = outcome.summary() {
///     println!("committed {}", summary.abbrev());
/// }
///
/// let undo = ResetOptions::commit(RefExpr::from_offset(1), ResetMode::Hard);
/// assert!(git.reset(&undo).succeeded());
/// ```
#[derive(Debug)]
pub struct Git<R = ProcessRunner> {
    runner: R,
}

impl Git<ProcessRunner> {
    /// Opens `working_dir` for running the git binary named by `$GIT`
    /// (default `"git"`).
    ///
    /// The directory does not need to be a repository yet, so that
    /// [`init`](Self::init) and [`clone`](Self::clone) can run in it.
    ///
    /// Returns an error if `working_dir` does not exist or is not a
    /// directory, or if `$GIT` is not valid UTF-8.
    pub fn open(
        working_dir: impl Into<Utf8PathBuf>,
    ) -> Result<Self, OpenError> {
        let working_dir = working_dir.into();

        // Use metadata() to distinguish "not a directory" from I/O
        // errors (e.g., permission denied).
        match fs::metadata(&working_dir) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(OpenError::NotADirectory { working_dir });
            }
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(OpenError::PathNotFound { working_dir });
            }
            Err(source) => {
                return Err(OpenError::Io { path: working_dir, source });
            }
        }

        let runner = ProcessRunner::from_env(working_dir)?;
        Ok(Git { runner })
    }
}

impl<R: CommandRunner> Git<R> {
    /// Creates a `Git` that sends every invocation to `runner`.
    pub fn with_runner(runner: R) -> Self {
        Git { runner }
    }

    /// Returns the runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Runs `git init`.
    pub fn init(&self, options: &InitOptions) -> CommandOutcome {
        self.run_status(&options.to_invocation())
    }

    /// Runs `git clone`.
    pub fn clone(&self, options: &CloneOptions) -> CommandOutcome {
        self.run_status(&options.to_invocation())
    }

    /// Runs `git add`.
    pub fn add(&self, target: &AddTarget) -> CommandOutcome {
        self.run_status(&target.to_invocation())
    }

    /// Runs `git commit`.
    ///
    /// If [`CommitOptions::capture_summary`] is set and the commit
    /// succeeded, the outcome carries the new commit's summary.
    pub fn commit(&self, options: &CommitOptions) -> CommandOutcome {
        let outcome = self.run_status(&options.to_invocation());
        self.capture_if(outcome, options.capture_summary)
    }

    /// Runs `git reset`.
    ///
    /// If [`ResetOptions::capture_summary`] is set and the reset
    /// succeeded, the outcome carries the summary of the new `HEAD`.
    pub fn reset(&self, options: &ResetOptions) -> CommandOutcome {
        let outcome = self.run_status(&options.to_invocation());
        self.capture_if(outcome, options.capture_summary)
    }

    /// Runs `git push`.
    pub fn push(&self, options: &PushOptions) -> CommandOutcome {
        self.run_status(&options.to_invocation())
    }

    /// Runs `git tag`.
    pub fn tag(&self, options: &TagOptions) -> CommandOutcome {
        self.run_status(&options.to_invocation())
    }

    /// Sets `user.name`, then `user.email`, with `git config`.
    ///
    /// The email is only set if setting the name succeeded; the outcome is
    /// that of the last command run.
    pub fn config_user(&self, config: &UserConfig) -> CommandOutcome {
        let [name, email] = config.to_invocations();
        let outcome = self.run_status(&name);
        if !outcome.succeeded() {
            return outcome;
        }
        self.run_status(&email)
    }

    /// Returns the abbreviated hash and subject of `HEAD`.
    ///
    /// Returns `None` if git fails (e.g., outside a repository, or before
    /// the first commit) or prints something other than
    /// `<hash> <subject>`.
    pub fn last_commit(&self) -> Option<CommitSummary> {
        let RunOutput { exit, stdout } = self.run(&last_commit_invocation());
        let outcome = CommandOutcome::decode(exit, stdout.as_deref());
        if outcome.succeeded() && outcome.summary().is_none() {
            debug!(
                stdout = stdout.as_deref().unwrap_or_default(),
                "git log succeeded but printed no commit summary"
            );
        }
        outcome.into_summary()
    }

    fn run(&self, invocation: &Invocation) -> RunOutput {
        match self.runner.run(invocation) {
            Ok(output) => output,
            Err(error) => {
                warn!(%error, cause = %error.source, "failed to start git");
                RunOutput { exit: ExitCode::NotStarted, stdout: None }
            }
        }
    }

    fn run_status(&self, invocation: &Invocation) -> CommandOutcome {
        CommandOutcome::status(self.run(invocation).exit)
    }

    fn capture_if(
        &self,
        outcome: CommandOutcome,
        capture: bool,
    ) -> CommandOutcome {
        if capture && outcome.succeeded() {
            let summary = self.last_commit();
            outcome.with_summary(summary)
        } else {
            outcome
        }
    }
}
