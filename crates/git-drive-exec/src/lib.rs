// Copyright 2026 Oxide Computer Company

//! Run git subcommands as subprocesses and decode their results.
//!
//! [`Git`] has one method per supported subcommand (init, clone, add,
//! commit, reset, push, tag, config) plus [`Git::last_commit`]. Each takes
//! an options struct, builds an argument list ([`Invocation`]), and hands
//! it to a [`CommandRunner`]. The default runner, [`ProcessRunner`], starts
//! the git binary named by `$GIT` (or `git`) and waits for it.
//!
//! Arguments are passed to git as a list, never through a shell, so commit
//! messages and paths are delivered exactly as given.
//!
//! Results follow git's own convention: exit code 0 is success. Failures,
//! including a git binary that cannot be started, come back as a falsy
//! [`CommandOutcome`](git_drive::CommandOutcome) rather than an error.
//!
//! # Usage
//!
//! ```no_run
//! use git_drive_exec::{AddTarget, CommitOptions, Git, UserConfig};
//!
//! let git = Git::open("/path/to/repo").expect("directory exists");
//! assert!(git.config_user(&UserConfig::new("Ferris", "ferris@example.com"))
//!     .succeeded());
//! assert!(git.add(&AddTarget::All).succeeded());
//!
//! let outcome = git.commit(&CommitOptions {
//!     capture_summary: true,
//!     ..CommitOptions::new("Add everything")
//! });
//! println!("{:?}", outcome.summary());
//! ```
//!
//! # Testing without git
//!
//! Implement [`CommandRunner`] and pass it to [`Git::with_runner`] to check
//! the argument lists a piece of code produces without starting processes.
//!
//! # Logging
//!
//! Commands, exit codes and the stderr of failed commands are emitted as
//! [`tracing`] events at debug level; failures to start git are warnings.

#![deny(missing_docs)]

mod errors;
mod git;
mod invocation;
mod options;
mod runner;

pub use errors::{GitEnvError, OpenError, SpawnError};
pub use git::Git;
pub use invocation::Invocation;
pub use options::{
    AddTarget, CloneOptions, CommitOptions, ConfigScope, InitOptions,
    PushOptions, ResetOptions, ResetTarget, TagAction, TagOptions,
    UserConfig,
};
pub use runner::{CommandRunner, ProcessRunner, RunOutput};
