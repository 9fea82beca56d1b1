// Copyright 2026 Oxide Computer Company

//! Value types for driving the `git` command-line tool.
//!
//! This crate has no I/O. It defines what gets handed to git and how git's
//! answers are read back:
//!
//! - [`RefExpr`] names a commit: `HEAD`, a branch or tag, or an abbreviated
//!   hash, optionally walked back some number of ancestors (`main~2`).
//! - [`ResetMode`] maps to the mode flags of `git reset`.
//! - [`ExitCode`], [`CommitSummary`] and [`CommandOutcome`] decode a
//!   finished process: a boolean status, plus the `<hash> <subject>` line
//!   printed by `git log -1 --oneline --no-decorate` when it was requested.
//!
//! # Examples
//!
//! ```
//! use git_drive::{CommandOutcome, ExitCode, RefExpr};
//!
//! let target = RefExpr::named("main").back(1);
//! assert_eq!(target.to_string(), "main~1");
//!
//! let outcome = CommandOutcome::decode(
//!     ExitCode::Exited(0),
//!     Some("254fde initial commit\n"),
//! );
//! assert!(outcome.succeeded());
//! let summary = outcome.summary().unwrap();
//! assert_eq!(summary.hash(), 0x254fde);
//! assert_eq!(summary.message(), "initial commit");
//! ```
//!
//! # Related crates
//!
//! To actually run git, see `git-drive-exec`.

#![deny(missing_docs)]

mod args;
mod errors;
mod outcome;
mod ref_expr;
mod reset_mode;

pub use args::join_args;
pub use errors::{
    CommitSummaryParseError, RefExprError, RefExprParseError,
    ResetModeParseError,
};
pub use outcome::{CommandOutcome, CommitSummary, ExitCode};
pub use ref_expr::{HASH32_MAX, HEAD, RefExpr, RefOrigin};
pub use reset_mode::ResetMode;
