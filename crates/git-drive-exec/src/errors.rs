// Copyright 2026 Oxide Computer Company

//! Error types for running git.

use camino::Utf8PathBuf;
use std::{ffi::OsString, io};
use thiserror::Error;

/// An error from reading the git binary path from the environment.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum GitEnvError {
    /// The environment variable is set but is not valid UTF-8.
    #[error(
        "${var} environment variable is not valid \
         UTF-8: {value:?}"
    )]
    NonUtf8 {
        /// The environment variable name.
        var: &'static str,
        /// The non-UTF-8 value.
        value: OsString,
    },
}

/// An error that occurs while opening a working directory with
/// [`Git::open`](crate::Git::open).
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum OpenError {
    /// The working directory does not exist.
    #[error("working directory {working_dir} does not exist")]
    PathNotFound {
        /// The path that was provided.
        working_dir: Utf8PathBuf,
    },

    /// The working directory is not a directory.
    #[error("working directory {working_dir} is not a directory")]
    NotADirectory {
        /// The path that was provided.
        working_dir: Utf8PathBuf,
    },

    /// An I/O error occurred while probing the working directory.
    #[error("I/O error while checking working directory {path}")]
    Io {
        /// The path being checked when the error occurred.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// The `$GIT` environment variable is not valid UTF-8.
    #[error(transparent)]
    Env(#[from] GitEnvError),
}

/// Failed to spawn the git process.
#[derive(Debug, Error)]
#[error(
    "failed to run `{command_line}` with {binary_path:?} in {working_dir}"
)]
pub struct SpawnError {
    /// The path to the git executable.
    pub binary_path: String,
    /// The working directory where the command was run.
    pub working_dir: Utf8PathBuf,
    /// The arguments, joined with spaces.
    pub command_line: String,
    /// The underlying I/O error.
    #[source]
    pub source: io::Error,
}
