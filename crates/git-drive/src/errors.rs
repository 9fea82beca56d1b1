// Copyright 2026 Oxide Computer Company

//! Error types for git-drive value types.

use thiserror::Error;

/// An error that occurs while constructing a [`RefExpr`](crate::RefExpr)
/// from a numeric abbreviated hash.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RefExprError {
    /// The value does not fit in the 31-bit abbreviated hash range.
    #[error(
        "abbreviated hash {value:#x} is out of range \
         (expected at most {max:#x})"
    )]
    Hash32OutOfRange {
        /// The rejected value.
        value: u32,
        /// The largest accepted value.
        max: u32,
    },
}

/// An error that occurs while parsing a [`RefExpr`](crate::RefExpr) from
/// its textual form.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum RefExprParseError {
    /// The input was empty or contained only whitespace.
    #[error("ref expression is empty")]
    EmptyInput,

    /// The input consisted only of `~N` suffixes.
    #[error("ref expression {0:?} has no origin before '~'")]
    EmptyOrigin(String),

    /// An ancestor offset was not a decimal integer, or the offsets added
    /// up to more than `u32::MAX`.
    #[error("invalid ancestor offset in ref expression {0:?}")]
    InvalidOffset(String),
}

/// An error that occurs while selecting a [`ResetMode`](crate::ResetMode)
/// from an untyped value.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ResetModeParseError {
    /// The numeric discriminant does not name a reset mode.
    #[error("unknown reset mode discriminant {0} (expected 0 through 5)")]
    UnknownDiscriminant(u8),

    /// The name does not name a reset mode.
    #[error(
        "unknown reset mode {0:?} \
         (expected none, soft, mixed, hard, merge or keep)"
    )]
    UnknownName(String),
}

/// An error that occurs while parsing a
/// [`CommitSummary`](crate::CommitSummary) from a one-line log entry.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum CommitSummaryParseError {
    /// The line did not contain both a hash and a message.
    #[error("expected '<hash> <message>', got {0:?}")]
    MissingMessage(String),

    /// The first token is not a hexadecimal value that fits in 64 bits.
    #[error("invalid abbreviated hash {0:?}")]
    InvalidHash(String),
}
