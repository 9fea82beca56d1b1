// Copyright 2026 Oxide Computer Company

//! Reset modes.

use crate::ResetModeParseError;
use std::{fmt, str::FromStr};

/// How `git reset` treats the index and working tree.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum ResetMode {
    /// No mode flag: git's own default (`--mixed`).
    #[default]
    None,
    /// `--soft`
    Soft,
    /// `--mixed`
    Mixed,
    /// `--hard`
    Hard,
    /// `--merge`
    Merge,
    /// `--keep`
    Keep,
}

impl ResetMode {
    /// All modes, in discriminant order.
    pub const ALL: [ResetMode; 6] = [
        ResetMode::None,
        ResetMode::Soft,
        ResetMode::Mixed,
        ResetMode::Hard,
        ResetMode::Merge,
        ResetMode::Keep,
    ];

    /// Returns the flag passed to `git reset`, or `None` for the default
    /// behavior.
    pub fn flag(self) -> Option<&'static str> {
        match self {
            ResetMode::None => None,
            ResetMode::Soft => Some("--soft"),
            ResetMode::Mixed => Some("--mixed"),
            ResetMode::Hard => Some("--hard"),
            ResetMode::Merge => Some("--merge"),
            ResetMode::Keep => Some("--keep"),
        }
    }

    /// Returns the lowercase name accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            ResetMode::None => "none",
            ResetMode::Soft => "soft",
            ResetMode::Mixed => "mixed",
            ResetMode::Hard => "hard",
            ResetMode::Merge => "merge",
            ResetMode::Keep => "keep",
        }
    }
}

impl fmt::Display for ResetMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<u8> for ResetMode {
    type Error = ResetModeParseError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        ResetMode::ALL
            .get(usize::from(value))
            .copied()
            .ok_or(ResetModeParseError::UnknownDiscriminant(value))
    }
}

impl FromStr for ResetMode {
    type Err = ResetModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ResetMode::ALL
            .into_iter()
            .find(|mode| mode.name() == s)
            .ok_or_else(|| ResetModeParseError::UnknownName(s.to_owned()))
    }
}
