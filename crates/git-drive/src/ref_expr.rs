// Copyright 2026 Oxide Computer Company

//! Ref expressions: which commit a command should act on.

use crate::{RefExprError, RefExprParseError};
use std::{fmt, str::FromStr};

/// The token git uses for the currently checked-out commit.
pub const HEAD: &str = "HEAD";

/// The largest value accepted by [`RefExpr::from_hash32`].
pub const HASH32_MAX: u32 = 0x7fff_ffff;

/// The starting point of a [`RefExpr`], before any ancestor offset is
/// applied.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RefOrigin {
    /// A symbolic name such as a branch or tag.
    Named(String),
    /// An abbreviated hash of at most 31 bits.
    Hash32(u32),
    /// An abbreviated hash of up to 16 hex digits.
    Hash64(u64),
    /// The current `HEAD`.
    Head,
}

impl fmt::Display for RefOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RefOrigin::Named(name) => f.write_str(name),
            RefOrigin::Hash32(hash) => write!(f, "{hash:x}"),
            RefOrigin::Hash64(hash) => write!(f, "{hash:x}"),
            RefOrigin::Head => f.write_str(HEAD),
        }
    }
}

/// A reference to a commit: an origin, optionally walked back a number of
/// ancestors.
///
/// `RefExpr` is an immutable value. Methods that change the offset return a
/// new value.
///
/// # Invariants
///
/// - An offset of 0 renders no suffix; an offset of `N > 0` renders `~N`.
/// - A [`RefOrigin::Hash32`] origin never exceeds [`HASH32_MAX`].
///
/// # Examples
///
/// ```
/// use git_drive::RefExpr;
///
/// assert_eq!(RefExpr::head().to_string(), "HEAD");
/// assert_eq!(RefExpr::named("main").back(2).to_string(), "main~2");
/// assert_eq!(
///     RefExpr::from_hash64(0x254fde25f).with_offset(1).to_string(),
///     "254fde25f~1",
/// );
///
/// let parsed: RefExpr = "main~1~1".parse().unwrap();
/// assert_eq!(parsed, RefExpr::named("main").with_offset(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct RefExpr {
    origin: RefOrigin,
    offset: u32,
}

impl RefExpr {
    /// Returns an expression for the current `HEAD`.
    pub fn head() -> Self {
        RefExpr { origin: RefOrigin::Head, offset: 0 }
    }

    /// Returns an expression for `HEAD~offset`.
    pub fn from_offset(offset: u32) -> Self {
        RefExpr { origin: RefOrigin::Head, offset }
    }

    /// Returns an expression for a branch, tag or other symbolic name.
    ///
    /// The name is passed through verbatim.
    pub fn named(name: impl Into<String>) -> Self {
        RefExpr { origin: RefOrigin::Named(name.into()), offset: 0 }
    }

    /// Returns an expression for a 31-bit abbreviated hash.
    ///
    /// Returns an error if `hash` is larger than [`HASH32_MAX`]. Larger
    /// values must go through [`RefExpr::from_hash64`].
    pub fn from_hash32(hash: u32) -> Result<Self, RefExprError> {
        if hash > HASH32_MAX {
            return Err(RefExprError::Hash32OutOfRange {
                value: hash,
                max: HASH32_MAX,
            });
        }
        Ok(RefExpr { origin: RefOrigin::Hash32(hash), offset: 0 })
    }

    /// Returns an expression for an abbreviated hash of up to 16 hex
    /// digits.
    pub fn from_hash64(hash: u64) -> Self {
        RefExpr { origin: RefOrigin::Hash64(hash), offset: 0 }
    }

    /// Returns a copy of this expression with the ancestor offset replaced.
    pub fn with_offset(&self, offset: u32) -> Self {
        RefExpr { origin: self.origin.clone(), offset }
    }

    /// Returns a copy of this expression walked back `steps` more
    /// ancestors.
    ///
    /// The offset saturates at `u32::MAX`.
    pub fn back(&self, steps: u32) -> Self {
        self.with_offset(self.offset.saturating_add(steps))
    }

    /// Returns the origin.
    pub fn origin(&self) -> &RefOrigin {
        &self.origin
    }

    /// Returns the ancestor offset.
    pub fn offset(&self) -> u32 {
        self.offset
    }

    /// Returns the textual form passed to git.
    ///
    /// This is the same as the [`Display`](fmt::Display) output.
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Default for RefExpr {
    fn default() -> Self {
        RefExpr::head()
    }
}

impl fmt::Display for RefExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        if self.offset > 0 {
            write!(f, "~{}", self.offset)?;
        }
        Ok(())
    }
}

impl FromStr for RefExpr {
    type Err = RefExprParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(RefExprParseError::EmptyInput);
        }

        // Peel `~N` suffixes off the end. Git reads a bare `~` as `~1`.
        let mut origin = trimmed;
        let mut offset: u32 = 0;
        while let Some((rest, suffix)) = origin.rsplit_once('~') {
            let steps = if suffix.is_empty() {
                1
            } else if suffix.bytes().all(|b| b.is_ascii_digit()) {
                suffix.parse::<u32>().map_err(|_| {
                    RefExprParseError::InvalidOffset(trimmed.to_owned())
                })?
            } else {
                return Err(RefExprParseError::InvalidOffset(
                    trimmed.to_owned(),
                ));
            };
            offset = offset.checked_add(steps).ok_or_else(|| {
                RefExprParseError::InvalidOffset(trimmed.to_owned())
            })?;
            origin = rest;
        }

        if origin.is_empty() {
            return Err(RefExprParseError::EmptyOrigin(trimmed.to_owned()));
        }

        // Hex-looking names stay symbolic: `cafe` may well be a branch.
        let origin = if origin == HEAD {
            RefOrigin::Head
        } else {
            RefOrigin::Named(origin.to_owned())
        };
        Ok(RefExpr { origin, offset })
    }
}
