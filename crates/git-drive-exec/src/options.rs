// Copyright 2026 Oxide Computer Company

//! Options for each git subcommand, and the argument lists they produce.

use crate::Invocation;
use camino::Utf8PathBuf;
use chrono::{DateTime, Utc};
use git_drive::{RefExpr, ResetMode};

/// The format of commit dates: RFC 1123, always in UTC.
const RFC1123_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Options for `git init`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InitOptions {
    /// The directory to create the repository in, relative to the working
    /// directory. Defaults to the working directory itself.
    pub directory: Option<Utf8PathBuf>,
}

impl InitOptions {
    /// Returns the arguments for this init.
    pub fn to_invocation(&self) -> Invocation {
        Invocation::new("init")
            .arg_opt(self.directory.as_ref().map(|d| d.as_str()))
    }
}

/// Options for `git clone`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CloneOptions {
    /// The repository to clone from.
    pub url: String,
    /// Whether to check out `HEAD` after cloning. Defaults to true;
    /// false passes `-n`.
    pub checkout: bool,
    /// The branch to point the new `HEAD` at (`-b`), instead of the
    /// remote's `HEAD`.
    pub branch: Option<String>,
    /// The directory to clone into. Defaults to git's choice, derived from
    /// the URL.
    pub directory: Option<Utf8PathBuf>,
}

impl CloneOptions {
    /// Creates options to clone `url` with all defaults.
    pub fn new(url: impl Into<String>) -> Self {
        CloneOptions {
            url: url.into(),
            checkout: true,
            branch: None,
            directory: None,
        }
    }

    /// Returns the arguments for this clone.
    pub fn to_invocation(&self) -> Invocation {
        Invocation::new("clone")
            .arg_if(!self.checkout, "-n")
            .arg_pair_opt("-b", self.branch.as_deref())
            .arg(self.url.as_str())
            .arg_opt(self.directory.as_ref().map(|d| d.as_str()))
    }
}

/// What `git add` should stage.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AddTarget {
    /// Everything under the working directory (`add .`).
    All,
    /// Only these paths.
    Paths(Vec<Utf8PathBuf>),
}

impl AddTarget {
    /// Returns the arguments for this add.
    pub fn to_invocation(&self) -> Invocation {
        match self {
            AddTarget::All => Invocation::new("add").arg("."),
            // `--` is required so paths beginning with `-` are treated as
            // paths rather than options.
            AddTarget::Paths(paths) => Invocation::new("add")
                .arg("--")
                .extend(paths.iter().map(|p| p.as_str())),
        }
    }
}

/// Options for `git commit`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitOptions {
    /// The commit message (`-m`).
    pub message: String,
    /// Stage all modified and deleted tracked files first (`--all`).
    pub all: bool,
    /// Replace the tip of the current branch (`--amend`).
    pub amend: bool,
    /// Allow a commit with no changes (`--allow-empty`).
    pub allow_empty: bool,
    /// Override the author date (`--date`).
    pub date: Option<DateTime<Utc>>,
    /// After a successful commit, read back the new commit's summary.
    pub capture_summary: bool,
}

impl CommitOptions {
    /// Creates options to commit with `message` and all defaults.
    pub fn new(message: impl Into<String>) -> Self {
        CommitOptions {
            message: message.into(),
            all: false,
            amend: false,
            allow_empty: false,
            date: None,
            capture_summary: false,
        }
    }

    /// Returns the arguments for this commit.
    pub fn to_invocation(&self) -> Invocation {
        let date = self
            .date
            .map(|date| format!("--date={}", date.format(RFC1123_FORMAT)));
        Invocation::new("commit")
            .arg("-m")
            .arg(self.message.as_str())
            .arg_if(self.all, "--all")
            .arg_if(self.amend, "--amend")
            .arg_if(self.allow_empty, "--allow-empty")
            .arg_opt(date)
    }
}

/// What `git reset` should reset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ResetTarget {
    /// Move the current branch to `target`.
    Commit {
        /// The commit to reset to.
        target: RefExpr,
        /// How to treat the index and working tree.
        mode: ResetMode,
    },
    /// Unstage these paths, leaving the branch where it is.
    Paths(Vec<Utf8PathBuf>),
}

/// Options for `git reset`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResetOptions {
    /// What to reset.
    pub target: ResetTarget,
    /// After a successful reset, read back the summary of `HEAD`.
    pub capture_summary: bool,
}

impl ResetOptions {
    /// Creates options to reset the current branch to `target`.
    pub fn commit(target: RefExpr, mode: ResetMode) -> Self {
        ResetOptions {
            target: ResetTarget::Commit { target, mode },
            capture_summary: false,
        }
    }

    /// Creates options to unstage `paths`.
    pub fn paths<I, P>(paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Utf8PathBuf>,
    {
        ResetOptions {
            target: ResetTarget::Paths(
                paths.into_iter().map(Into::into).collect(),
            ),
            capture_summary: false,
        }
    }

    /// Requests the summary of `HEAD` after a successful reset.
    pub fn capturing_summary(mut self) -> Self {
        self.capture_summary = true;
        self
    }

    /// Returns the arguments for this reset.
    pub fn to_invocation(&self) -> Invocation {
        match &self.target {
            ResetTarget::Commit { target, mode } => Invocation::new("reset")
                .arg_opt(mode.flag())
                .arg(target.to_string()),
            ResetTarget::Paths(paths) => Invocation::new("reset")
                .arg("--")
                .extend(paths.iter().map(|p| p.as_str())),
        }
    }
}

/// Options for `git push`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PushOptions {
    /// Push all tags as well (`--tags`).
    pub tags: bool,
    /// Overwrite remote refs that are not ancestors (`-f`).
    pub force: bool,
    /// Record the remote as upstream of the pushed branch (`-u`).
    pub set_upstream: bool,
    /// The remote to push to. Defaults to git's configured remote.
    pub remote: Option<String>,
    /// What to push, e.g. `main` or `HEAD:refs/heads/main`. Only used when
    /// `remote` is also set, since git reads the first positional argument
    /// as the remote.
    pub refspec: Option<String>,
}

impl PushOptions {
    /// Creates options to push `refspec` to `remote`.
    pub fn to_remote(
        remote: impl Into<String>,
        refspec: impl Into<String>,
    ) -> Self {
        PushOptions {
            remote: Some(remote.into()),
            refspec: Some(refspec.into()),
            ..PushOptions::default()
        }
    }

    /// Returns the arguments for this push.
    pub fn to_invocation(&self) -> Invocation {
        let refspec = self.remote.as_ref().and(self.refspec.as_deref());
        Invocation::new("push")
            .arg_if(self.tags, "--tags")
            .arg_if(self.force, "-f")
            .arg_if(self.set_upstream, "-u")
            .arg_opt(self.remote.as_deref())
            .arg_opt(refspec)
    }
}

/// Whether `git tag` creates or deletes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TagAction {
    /// Create a tag pointing at `target`.
    Create {
        /// The commit to tag.
        target: RefExpr,
        /// An annotation message (`-m`). Without one, the tag is
        /// lightweight.
        message: Option<String>,
    },
    /// Delete the tag (`-d`).
    Delete,
}

/// Options for `git tag`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TagOptions {
    /// The tag name.
    pub label: String,
    /// What to do with it.
    pub action: TagAction,
    /// Replace an existing tag of the same name (`-f`).
    pub force: bool,
}

impl TagOptions {
    /// Creates options for a lightweight tag on `HEAD`.
    pub fn create(label: impl Into<String>) -> Self {
        TagOptions {
            label: label.into(),
            action: TagAction::Create {
                target: RefExpr::head(),
                message: None,
            },
            force: false,
        }
    }

    /// Creates options for an annotated tag on `HEAD`.
    pub fn annotated(
        label: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        TagOptions {
            label: label.into(),
            action: TagAction::Create {
                target: RefExpr::head(),
                message: Some(message.into()),
            },
            force: false,
        }
    }

    /// Creates options to delete a tag.
    pub fn delete(label: impl Into<String>) -> Self {
        TagOptions {
            label: label.into(),
            action: TagAction::Delete,
            force: false,
        }
    }

    /// Points a created tag at `target` instead of `HEAD`.
    ///
    /// Has no effect on a deletion.
    pub fn at(mut self, new_target: RefExpr) -> Self {
        if let TagAction::Create { target, .. } = &mut self.action {
            *target = new_target;
        }
        self
    }

    /// Returns the arguments for this tag operation.
    pub fn to_invocation(&self) -> Invocation {
        let invocation = Invocation::new("tag").arg_if(self.force, "-f");
        match &self.action {
            TagAction::Create { target, message } => invocation
                .arg_pair_opt("-m", message.as_deref())
                .arg(self.label.as_str())
                .arg(target.to_string()),
            TagAction::Delete => invocation.arg("-d").arg(self.label.as_str()),
        }
    }
}

/// Which configuration file `git config` writes to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ConfigScope {
    /// The repository's own configuration.
    #[default]
    Local,
    /// The user's global configuration (`--global`).
    Global,
}

/// The committer identity to store with `git config`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UserConfig {
    /// The value for `user.name`.
    pub name: String,
    /// The value for `user.email`.
    pub email: String,
    /// Where to store them.
    pub scope: ConfigScope,
}

impl UserConfig {
    /// Creates a local identity.
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        UserConfig {
            name: name.into(),
            email: email.into(),
            scope: ConfigScope::Local,
        }
    }

    /// Returns the two invocations, name first, then email.
    pub fn to_invocations(&self) -> [Invocation; 2] {
        let config = |key: &str, value: &str| {
            Invocation::new("config")
                .arg_if(self.scope == ConfigScope::Global, "--global")
                .arg(key)
                .arg(value)
        };
        [config("user.name", &self.name), config("user.email", &self.email)]
    }
}

/// The arguments for reading the summary of `HEAD`.
pub(crate) fn last_commit_invocation() -> Invocation {
    Invocation::new("log")
        .extend(["-1", "--oneline", "--no-decorate"])
        .capture_stdout()
}
