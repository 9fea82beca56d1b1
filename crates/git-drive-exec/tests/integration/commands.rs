// Copyright 2026 Oxide Computer Company

use anyhow::{Result, bail};
use atomicwrites::{AtomicFile, OverwriteBehavior};
use camino::{Utf8Path, Utf8PathBuf};
use camino_tempfile::Utf8TempDir;
use chrono::{TimeZone, Utc};
use git_drive::{ExitCode, RefExpr, ResetMode};
use git_drive_exec::{
    AddTarget, CloneOptions, CommitOptions, Git, InitOptions, ProcessRunner,
    PushOptions, ResetOptions, TagOptions, UserConfig,
};
use std::{fs, io::Write, process::Command};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Returns a `Command` for git, respecting the `$GIT` environment variable.
fn git_command() -> Command {
    let bin = std::env::var("GIT").unwrap_or_else(|_| "git".to_string());
    Command::new(bin)
}

/// Runs raw git in `dir` and returns its trimmed stdout.
fn git_output(dir: &Utf8Path, args: &[&str]) -> Result<String> {
    let output = git_command().args(args).current_dir(dir).output()?;
    if !output.status.success() {
        bail!(
            "git {} failed ({}): {}",
            args.join(" "),
            output.status,
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }
    Ok(String::from_utf8(output.stdout)?.trim().to_string())
}

/// Writes content to a file atomically.
fn write_file(
    path: impl AsRef<Utf8Path>,
    content: impl AsRef<[u8]>,
) -> std::io::Result<()> {
    let path = path.as_ref();
    AtomicFile::new(path, OverwriteBehavior::AllowOverwrite)
        .write(|f| f.write_all(content.as_ref()))
        .map_err(|e| e.into())
}

/// Initializes a repository in a fresh temporary directory and configures
/// a committer through `Git` itself.
fn setup_repo() -> Result<(Utf8TempDir, Git)> {
    let temp = Utf8TempDir::with_prefix("git-drive-")?;
    let git = Git::open(temp.path())?;

    assert!(git.init(&InitOptions::default()).succeeded(), "git init");
    assert!(
        git.config_user(&UserConfig::new("Test User", "test@example.com"))
            .succeeded(),
        "git config user"
    );
    // Keep a global signing setup on the test machine out of the way.
    git_output(temp.path(), &["config", "commit.gpgsign", "false"])?;
    git_output(temp.path(), &["config", "tag.gpgsign", "false"])?;

    Ok((temp, git))
}

/// Writes `contents` to `name`, stages everything and commits.
fn commit_file(
    git: &Git,
    repo_root: &Utf8Path,
    name: &str,
    contents: &str,
    message: &str,
) -> Result<u64> {
    write_file(repo_root.join(name), contents)?;
    assert!(git.add(&AddTarget::All).succeeded(), "git add .");
    let outcome = git.commit(&CommitOptions {
        capture_summary: true,
        ..CommitOptions::new(message)
    });
    assert!(outcome.succeeded(), "git commit -m {message:?}");
    let summary = outcome.summary().expect("commit captured a summary");
    Ok(summary.hash())
}

/// Returns the abbreviated hash of `rev` as a number.
fn short_hash(repo_root: &Utf8Path, rev: &str) -> Result<u64> {
    let hash = git_output(repo_root, &["rev-parse", "--short", rev])?;
    Ok(u64::from_str_radix(&hash, 16)?)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn test_commit_captures_summary() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();

    write_file(repo_root.join("README.md"), "hello\n")?;
    assert!(git.add(&AddTarget::All).succeeded());
    let outcome = git.commit(&CommitOptions {
        capture_summary: true,
        ..CommitOptions::new("initial commit")
    });

    assert!(outcome.succeeded());
    assert_eq!(outcome.exit(), ExitCode::Exited(0));
    let summary = outcome.summary().expect("summary is present");
    assert_eq!(summary.message(), "initial commit");
    assert_eq!(
        summary.hash(),
        short_hash(repo_root, "HEAD")?,
        "hash should match git's abbreviation of HEAD"
    );
    assert_eq!(git.last_commit().as_ref(), Some(summary));

    Ok(())
}

#[test]
fn test_last_commit_before_first_commit() -> Result<()> {
    let (_temp, git) = setup_repo()?;
    assert_eq!(git.last_commit(), None, "empty repository has no HEAD");

    Ok(())
}

#[test]
fn test_commit_nothing_fails() -> Result<()> {
    let (temp, git) = setup_repo()?;
    commit_file(&git, temp.path(), "a.txt", "a", "first")?;

    let outcome = git.commit(&CommitOptions {
        capture_summary: true,
        ..CommitOptions::new("nothing to commit")
    });
    assert!(!outcome.succeeded(), "clean tree should fail to commit");
    assert_eq!(outcome.summary(), None, "failure never carries a summary");

    let outcome = git.commit(&CommitOptions {
        allow_empty: true,
        capture_summary: true,
        ..CommitOptions::new("empty on purpose")
    });
    assert!(outcome.succeeded(), "--allow-empty should commit");
    assert_eq!(
        outcome.summary().map(|s| s.message()),
        Some("empty on purpose")
    );

    Ok(())
}

#[test]
fn test_commit_message_is_not_shell_quoted() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let message = r#"say "hi" & echo $HOME 'now'"#;

    commit_file(&git, temp.path(), "a.txt", "a", message)?;
    let summary = git.last_commit().expect("summary is present");
    assert_eq!(summary.message(), message, "message arrives verbatim");

    Ok(())
}

#[test]
fn test_commit_all_and_amend() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    commit_file(&git, repo_root, "a.txt", "one", "first")?;

    // --all stages the tracked modification without a separate add.
    write_file(repo_root.join("a.txt"), "two")?;
    let outcome = git.commit(&CommitOptions {
        all: true,
        ..CommitOptions::new("second")
    });
    assert!(outcome.succeeded());
    assert_eq!(git_output(repo_root, &["status", "--porcelain"])?, "");

    let outcome = git.commit(&CommitOptions {
        amend: true,
        capture_summary: true,
        ..CommitOptions::new("second, reworded")
    });
    assert!(outcome.succeeded());
    assert_eq!(
        outcome.summary().map(|s| s.message()),
        Some("second, reworded")
    );
    assert_eq!(
        git_output(repo_root, &["rev-list", "--count", "HEAD"])?,
        "2",
        "amend replaces the tip instead of adding a commit"
    );

    Ok(())
}

#[test]
fn test_commit_date() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    write_file(repo_root.join("a.txt"), "a")?;
    assert!(git.add(&AddTarget::All).succeeded());

    let date = Utc.with_ymd_and_hms(2009, 6, 15, 20, 45, 30).unwrap();
    let outcome = git.commit(&CommitOptions {
        date: Some(date),
        ..CommitOptions::new("dated")
    });
    assert!(outcome.succeeded());

    let author_time = git_output(repo_root, &["log", "-1", "--format=%at"])?;
    assert_eq!(author_time, date.timestamp().to_string());

    Ok(())
}

#[test]
fn test_add_explicit_paths() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    write_file(repo_root.join("-dash.txt"), "dash")?;
    write_file(repo_root.join("other.txt"), "other")?;

    let target = AddTarget::Paths(vec![Utf8PathBuf::from("-dash.txt")]);
    assert!(git.add(&target).succeeded());
    assert_eq!(
        git_output(repo_root, &["diff", "--cached", "--name-only"])?,
        "-dash.txt",
        "only the named path is staged"
    );

    let target = AddTarget::Paths(vec![Utf8PathBuf::from("missing.txt")]);
    assert!(!git.add(&target).succeeded(), "missing path fails");

    Ok(())
}

#[test]
fn test_reset_hard_to_parent() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    let first = commit_file(&git, repo_root, "a.txt", "one", "first")?;
    commit_file(&git, repo_root, "a.txt", "two", "second")?;

    let outcome = git.reset(
        &ResetOptions::commit(RefExpr::head().back(1), ResetMode::Hard)
            .capturing_summary(),
    );
    assert!(outcome.succeeded());
    let summary = outcome.summary().expect("summary is present");
    assert_eq!(summary.hash(), first);
    assert_eq!(summary.message(), "first");
    assert_eq!(fs::read_to_string(repo_root.join("a.txt"))?, "one");

    Ok(())
}

#[test]
fn test_reset_to_captured_hash() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    commit_file(&git, repo_root, "a.txt", "one", "first")?;
    let first = git.last_commit().expect("summary is present");
    commit_file(&git, repo_root, "a.txt", "two", "second")?;
    commit_file(&git, repo_root, "a.txt", "three", "third")?;

    let outcome = git.reset(&ResetOptions::commit(
        first.to_ref_expr(),
        ResetMode::Soft,
    ));
    assert!(outcome.succeeded());
    assert_eq!(outcome.summary(), None, "capture was not requested");
    assert_eq!(git.last_commit(), Some(first));
    assert_eq!(
        fs::read_to_string(repo_root.join("a.txt"))?,
        "three",
        "soft reset keeps the working tree"
    );

    Ok(())
}

#[test]
fn test_reset_to_unknown_ref_fails() -> Result<()> {
    let (temp, git) = setup_repo()?;
    commit_file(&git, temp.path(), "a.txt", "one", "first")?;

    let outcome = git.reset(
        &ResetOptions::commit(RefExpr::head().back(5), ResetMode::Keep)
            .capturing_summary(),
    );
    assert!(!outcome.succeeded(), "HEAD~5 does not exist");
    assert_eq!(outcome.summary(), None);

    Ok(())
}

#[test]
fn test_reset_paths_unstages() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    commit_file(&git, repo_root, "a.txt", "one", "first")?;

    write_file(repo_root.join("a.txt"), "two")?;
    assert!(git.add(&AddTarget::All).succeeded());
    let outcome =
        git.reset(&ResetOptions::paths(["a.txt"]).capturing_summary());
    assert!(outcome.succeeded());
    assert_eq!(
        outcome.summary().map(|s| s.message()),
        Some("first"),
        "HEAD does not move"
    );
    assert_eq!(
        git_output(repo_root, &["diff", "--cached", "--name-only"])?,
        ""
    );
    assert_eq!(fs::read_to_string(repo_root.join("a.txt"))?, "two");

    Ok(())
}

#[test]
fn test_tag_create_and_delete() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    let first = commit_file(&git, repo_root, "a.txt", "one", "first")?;
    let second = commit_file(&git, repo_root, "a.txt", "two", "second")?;

    assert!(git.tag(&TagOptions::create("latest")).succeeded());
    assert_eq!(short_hash(repo_root, "latest")?, second);

    let annotated = TagOptions::annotated("v1", "release one")
        .at(RefExpr::head().back(1));
    assert!(git.tag(&annotated).succeeded());
    assert_eq!(short_hash(repo_root, "v1^{commit}")?, first);
    assert_eq!(
        git_output(repo_root, &["tag", "-l", "--format=%(contents)", "v1"])?,
        "release one"
    );

    assert!(
        !git.tag(&TagOptions::create("latest").at(RefExpr::head().back(1)))
            .succeeded(),
        "existing tag without force fails"
    );
    let forced = TagOptions {
        force: true,
        ..TagOptions::create("latest").at(RefExpr::head().back(1))
    };
    assert!(git.tag(&forced).succeeded());
    assert_eq!(short_hash(repo_root, "latest")?, first);

    assert!(git.tag(&TagOptions::delete("v1")).succeeded());
    assert_eq!(git_output(repo_root, &["tag", "-l", "v1"])?, "");
    assert!(
        !git.tag(&TagOptions::delete("v1")).succeeded(),
        "deleting a missing tag fails"
    );

    Ok(())
}

#[test]
fn test_push_and_clone_through_local_remote() -> Result<()> {
    let (temp, git) = setup_repo()?;
    let repo_root = temp.path();
    let head = commit_file(&git, repo_root, "a.txt", "one", "first")?;
    git_output(repo_root, &["branch", "feature"])?;
    assert!(git.tag(&TagOptions::create("v1")).succeeded());

    let remote_dir = Utf8TempDir::with_prefix("git-drive-remote-")?;
    git_output(remote_dir.path(), &["init", "--bare", "."])?;
    git_output(
        repo_root,
        &["remote", "add", "origin", remote_dir.path().as_str()],
    )?;

    let push = PushOptions {
        tags: true,
        set_upstream: true,
        ..PushOptions::to_remote("origin", "HEAD")
    };
    assert!(git.push(&push).succeeded());
    assert!(
        git.push(&PushOptions::to_remote("origin", "feature")).succeeded()
    );
    assert_eq!(short_hash(remote_dir.path(), "v1")?, head, "tags pushed");

    // Clone back out of the bare remote.
    let clone_parent = Utf8TempDir::with_prefix("git-drive-clone-")?;
    let cloner = Git::open(clone_parent.path())?;

    let options = CloneOptions {
        directory: Some("full".into()),
        ..CloneOptions::new(remote_dir.path().as_str())
    };
    assert!(cloner.clone(&options).succeeded());
    let full = clone_parent.path().join("full");
    assert_eq!(fs::read_to_string(full.join("a.txt"))?, "one");
    assert_eq!(
        Git::open(&full)?.last_commit().map(|s| s.hash()),
        Some(head)
    );

    let options = CloneOptions {
        checkout: false,
        branch: Some("feature".to_owned()),
        directory: Some("bare-tree".into()),
        ..CloneOptions::new(remote_dir.path().as_str())
    };
    assert!(cloner.clone(&options).succeeded());
    let no_checkout = clone_parent.path().join("bare-tree");
    assert!(
        !no_checkout.join("a.txt").exists(),
        "-n skips the checkout"
    );
    assert_eq!(
        git_output(&no_checkout, &["rev-parse", "--abbrev-ref", "HEAD"])?,
        "feature"
    );

    Ok(())
}

#[test]
fn test_clone_failure() -> Result<()> {
    let temp = Utf8TempDir::with_prefix("git-drive-")?;
    let git = Git::open(temp.path())?;

    let outcome = git.clone(&CloneOptions::new(""));
    assert!(!outcome.succeeded(), "empty URL should fail");
    assert!(matches!(outcome.exit(), ExitCode::Exited(code) if code != 0));

    let missing = temp.path().join("no-such-remote");
    let outcome = git.clone(&CloneOptions::new(missing.as_str()));
    assert!(!outcome.succeeded(), "missing remote should fail");

    Ok(())
}

#[test]
fn test_missing_binary_is_not_started() -> Result<()> {
    let temp = Utf8TempDir::with_prefix("git-drive-")?;
    let runner =
        ProcessRunner::new("/nonexistent/git-drive-test-binary", temp.path());
    let git = Git::with_runner(runner);

    let outcome = git.commit(&CommitOptions {
        capture_summary: true,
        ..CommitOptions::new("m")
    });
    assert_eq!(outcome.exit(), ExitCode::NotStarted);
    assert!(!bool::from(outcome));
    assert_eq!(git.last_commit(), None);

    Ok(())
}
