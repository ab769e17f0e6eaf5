//! Git command runner for nsprep.
//!
//! Wraps the `git` binary with captured stdout/stderr. Branch resolution is
//! deliberately infallible: any failure yields an empty branch name.

use crate::error::{PrepError, Result};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of a successful git command execution.
#[derive(Debug, Clone)]
pub struct GitOutput {
    /// Standard output from the command (trimmed).
    pub stdout: String,
    /// Standard error from the command (trimmed).
    pub stderr: String,
}

impl GitOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run a git command in `cwd`.
///
/// # Returns
///
/// * `Ok(GitOutput)` - On exit code 0
/// * `Err(PrepError::GitError)` - If git cannot be spawned or exits non-zero
pub fn run_git<P: AsRef<Path>>(cwd: P, args: &[&str]) -> Result<GitOutput> {
    let output = Command::new("git")
        .current_dir(cwd.as_ref())
        .args(args)
        .output()
        .map_err(|e| {
            PrepError::GitError(format!(
                "failed to execute git {}: {} (is git installed?)",
                args.first().unwrap_or(&""),
                e
            ))
        })?;

    let git_output = GitOutput::from_output(&output);

    if output.status.success() {
        Ok(git_output)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if git_output.stderr.is_empty() {
            git_output.stdout.clone()
        } else {
            git_output.stderr.clone()
        };

        Err(PrepError::GitError(format!(
            "git {} failed (exit code {}): {}",
            args.first().unwrap_or(&""),
            exit_code,
            error_msg
        )))
    }
}

/// Short name of the branch checked out in `cwd`.
///
/// Queries `git symbolic-ref -q HEAD` and keeps the last `/` segment of the
/// reference, so `refs/heads/release/prod` resolves to `prod`. Returns an
/// empty string for a detached HEAD, outside a repository, or when git is
/// unavailable.
pub fn resolve_branch<P: AsRef<Path>>(cwd: P) -> String {
    match run_git(cwd, &["symbolic-ref", "-q", "HEAD"]) {
        Ok(output) => short_branch_name(&output.stdout).to_string(),
        Err(_) => String::new(),
    }
}

/// Trailing path segment of a symbolic reference.
pub fn short_branch_name(reference: &str) -> &str {
    reference.trim().rsplit('/').next().unwrap_or("")
}

/// Top-level directory of the repository containing `cwd`, if any.
pub fn repo_root<P: AsRef<Path>>(cwd: P) -> Option<PathBuf> {
    run_git(cwd, &["rev-parse", "--show-toplevel"])
        .ok()
        .filter(|output| !output.stdout.is_empty())
        .map(|output| PathBuf::from(output.stdout))
}
