//! Project context resolution for nsprep.
//!
//! Finds the project root from any working directory and resolves the
//! template and output paths against it. Outside a git repository the
//! working directory itself is the root, so rendering still works with the
//! default binding.

use crate::config::Config;
use crate::error::{PrepError, Result};
use crate::git;
use std::env;
use std::path::{Path, PathBuf};

/// Resolved paths for a render run. All paths are absolute.
#[derive(Debug, Clone)]
pub struct ProjectContext {
    /// Directory nsprep was started in (or `-C`).
    pub cwd: PathBuf,

    /// Repository top level, or `cwd` outside a repository.
    pub root: PathBuf,

    /// Whether `root` is a git repository.
    pub in_repository: bool,
}

impl ProjectContext {
    /// Resolve the context from `dir`, or the process working directory.
    pub fn resolve(dir: Option<&Path>) -> Result<Self> {
        let current = env::current_dir().map_err(|e| {
            PrepError::UserError(format!("failed to get current working directory: {}", e))
        })?;

        let cwd = match dir {
            Some(dir) => current.join(dir),
            None => current,
        };

        if !cwd.is_dir() {
            return Err(PrepError::UserError(format!(
                "'{}' is not a directory",
                cwd.display()
            )));
        }

        Ok(Self::resolve_from(cwd))
    }

    /// Resolve the context from a known directory.
    pub fn resolve_from<P: AsRef<Path>>(cwd: P) -> Self {
        let cwd = cwd.as_ref().to_path_buf();

        match git::repo_root(&cwd) {
            Some(root) => Self {
                cwd,
                root,
                in_repository: true,
            },
            None => Self {
                root: cwd.clone(),
                cwd,
                in_repository: false,
            },
        }
    }

    /// Absolute path of a project-relative path. Absolute paths pass through.
    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.root.join(relative)
    }

    /// Absolute path of a path given on the command line, relative to `cwd`.
    pub fn cwd_path(&self, path: &Path) -> PathBuf {
        self.cwd.join(path)
    }

    pub fn template_path(&self, config: &Config) -> PathBuf {
        self.project_path(&config.template)
    }

    pub fn output_path(&self, config: &Config) -> PathBuf {
        self.project_path(&config.output)
    }
}

/// Absolute form of `path` with symlinks and `.`/`..` resolved.
///
/// The path does not need to exist: the longest existing ancestor is
/// canonicalized and the remaining components are appended.
pub fn normalize_path(path: &Path) -> PathBuf {
    if let Ok(full) = path.canonicalize() {
        return full;
    }
    match (path.parent(), path.file_name()) {
        (Some(parent), Some(name)) if !parent.as_os_str().is_empty() => {
            normalize_path(parent).join(name)
        }
        _ => path.to_path_buf(),
    }
}

/// Whether `a` and `b` name the same file, however they are spelled.
pub fn same_file(a: &Path, b: &Path) -> bool {
    normalize_path(a) == normalize_path(b)
}
