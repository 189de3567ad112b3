//! git::interface
//!
//! Read access to a single repository through git2.
//!
//! # Architecture
//!
//! [`Git`] wraps one opened repository. Everything ggman needs to know about
//! a local clone (remotes, working tree status, divergence from upstream)
//! flows through it. Operations that talk to the network live in
//! [`super::cli`] instead.
//!
//! # Error Handling
//!
//! git2 failures are normalized into [`GitError`]:
//! - [`GitError::NotARepo`]: no repository at or above the path
//! - [`GitError::BareRepo`]: the repository has no working directory
//! - [`GitError::RemoteNotFound`]: the named remote does not exist
//!
//! # Example
//!
//! ```no_run
//! use ggman::git::Git;
//! use std::path::Path;
//!
//! let git = Git::open(Path::new("."))?;
//! if let Some(url) = git.remote_url("origin")? {
//!     println!("origin is {}", url);
//! }
//! # Ok::<(), ggman::git::GitError>(())
//! ```

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors from Git operations.
#[derive(Debug, Error)]
pub enum GitError {
    /// Not inside a Git repository.
    #[error("not a git repository: {path}")]
    NotARepo {
        /// The path that was searched
        path: PathBuf,
    },

    /// Repository is bare (no working directory).
    #[error("bare repository not supported")]
    BareRepo,

    /// The named remote does not exist.
    #[error("no remote named '{name}'")]
    RemoteNotFound {
        /// Remote name
        name: String,
    },

    /// The git executable could not be started.
    #[error("unable to run '{command}': {source}")]
    Spawn {
        /// The command line that failed to start
        command: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// The git executable exited unsuccessfully.
    #[error("'{command}' failed with exit code {}", .code.map_or_else(|| "unknown".to_string(), |c| c.to_string()))]
    Failed {
        /// The command line that failed
        command: String,
        /// Exit code, when the process exited normally
        code: Option<i32>,
    },

    /// Internal git2 error.
    #[error("git error: {message}")]
    Internal {
        /// The error message
        message: String,
    },
}

impl GitError {
    fn from_git2(err: git2::Error, context: &str) -> Self {
        GitError::Internal {
            message: format!("{}: {}", context, err.message()),
        }
    }
}

impl From<git2::Error> for GitError {
    fn from(err: git2::Error) -> Self {
        GitError::Internal {
            message: err.message().to_string(),
        }
    }
}

/// Summary of working tree status.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WorktreeStatus {
    /// Number of staged changes
    pub staged: usize,
    /// Number of unstaged changes to tracked files
    pub unstaged: usize,
    /// Number of untracked files
    pub untracked: usize,
    /// Whether there are unresolved conflicts
    pub has_conflicts: bool,
}

impl WorktreeStatus {
    /// No changes of any kind, untracked files included.
    pub fn is_clean(&self) -> bool {
        self.staged == 0 && self.unstaged == 0 && self.untracked == 0 && !self.has_conflicts
    }
}

/// Divergence of the checked out branch from its upstream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncStatus {
    /// Local commits not on the upstream
    pub ahead: usize,
    /// Upstream commits not in the local branch
    pub behind: usize,
    /// Whether HEAD is a branch with an upstream
    pub has_upstream: bool,
}

impl SyncStatus {
    /// Neither ahead nor behind.
    ///
    /// A detached HEAD or a branch without upstream counts as synced.
    pub fn is_synced(&self) -> bool {
        self.ahead == 0 && self.behind == 0
    }
}

/// An opened repository.
pub struct Git {
    repo: git2::Repository,
}

impl std::fmt::Debug for Git {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Git")
            .field("path", &self.repo.path())
            .finish()
    }
}

impl Git {
    /// Open the repository containing `path`.
    ///
    /// # Errors
    ///
    /// - [`GitError::NotARepo`] if no repository is found
    /// - [`GitError::BareRepo`] if the repository has no working directory
    pub fn open(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::discover(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// Open the repository whose working directory is exactly `path`.
    pub fn open_exact(path: &Path) -> Result<Self, GitError> {
        let repo = git2::Repository::open(path).map_err(|_| GitError::NotARepo {
            path: path.to_path_buf(),
        })?;

        if repo.is_bare() {
            return Err(GitError::BareRepo);
        }

        Ok(Self { repo })
    }

    /// The working directory.
    pub fn workdir(&self) -> Result<&Path, GitError> {
        self.repo.workdir().ok_or(GitError::BareRepo)
    }

    // =========================================================================
    // Remotes
    // =========================================================================

    /// Names of all remotes, in git's order.
    pub fn remotes(&self) -> Result<Vec<String>, GitError> {
        let remotes = self
            .repo
            .remotes()
            .map_err(|e| GitError::from_git2(e, "listing remotes"))?;
        Ok(remotes.iter().flatten().map(String::from).collect())
    }

    /// Get the URL for a remote.
    ///
    /// Returns `None` if the remote doesn't exist.
    pub fn remote_url(&self, name: &str) -> Result<Option<String>, GitError> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(String::from)),
            Err(e) if e.code() == git2::ErrorCode::NotFound => Ok(None),
            Err(e) => Err(GitError::from_git2(e, name)),
        }
    }

    /// Get the default remote name, preferring "origin".
    ///
    /// Returns `None` if no remotes exist.
    pub fn default_remote(&self) -> Result<Option<String>, GitError> {
        let remotes = self.remotes()?;
        if remotes.iter().any(|name| name == "origin") {
            return Ok(Some("origin".to_string()));
        }
        Ok(remotes.into_iter().next())
    }

    /// URL of the default remote.
    pub fn default_remote_url(&self) -> Result<Option<String>, GitError> {
        match self.default_remote()? {
            Some(name) => self.remote_url(&name),
            None => Ok(None),
        }
    }

    /// Point the remote `name` at `url`.
    pub fn set_remote_url(&self, name: &str, url: &str) -> Result<(), GitError> {
        if self.remote_url(name)?.is_none() {
            return Err(GitError::RemoteNotFound {
                name: name.to_string(),
            });
        }
        self.repo
            .remote_set_url(name, url)
            .map_err(|e| GitError::from_git2(e, name))
    }

    // =========================================================================
    // Status
    // =========================================================================

    /// Get working tree status summary, untracked files included.
    pub fn worktree_status(&self) -> Result<WorktreeStatus, GitError> {
        let mut opts = git2::StatusOptions::new();
        opts.include_untracked(true).include_ignored(false);

        let statuses = self
            .repo
            .statuses(Some(&mut opts))
            .map_err(|e| GitError::from_git2(e, "reading status"))?;

        let mut result = WorktreeStatus::default();

        for entry in statuses.iter() {
            let status = entry.status();

            if status.is_conflicted() {
                result.has_conflicts = true;
            }

            if status.is_index_new()
                || status.is_index_modified()
                || status.is_index_deleted()
                || status.is_index_renamed()
                || status.is_index_typechange()
            {
                result.staged += 1;
            }

            if status.is_wt_modified()
                || status.is_wt_deleted()
                || status.is_wt_renamed()
                || status.is_wt_typechange()
            {
                result.unstaged += 1;
            }

            if status.is_wt_new() {
                result.untracked += 1;
            }
        }

        Ok(result)
    }

    /// Whether the working tree has any changes.
    pub fn is_dirty(&self) -> Result<bool, GitError> {
        Ok(!self.worktree_status()?.is_clean())
    }

    /// Divergence of HEAD from its upstream branch.
    pub fn sync_status(&self) -> Result<SyncStatus, GitError> {
        let head = match self.repo.head() {
            Ok(head) => head,
            // unborn branch
            Err(e) if e.code() == git2::ErrorCode::UnbornBranch => return Ok(SyncStatus::default()),
            Err(e) => return Err(GitError::from_git2(e, "HEAD")),
        };
        if !head.is_branch() {
            return Ok(SyncStatus::default());
        }
        let Some(name) = head.shorthand() else {
            return Ok(SyncStatus::default());
        };

        let branch = self
            .repo
            .find_branch(name, git2::BranchType::Local)
            .map_err(|e| GitError::from_git2(e, name))?;
        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == git2::ErrorCode::NotFound => return Ok(SyncStatus::default()),
            Err(e) => return Err(GitError::from_git2(e, name)),
        };

        let (Some(local), Some(remote)) = (branch.get().target(), upstream.get().target()) else {
            return Ok(SyncStatus::default());
        };
        let (ahead, behind) = self
            .repo
            .graph_ahead_behind(local, remote)
            .map_err(|e| GitError::from_git2(e, name))?;

        Ok(SyncStatus {
            ahead,
            behind,
            has_upstream: true,
        })
    }

    /// Whether HEAD is level with its upstream.
    pub fn is_synced(&self) -> Result<bool, GitError> {
        Ok(self.sync_status()?.is_synced())
    }
}
