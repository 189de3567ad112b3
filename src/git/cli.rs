//! git::cli
//!
//! Operations delegated to the `git` executable.
//!
//! Clone, fetch and pull go through the user's git so credentials helpers,
//! ssh configuration and progress output behave exactly as on the command
//! line. Standard streams are inherited.

use std::path::Path;
use std::process::Command;

use tracing::debug;

use super::GitError;

/// Runs the `git` executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GitCli {
    executable: String,
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl GitCli {
    /// Use `executable` as the git binary.
    pub fn new(executable: impl Into<String>) -> Self {
        Self {
            executable: executable.into(),
        }
    }

    /// `git clone [extra...] url dest`
    pub fn clone_repo(&self, url: &str, dest: &Path, extra: &[String]) -> Result<(), GitError> {
        let mut args = vec!["clone".to_string()];
        args.extend(extra.iter().cloned());
        args.push(url.to_string());
        args.push(dest.to_string_lossy().into_owned());
        self.run(None, &args)
    }

    /// `git fetch --all` inside `repo`.
    pub fn fetch(&self, repo: &Path) -> Result<(), GitError> {
        self.run(Some(repo), &["fetch".to_string(), "--all".to_string()])
    }

    /// `git pull` inside `repo`.
    pub fn pull(&self, repo: &Path) -> Result<(), GitError> {
        self.run(Some(repo), &["pull".to_string()])
    }

    /// Run git with `args`, optionally inside `dir`.
    pub fn run(&self, dir: Option<&Path>, args: &[String]) -> Result<(), GitError> {
        let line = std::iter::once(self.executable.as_str())
            .chain(args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ");
        debug!(command = %line, dir = ?dir, "running git");

        let mut command = Command::new(&self.executable);
        command.args(args);
        if let Some(dir) = dir {
            command.current_dir(dir);
        }

        let status = command.status().map_err(|source| GitError::Spawn {
            command: line.clone(),
            source,
        })?;

        if !status.success() {
            return Err(GitError::Failed {
                command: line,
                code: status.code(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_executable_is_spawn_error() {
        let cli = GitCli::new("ggman-definitely-not-a-binary");
        match cli.run(None, &["--version".to_string()]) {
            Err(GitError::Spawn { command, .. }) => {
                assert_eq!(command, "ggman-definitely-not-a-binary --version")
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn default_uses_git() {
        assert_eq!(GitCli::default(), GitCli::new("git"));
    }
}
