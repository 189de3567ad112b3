//! env::filter
//!
//! Selecting repositories from the global filter flags.
//!
//! # Matching
//!
//! A repository is described by two component lists: its path relative to
//! the root and the components of its default remote URL. A [`Pattern`]
//! matches a repository when it matches either list:
//!
//! - a pattern containing glob syntax (`*?[{`) is matched by `globset`
//!   against the list joined with `/`, ignoring case
//! - any other pattern is split at `/` and must occur as a contiguous run of
//!   components, ignoring case
//!
//! When no repository matches exactly and fuzzy matching is enabled, plain
//! patterns are retried as in-order character subsequences, so `ggman` finds
//! `github.com/hello/gg-manager`.
//!
//! # Combination
//!
//! Location filters (`--for`, `--here`, `--path`) are alternatives: a
//! repository is selected when any of them matches. Status filters
//! (`--dirty`, `--synced`, ...) are all applied on top.

use std::path::{Path, PathBuf};

use globset::{GlobBuilder, GlobMatcher};
use thiserror::Error;
use tracing::{debug, warn};

use super::flags::GgmanFlags;
use super::url::Url;
use crate::git::Git;

/// Errors from building a filter.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    /// A glob pattern does not compile.
    #[error("invalid pattern '{pattern}': {message}")]
    InvalidPattern {
        /// The pattern as given
        pattern: String,
        /// Compiler diagnostic
        message: String,
    },
}

/// A repository pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    kind: PatternKind,
}

#[derive(Debug, Clone)]
enum PatternKind {
    Glob(GlobMatcher),
    Plain(Vec<String>),
}

impl Pattern {
    /// Compile `source`.
    pub fn new(source: &str) -> Result<Self, FilterError> {
        let kind = if source.contains(['*', '?', '[', '{']) {
            let glob = GlobBuilder::new(source)
                .case_insensitive(true)
                .literal_separator(false)
                .build()
                .map_err(|e| FilterError::InvalidPattern {
                    pattern: source.to_string(),
                    message: e.kind().to_string(),
                })?;
            PatternKind::Glob(glob.compile_matcher())
        } else {
            PatternKind::Plain(split(source))
        };
        Ok(Self {
            source: source.to_string(),
            kind,
        })
    }

    /// The pattern as given.
    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Whether the pattern uses glob syntax.
    pub fn is_glob(&self) -> bool {
        matches!(self.kind, PatternKind::Glob(_))
    }

    /// Exact match against `components`.
    pub fn matches(&self, components: &[String]) -> bool {
        match &self.kind {
            PatternKind::Glob(glob) => glob.is_match(components.join("/")),
            PatternKind::Plain(parts) => {
                if parts.is_empty() {
                    return true;
                }
                let lower: Vec<String> = components.iter().map(|c| c.to_lowercase()).collect();
                lower.windows(parts.len()).any(|window| window == parts.as_slice())
            }
        }
    }

    /// Fuzzy match against `components`.
    ///
    /// Glob patterns never match fuzzily beyond their exact match.
    pub fn matches_fuzzy(&self, components: &[String]) -> bool {
        match &self.kind {
            PatternKind::Glob(_) => self.matches(components),
            PatternKind::Plain(parts) => {
                let haystack = components.join("/").to_lowercase();
                let mut chars = haystack.chars();
                parts
                    .iter()
                    .flat_map(|part| part.chars())
                    .all(|needle| chars.any(|c| c == needle))
            }
        }
    }
}

fn split(source: &str) -> Vec<String> {
    source
        .split('/')
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// Required repository states; `None` means "either".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatusFilter {
    /// `--dirty` / `--clean`
    pub dirty: Option<bool>,
    /// `--synced` / `--unsynced`
    pub synced: Option<bool>,
    /// `--tarnished` / `--pristine`
    pub tarnished: Option<bool>,
}

impl StatusFilter {
    /// Whether any state is required.
    pub fn is_empty(&self) -> bool {
        self.dirty.is_none() && self.synced.is_none() && self.tarnished.is_none()
    }

    /// Whether the repository at `path` is in every required state.
    ///
    /// Repositories whose state cannot be read never match.
    pub fn matches(&self, path: &Path) -> bool {
        if self.is_empty() {
            return true;
        }
        let status = Git::open_exact(path).and_then(|git| Ok((git.is_dirty()?, git.is_synced()?)));
        let (dirty, synced) = match status {
            Ok(status) => status,
            Err(err) => {
                warn!(repo = %path.display(), error = %err, "unable to read repository status");
                return false;
            }
        };
        let tarnished = dirty || !synced;

        self.dirty.map_or(true, |want| want == dirty)
            && self.synced.map_or(true, |want| want == synced)
            && self.tarnished.map_or(true, |want| want == tarnished)
    }
}

/// A repository under consideration.
#[derive(Debug, Clone)]
struct Candidate {
    path: PathBuf,
    local: Vec<String>,
    remote: Vec<String>,
}

impl Candidate {
    fn new(root: &Path, path: PathBuf, with_remote: bool) -> Self {
        let local = path
            .strip_prefix(root)
            .unwrap_or(&path)
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect();
        let remote = if with_remote {
            remote_components(&path)
        } else {
            Vec::new()
        };
        Self {
            path,
            local,
            remote,
        }
    }
}

fn remote_components(path: &Path) -> Vec<String> {
    Git::open_exact(path)
        .and_then(|git| git.default_remote_url())
        .ok()
        .flatten()
        .and_then(|url| Url::parse(&url).ok())
        .map(|url| url.components())
        .unwrap_or_default()
}

/// The repository filter built from the global flags.
#[derive(Debug, Clone, Default)]
pub struct Filter {
    /// `--for` patterns
    pub patterns: Vec<Pattern>,
    /// Retry plain patterns fuzzily when nothing matches exactly.
    pub fuzzy: bool,
    /// Directory whose repository `--here` selects.
    pub here: Option<PathBuf>,
    /// Subtrees selected by `--path`.
    pub paths: Vec<PathBuf>,
    /// Required states.
    pub status: StatusFilter,
}

impl Filter {
    /// Build the filter for `flags`, resolving relative paths against `workdir`.
    pub fn from_flags(flags: &GgmanFlags, workdir: &Path) -> Result<Self, FilterError> {
        let patterns = flags
            .filters
            .iter()
            .filter(|p| !p.is_empty())
            .map(|p| Pattern::new(p))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            patterns,
            fuzzy: !flags.no_fuzzy_filter,
            here: flags.here.then(|| workdir.to_path_buf()),
            paths: flags
                .paths
                .iter()
                .map(|p| absolute(&workdir.join(p)))
                .collect(),
            status: StatusFilter {
                dirty: exclusive(flags.dirty, flags.clean),
                synced: exclusive(flags.synced, flags.unsynced),
                tarnished: exclusive(flags.tarnished, flags.pristine),
            },
        })
    }

    /// Whether no location filter is set.
    pub fn is_unlocated(&self) -> bool {
        self.patterns.is_empty() && self.here.is_none() && self.paths.is_empty()
    }

    /// Whether the filter selects every repository.
    pub fn is_empty(&self) -> bool {
        self.is_unlocated() && self.status.is_empty()
    }

    /// Keep the repositories of `repos` (found below `root`) that match.
    ///
    /// Order is preserved.
    pub fn select(&self, root: &Path, repos: Vec<PathBuf>) -> Vec<PathBuf> {
        if self.is_empty() {
            return repos;
        }

        let with_remote = !self.patterns.is_empty();
        let candidates: Vec<Candidate> = repos
            .into_iter()
            .map(|path| Candidate::new(root, path, with_remote))
            .collect();

        let mut located: Vec<&Candidate> = if self.is_unlocated() {
            candidates.iter().collect()
        } else {
            candidates.iter().filter(|c| self.locates(c, false)).collect()
        };
        if located.is_empty() && self.fuzzy && !self.patterns.is_empty() {
            debug!("no exact match, retrying fuzzily");
            located = candidates.iter().filter(|c| self.locates(c, true)).collect();
        }

        located
            .into_iter()
            .filter(|c| self.status.matches(&c.path))
            .map(|c| c.path.clone())
            .collect()
    }

    fn locates(&self, candidate: &Candidate, fuzzy: bool) -> bool {
        if let Some(here) = &self.here {
            if here.starts_with(&candidate.path) {
                return true;
            }
        }
        if self
            .paths
            .iter()
            .any(|p| candidate.path.starts_with(p) || p.starts_with(&candidate.path))
        {
            return true;
        }
        self.patterns.iter().any(|pattern| {
            let hit = |components: &[String]| {
                if fuzzy {
                    pattern.matches_fuzzy(components)
                } else {
                    pattern.matches(components)
                }
            };
            hit(&candidate.local) || (!candidate.remote.is_empty() && hit(&candidate.remote))
        })
    }
}

fn exclusive(yes: bool, no: bool) -> Option<bool> {
    match (yes, no) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// `path` with symlinks resolved when it exists.
pub fn absolute(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
