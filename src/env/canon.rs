//! env::canon
//!
//! Canonical URLs.
//!
//! A canonical spec (CANSPEC) is a template rewriting the components of a
//! URL into the form the user wants remotes to have:
//!
//! | token | replaced by |
//! |-------|-------------|
//! | `^`   | the first component (the host) |
//! | `$`   | the remaining components joined with `/` |
//! | `%`   | all components joined with `/` |
//!
//! The default spec `git@^:$.git` turns any form of a GitHub URL into its
//! ssh form.
//!
//! A canonical file (CANFILE) holds one rule per line, either `CANSPEC` or
//! `PATTERN CANSPEC`. Blank lines and lines starting with `#` or `//` are
//! ignored. The first rule whose pattern matches the URL's components wins;
//! a rule without pattern matches everything.

use std::fs;
use std::path::Path;

use thiserror::Error;

use super::filter::{FilterError, Pattern};
use super::url::Url;

/// The spec used when no canonical file exists.
pub const DEFAULT_CANSPEC: &str = "git@^:$.git";

/// Errors from reading a canonical file.
#[derive(Debug, Error)]
pub enum CanonError {
    /// The file exists but cannot be read.
    #[error("unable to read canonical file '{path}': {source}")]
    Read {
        /// File path
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// A line has more than two fields.
    #[error("line {line}: expected 'CANSPEC' or 'PATTERN CANSPEC', got '{content}'")]
    InvalidLine {
        /// One-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// A pattern does not compile.
    #[error("line {line}: {source}")]
    InvalidPattern {
        /// One-based line number
        line: usize,
        /// Compiler diagnostic
        source: FilterError,
    },
}

/// A canonical spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanSpec(String);

impl CanSpec {
    /// Wrap `spec`.
    pub fn new(spec: impl Into<String>) -> Self {
        Self(spec.into())
    }

    /// The template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Rewrite `url`.
    ///
    /// An empty spec, or a URL without components, leaves the URL as is.
    pub fn apply(&self, url: &Url) -> String {
        let components = url.components();
        if self.0.is_empty() || components.is_empty() {
            return url.to_string();
        }

        let mut out = String::new();
        for c in self.0.chars() {
            match c {
                '^' => out.push_str(&components[0]),
                '$' => out.push_str(&components[1..].join("/")),
                '%' => out.push_str(&components.join("/")),
                c => out.push(c),
            }
        }
        out
    }
}

impl Default for CanSpec {
    fn default() -> Self {
        Self::new(DEFAULT_CANSPEC)
    }
}

/// One rule of a canonical file.
#[derive(Debug, Clone)]
pub struct CanLine {
    /// Pattern selecting URLs; `None` matches all.
    pub pattern: Option<Pattern>,
    /// Spec applied to matching URLs.
    pub spec: CanSpec,
}

impl CanLine {
    fn matches(&self, components: &[String]) -> bool {
        self.pattern.as_ref().map_or(true, |p| p.matches(components))
    }
}

/// An ordered list of canonical rules.
#[derive(Debug, Clone)]
pub struct CanFile {
    lines: Vec<CanLine>,
}

impl Default for CanFile {
    fn default() -> Self {
        Self {
            lines: vec![CanLine {
                pattern: None,
                spec: CanSpec::default(),
            }],
        }
    }
}

impl CanFile {
    /// Parse the text of a canonical file.
    pub fn parse(text: &str) -> Result<Self, CanonError> {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') || line.starts_with("//") {
                continue;
            }
            let fields: Vec<&str> = line.split_whitespace().collect();
            let rule = match fields.as_slice() {
                [spec] => CanLine {
                    pattern: None,
                    spec: CanSpec::new(*spec),
                },
                [pattern, spec] => CanLine {
                    pattern: Some(Pattern::new(pattern).map_err(|source| {
                        CanonError::InvalidPattern {
                            line: index + 1,
                            source,
                        }
                    })?),
                    spec: CanSpec::new(*spec),
                },
                _ => {
                    return Err(CanonError::InvalidLine {
                        line: index + 1,
                        content: line.to_string(),
                    })
                }
            };
            lines.push(rule);
        }
        Ok(Self { lines })
    }

    /// Load `path`, falling back to the default rules when it does not exist.
    pub fn load(path: &Path) -> Result<Self, CanonError> {
        match fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(CanonError::Read {
                path: path.display().to_string(),
                source,
            }),
        }
    }

    /// The rules, in order.
    pub fn lines(&self) -> &[CanLine] {
        &self.lines
    }

    /// Canonical form of `url`; unchanged when no rule matches.
    pub fn canonical(&self, url: &Url) -> String {
        let components = url.components();
        self.lines
            .iter()
            .find(|line| line.matches(&components))
            .map_or_else(|| url.to_string(), |line| line.spec.apply(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(input: &str) -> Url {
        input.parse().unwrap()
    }

    mod canspec {
        use super::*;

        #[test]
        fn default_spec_produces_ssh() {
            let spec = CanSpec::default();
            assert_eq!(
                spec.apply(&url("https://github.com/hello/world.git")),
                "git@github.com:hello/world.git"
            );
        }

        #[test]
        fn all_tokens() {
            let spec = CanSpec::new("https://^/$ (%)");
            assert_eq!(
                spec.apply(&url("git@example.com:a/b.git")),
                "https://example.com/a/b (example.com/a/b)"
            );
        }

        #[test]
        fn empty_spec_keeps_url() {
            assert_eq!(
                CanSpec::new("").apply(&url("git@example.com:a/b.git")),
                "git@example.com:a/b.git"
            );
        }
    }

    mod canfile {
        use super::*;

        #[test]
        fn first_matching_rule_wins() {
            let file = CanFile::parse(
                "# comment\n\
                 // another comment\n\
                 \n\
                 gitlab.com https://^/$.git\n\
                 git@^:$.git\n",
            )
            .unwrap();
            assert_eq!(file.lines().len(), 2);
            assert_eq!(
                file.canonical(&url("git@gitlab.com:a/b.git")),
                "https://gitlab.com/a/b.git"
            );
            assert_eq!(
                file.canonical(&url("https://github.com/a/b")),
                "git@github.com:a/b.git"
            );
        }

        #[test]
        fn no_match_keeps_url() {
            let file = CanFile::parse("gitlab.com https://^/$.git").unwrap();
            assert_eq!(
                file.canonical(&url("https://github.com/a/b")),
                "https://github.com/a/b"
            );
        }

        #[test]
        fn too_many_fields() {
            match CanFile::parse("ok\na b c").unwrap_err() {
                CanonError::InvalidLine { line, .. } => assert_eq!(line, 2),
                other => panic!("unexpected error: {other:?}"),
            }
        }

        #[test]
        fn missing_file_uses_default() {
            let dir = tempfile::TempDir::new().unwrap();
            let file = CanFile::load(&dir.path().join("absent")).unwrap();
            assert_eq!(file.lines().len(), 1);
            assert_eq!(file.lines()[0].spec, CanSpec::default());
        }

        #[test]
        fn existing_file_is_parsed() {
            let dir = tempfile::TempDir::new().unwrap();
            let path = dir.path().join("canfile");
            std::fs::write(&path, "https://^/$\n").unwrap();
            let file = CanFile::load(&path).unwrap();
            assert_eq!(file.canonical(&url("git@h:a/b")), "https://h/a/b");
        }
    }
}
