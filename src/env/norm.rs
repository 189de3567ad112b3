//! env::norm
//!
//! How URL components become local directory names.

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Path normalization mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    /// Use components as they are.
    Exact,
    /// Lowercase every component.
    Fold,
    /// Reuse an existing directory differing only in case, else exact.
    #[default]
    Smart,
}

impl Norm {
    /// All modes, in documentation order.
    pub const ALL: [Norm; 3] = [Norm::Exact, Norm::Fold, Norm::Smart];

    /// Name as used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            Norm::Exact => "exact",
            Norm::Fold => "fold",
            Norm::Smart => "smart",
        }
    }

    /// `base` joined with `components` under this mode.
    pub fn join(&self, base: &Path, components: &[String]) -> PathBuf {
        let mut path = base.to_path_buf();
        for component in components {
            let name = match self {
                Norm::Exact => component.clone(),
                Norm::Fold => component.to_lowercase(),
                Norm::Smart => existing_case(&path, component).unwrap_or_else(|| component.clone()),
            };
            path.push(name);
        }
        path
    }
}

/// The name of an entry of `dir` equal to `name` ignoring case.
///
/// An exact match is preferred over a case-insensitive one.
fn existing_case(dir: &Path, name: &str) -> Option<String> {
    if dir.join(name).exists() {
        return Some(name.to_string());
    }
    let mut names: Vec<String> = fs::read_dir(dir)
        .ok()?
        .flatten()
        .filter_map(|entry| entry.file_name().into_string().ok())
        .filter(|entry| entry.eq_ignore_ascii_case(name))
        .collect();
    names.sort();
    names.into_iter().next()
}

impl fmt::Display for Norm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Norm {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Norm::ALL
            .into_iter()
            .find(|norm| norm.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                format!(
                    "invalid normalization '{}', must be one of: exact, fold, smart",
                    s
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn comps(parts: &[&str]) -> Vec<String> {
        parts.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_names() {
        assert_eq!("exact".parse::<Norm>().unwrap(), Norm::Exact);
        assert_eq!("FOLD".parse::<Norm>().unwrap(), Norm::Fold);
        assert_eq!(" smart ".parse::<Norm>().unwrap(), Norm::Smart);
        assert!("other".parse::<Norm>().is_err());
    }

    #[test]
    fn exact_and_fold() {
        let base = Path::new("/base");
        let parts = comps(&["GitHub.com", "Hello", "World"]);
        assert_eq!(
            Norm::Exact.join(base, &parts),
            PathBuf::from("/base/GitHub.com/Hello/World")
        );
        assert_eq!(
            Norm::Fold.join(base, &parts),
            PathBuf::from("/base/github.com/hello/world")
        );
    }

    #[test]
    fn smart_reuses_existing_directories() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("github.com/hello")).unwrap();

        let joined = Norm::Smart.join(dir.path(), &comps(&["GitHub.com", "HELLO", "World"]));
        assert_eq!(joined, dir.path().join("github.com/hello/World"));
    }
}
