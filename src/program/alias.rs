//! program::alias
//!
//! Named shortcuts for a command plus fixed leading arguments.
//!
//! # Invariants
//!
//! - Expansion happens at most once; the target is looked up among commands
//!   only, so an alias naming another alias is never expanded further
//! - An alias shadows a command of the same name

use super::args::Arguments;

/// A shortcut expanding to `command args...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alias {
    /// Name the user types.
    pub name: String,
    /// Command the alias runs.
    pub command: String,
    /// Arguments inserted before the user's arguments.
    pub args: Vec<String>,
    /// Human readable description.
    pub description: String,
}

impl Alias {
    /// An alias for `command` without extra arguments.
    pub fn new(name: impl Into<String>, command: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            command: command.into(),
            args: Vec::new(),
            description: String::new(),
        }
    }

    /// Set the fixed leading arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// The invocation the alias stands for, e.g. `clone --shallow`.
    pub fn expansion(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Rewrite `arguments` to invoke the alias target.
    pub fn expand<F>(&self, arguments: &mut Arguments<F>) {
        let mut args = self.args.clone();
        args.append(&mut arguments.args);
        arguments.command = self.command.clone();
        arguments.args = args;
    }
}
