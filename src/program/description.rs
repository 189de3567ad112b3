//! program::description
//!
//! Static metadata of a command.

use super::meta::Positional;

/// Name, help text, positional bounds and requirement of a command.
///
/// The name is the registry key of the command and must be unique within a
/// [`Program`](super::Program).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description<R> {
    /// Name used to invoke the command.
    pub command: String,
    /// Human readable description.
    pub description: String,
    /// Positional argument bounds.
    pub positional: Positional,
    /// Policy about global flags.
    pub requirements: R,
}

impl<R> Description<R> {
    /// A description taking no positional arguments.
    pub fn new(command: impl Into<String>, description: impl Into<String>, requirements: R) -> Self {
        Self {
            command: command.into(),
            description: description.into(),
            positional: Positional::none(),
            requirements,
        }
    }

    /// Set the positional bounds.
    pub fn positional(mut self, positional: Positional) -> Self {
        self.positional = positional;
        self
    }
}
