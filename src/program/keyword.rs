//! program::keyword
//!
//! Pre-dispatch rewriters of the argument vector.
//!
//! A keyword applies when the command name equals the keyword's name. It
//! runs after the global phase and before alias and command resolution, so
//! universal flags given before it still win.

use std::fmt;

use super::args::{Arguments, HELP};
use super::errors::ProgramError;

/// Rewrites (or rejects) parsed global arguments.
pub type KeywordAction<F> = Box<dyn Fn(&mut Arguments<F>) -> Result<(), ProgramError>>;

/// A named argument rewriter.
pub struct Keyword<F> {
    /// Name that triggers the keyword.
    pub name: String,
    /// Human readable description.
    pub description: String,
    action: KeywordAction<F>,
}

impl<F> Keyword<F> {
    /// A keyword running `action`.
    pub fn new<A>(name: impl Into<String>, description: impl Into<String>, action: A) -> Self
    where
        A: Fn(&mut Arguments<F>) -> Result<(), ProgramError> + 'static,
    {
        Self {
            name: name.into(),
            description: description.into(),
            action: Box::new(action),
        }
    }

    /// `help` shows the program page; `help COMMAND` the command page.
    pub fn help() -> Self {
        Self::new(HELP, "Print help for the program or a command", |args| {
            if args.args.is_empty() {
                args.universals.help = true;
            } else {
                args.command = args.args.remove(0);
                args.args = vec!["--help".to_string()];
            }
            Ok(())
        })
    }

    /// `version` shows the version page.
    pub fn version() -> Self {
        Self::new("version", "Print version information", |args| {
            args.universals.version = true;
            Ok(())
        })
    }

    /// Apply the keyword to `args`.
    pub fn apply(&self, args: &mut Arguments<F>) -> Result<(), ProgramError> {
        (self.action)(args)
    }
}

impl<F> fmt::Debug for Keyword<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keyword")
            .field("name", &self.name)
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::program::testing::{tokens, TestFlags};

    fn arguments(command: &str, args: &[&str]) -> Arguments<TestFlags> {
        Arguments::new(command, tokens(args))
    }

    #[test]
    fn help_alone_requests_program_help() {
        let mut args = arguments("help", &[]);
        Keyword::help().apply(&mut args).unwrap();
        assert!(args.universals.help);
    }

    #[test]
    fn help_with_command_requests_command_help() {
        let mut args = arguments("help", &["ls", "extra"]);
        Keyword::help().apply(&mut args).unwrap();
        assert!(!args.universals.help);
        assert_eq!(args.command, "ls");
        assert_eq!(args.args, tokens(&["--help"]));
    }

    #[test]
    fn version_sets_flag() {
        let mut args = arguments("version", &[]);
        Keyword::version().apply(&mut args).unwrap();
        assert!(args.universals.version);
    }

    #[test]
    fn custom_keyword_may_reject() {
        let keyword = Keyword::<TestFlags>::new("nope", "", |args| {
            Err(ProgramError::Keyword {
                keyword: args.command.clone(),
                message: "always fails".into(),
            })
        });
        let err = keyword.apply(&mut arguments("nope", &[])).unwrap_err();
        assert!(err.to_string().contains("always fails"));
    }
}
