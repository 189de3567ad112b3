//! program::args
//!
//! The two-phase argument parser.
//!
//! # Phases
//!
//! 1. [`Arguments::parse`] reads the universal flags (`--help`, `--version`)
//!    and the host's global flags. The first non-flag token is the command
//!    name; it and everything after it are left for phase two.
//! 2. [`CommandArguments::parse`] runs once the command is resolved:
//!
//!    1. a help marker short-circuits to the command's help page
//!    2. the command's requirement validates the global flags
//!    3. the command's own flags are parsed
//!    4. the positional count is checked
//!    5. the command's post-parse hook runs
//!
//!    The order is part of the contract: a disallowed global flag is
//!    reported even when the positionals are also wrong.

use std::ffi::OsString;
use std::marker::PhantomData;

use super::command::Command;
use super::description::Description;
use super::errors::ProgramError;
use super::flagset::{FlagSet, FlagSetError, FlagValues};
use super::meta::Flag;
use super::requirement::Requirement;
use super::{GlobalFlags, Host};

/// Identifier of the universal help flag.
pub const HELP: &str = "help";

/// Identifier of the universal version flag.
pub const VERSION: &str = "version";

/// Flags understood by every program, ahead of the host's global flags.
pub fn universal_flags() -> Vec<Flag> {
    vec![
        Flag::switch(HELP)
            .short('h')
            .long("help")
            .usage("Print a help message and exit"),
        Flag::switch(VERSION)
            .short('v')
            .long("version")
            .usage("Print a version message and exit"),
    ]
}

/// Universal flags of an invocation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Universals {
    /// `--help` was given.
    pub help: bool,
    /// `--version` was given.
    pub version: bool,
}

/// Result of the global parsing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arguments<F> {
    /// Universal flags.
    pub universals: Universals,
    /// Values of the host's global flags.
    pub values: FlagValues,
    /// Name of the command to run, before alias expansion.
    pub command: String,
    /// Tokens following the command name.
    pub args: Vec<String>,
    flags: PhantomData<fn() -> F>,
}

impl<F> Default for Arguments<F> {
    fn default() -> Self {
        Self {
            universals: Universals::default(),
            values: FlagValues::default(),
            command: String::new(),
            args: Vec::new(),
            flags: PhantomData,
        }
    }
}

impl<F> Arguments<F> {
    /// Arguments invoking `command` with `args` and no flags.
    pub fn new(command: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            command: command.into(),
            args,
            ..Self::default()
        }
    }
}

impl<F: GlobalFlags> Arguments<F> {
    /// Parse the global part of `tokens` for the program `program`.
    ///
    /// # Errors
    ///
    /// - [`ProgramError::UnknownGlobalFlag`] for an undeclared flag
    /// - [`ProgramError::GlobalFlagParse`] for any other flag problem
    /// - [`ProgramError::NeedAtLeastOneArgument`] when there is no command
    ///   and neither help nor version was requested
    pub fn parse(program: &str, tokens: &[String]) -> Result<Self, ProgramError> {
        let mut flags = universal_flags();
        flags.extend(F::flags());

        let parsed = FlagSet::global(program, flags)
            .parse(tokens)
            .map_err(|err| match err {
                FlagSetError::UnknownFlag(flag) => ProgramError::UnknownGlobalFlag { flag },
                FlagSetError::Help => ProgramError::GlobalFlagParse {
                    message: "unexpected help flag".into(),
                },
                FlagSetError::Invalid(message) => ProgramError::GlobalFlagParse { message },
            })?;

        let universals = Universals {
            help: parsed.values.switch(HELP),
            version: parsed.values.switch(VERSION),
        };

        let mut rest = parsed.rest.into_iter();
        let command = rest.next();
        if command.is_none() && !universals.help && !universals.version {
            return Err(ProgramError::NeedAtLeastOneArgument {
                program: program.to_string(),
            });
        }

        Ok(Self {
            universals,
            values: parsed.values,
            command: command.unwrap_or_default(),
            args: rest.collect(),
            flags: PhantomData,
        })
    }

    /// The typed global flags.
    pub fn flags(&self) -> F {
        F::from_values(&self.values)
    }
}

/// Outcome of the command parsing phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome<F, R> {
    /// The user asked for the command's help page.
    Help(Description<R>),
    /// Arguments are valid; the command may run.
    Ready(CommandArguments<F, R>),
}

/// Fully parsed arguments of a command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArguments<F, R> {
    /// Result of the global phase.
    pub arguments: Arguments<F>,
    /// Typed global flags.
    pub flags: F,
    /// Values of the command's own flags.
    pub values: FlagValues,
    /// Positional arguments.
    pub positionals: Vec<String>,
    /// Description of the command being run.
    pub description: Description<R>,
}

/// [`CommandArguments`] of a host.
pub type HostArguments<H> = CommandArguments<<H as Host>::Flags, <H as Host>::Requirement>;

impl<F: GlobalFlags, R: Requirement<F>> CommandArguments<F, R> {
    /// Run the command phase for `command` on the result of the global phase.
    ///
    /// The command instance receives its flag values and runs its post-parse
    /// hook; it is ready to run when this returns [`ParseOutcome::Ready`].
    pub fn parse<H>(
        arguments: Arguments<F>,
        command: &mut dyn Command<H>,
    ) -> Result<ParseOutcome<F, R>, ProgramError>
    where
        H: Host<Flags = F, Requirement = R>,
    {
        let description = command.description();

        if has_help_marker(&arguments.args) {
            return Ok(ParseOutcome::Help(description));
        }

        description.requirements.validate(&arguments)?;

        let set = FlagSet::command(description.command.clone(), command.flags());
        let parsed = match set.parse(&arguments.args) {
            Ok(parsed) => parsed,
            Err(FlagSetError::Help) => return Ok(ParseOutcome::Help(description)),
            Err(FlagSetError::UnknownFlag(flag)) => {
                return Err(ProgramError::CommandFlagParse {
                    command: description.command,
                    message: format!("unknown flag '{}'", flag),
                })
            }
            Err(FlagSetError::Invalid(message)) => {
                return Err(ProgramError::CommandFlagParse {
                    command: description.command,
                    message,
                })
            }
        };
        command.apply_flags(&parsed.values)?;

        if let Err(arity) = description.positional.check(parsed.rest.len()) {
            return Err(ProgramError::WrongArgumentCount {
                command: description.command,
                arity,
            });
        }

        command.after_parse()?;

        Ok(ParseOutcome::Ready(Self {
            flags: arguments.flags(),
            arguments,
            values: parsed.values,
            positionals: parsed.rest,
            description,
        }))
    }
}

/// Decode an OS argument vector, rejecting arguments that are not UTF-8.
pub fn decode_args<I>(args: I) -> Result<Vec<String>, ProgramError>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            arg.into_string().map_err(|raw| ProgramError::GlobalFlagParse {
                message: format!("argument {:?} is not valid UTF-8", raw),
            })
        })
        .collect()
}

/// Whether `tokens` ask for help before any `--` terminator.
fn has_help_marker(tokens: &[String]) -> bool {
    tokens
        .iter()
        .take_while(|token| token.as_str() != "--")
        .any(|token| matches!(token.as_str(), "--help" | "-h" | "help"))
}
