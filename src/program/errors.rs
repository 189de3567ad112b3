//! program::errors
//!
//! Error taxonomy of the dispatch core and the exit codes it maps to.
//!
//! # Exit Codes
//!
//! Exit codes are a stable contract with scripts calling the binary:
//!
//! | code | meaning |
//! |------|---------|
//! | 0    | success |
//! | 1    | generic failure reported by a command |
//! | 2    | unknown command |
//! | 3    | malformed global arguments |
//! | 4    | malformed command arguments |
//! | 5    | invalid or missing environment |
//! | 6    | invalid target (repository, url) |
//! | 255  | internal fault |
//!
//! Only the top-level driver turns a [`ProgramError`] into stderr text and
//! an exit code. Everything below it returns errors.

use std::fmt;

use thiserror::Error;

use super::meta::Arity;

/// Process exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ExitCode {
    /// Command completed.
    Success = 0,
    /// A command reported a failure.
    General = 1,
    /// The command name did not resolve.
    UnknownCommand = 2,
    /// Global arguments could not be parsed.
    InvalidGlobalArguments = 3,
    /// Command arguments could not be parsed or were rejected.
    InvalidCommandArguments = 4,
    /// The environment could not be set up.
    InvalidEnvironment = 5,
    /// The object the command operates on is invalid.
    InvalidTarget = 6,
    /// Unrecoverable internal fault.
    Internal = 255,
}

impl ExitCode {
    /// Numeric value of the code.
    pub fn code(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for ExitCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code.code())
    }
}

/// Errors produced while parsing, dispatching or running a command.
#[derive(Debug, Error)]
pub enum ProgramError {
    /// No command and no universal flag was given.
    #[error("need at least one argument; use '{program} --help' to see usage")]
    NeedAtLeastOneArgument {
        /// Executable name.
        program: String,
    },

    /// A flag before the command name is not known.
    #[error("unknown flag '{flag}'; global flags must be one of the flags listed in '--help'")]
    UnknownGlobalFlag {
        /// The offending flag as typed by the user.
        flag: String,
    },

    /// Global arguments were malformed in some other way.
    #[error("error parsing global flags: {message}")]
    GlobalFlagParse {
        /// What went wrong.
        message: String,
    },

    /// A keyword rejected the argument vector.
    #[error("'{keyword}': {message}")]
    Keyword {
        /// Name of the keyword.
        keyword: String,
        /// What went wrong.
        message: String,
    },

    /// The command name matches neither an alias nor a command.
    #[error("unknown command '{command}'; must be one of {}", quoted(.known))]
    UnknownCommand {
        /// The name as typed by the user.
        command: String,
        /// Every registered command name, sorted.
        known: Vec<String>,
    },

    /// The command does not accept a global flag the user supplied.
    #[error("'{command}' does not support the '{flag}' flag")]
    DisallowedGlobalFlag {
        /// Command being invoked.
        command: String,
        /// The rejected flag, e.g. `--for`.
        flag: String,
    },

    /// The command's own flag set rejected the input.
    #[error("error parsing flags for '{command}': {message}")]
    CommandFlagParse {
        /// Command being invoked.
        command: String,
        /// Parser diagnostic.
        message: String,
    },

    /// The positional count is outside the declared bounds.
    #[error("wrong number of arguments: '{command}' {arity}")]
    WrongArgumentCount {
        /// Command being invoked.
        command: String,
        /// The bounds that were violated.
        arity: Arity,
    },

    /// The command's post-parse check failed.
    #[error("{message}")]
    PostParse {
        /// Command being invoked.
        command: String,
        /// Diagnostic produced by the command.
        message: String,
        /// Exit code requested by the command.
        code: ExitCode,
    },

    /// The runtime environment could not be constructed.
    #[error("{message}")]
    Environment {
        /// Diagnostic from the environment constructor.
        message: String,
    },

    /// The object the command operates on is invalid.
    #[error("{message}")]
    InvalidTarget {
        /// What is wrong with the target.
        message: String,
    },

    /// A command failed while running.
    #[error("{message}")]
    Command {
        /// Diagnostic produced by the command.
        message: String,
        /// Exit code requested by the command.
        code: ExitCode,
    },

    /// Writing to an output stream failed.
    #[error("unable to write output: {0}")]
    Io(#[from] std::io::Error),

    /// A defect in the host application.
    #[error("internal error: {message}")]
    Internal {
        /// Description of the defect.
        message: String,
    },
}

impl ProgramError {
    /// A generic command failure (exit code 1).
    pub fn command(message: impl Into<String>) -> Self {
        ProgramError::Command {
            message: message.into(),
            code: ExitCode::General,
        }
    }

    /// A command failure with an explicit exit code.
    pub fn command_with_code(message: impl Into<String>, code: ExitCode) -> Self {
        ProgramError::Command {
            message: message.into(),
            code,
        }
    }

    /// An invalid target error (exit code 6).
    pub fn invalid_target(message: impl Into<String>) -> Self {
        ProgramError::InvalidTarget {
            message: message.into(),
        }
    }

    /// The exit code this error maps to.
    pub fn code(&self) -> ExitCode {
        match self {
            ProgramError::NeedAtLeastOneArgument { .. }
            | ProgramError::UnknownGlobalFlag { .. }
            | ProgramError::GlobalFlagParse { .. }
            | ProgramError::Keyword { .. } => ExitCode::InvalidGlobalArguments,
            ProgramError::UnknownCommand { .. } => ExitCode::UnknownCommand,
            ProgramError::DisallowedGlobalFlag { .. }
            | ProgramError::CommandFlagParse { .. }
            | ProgramError::WrongArgumentCount { .. } => ExitCode::InvalidCommandArguments,
            ProgramError::PostParse { code, .. } | ProgramError::Command { code, .. } => *code,
            ProgramError::Environment { .. } => ExitCode::InvalidEnvironment,
            ProgramError::InvalidTarget { .. } => ExitCode::InvalidTarget,
            ProgramError::Io(_) => ExitCode::General,
            ProgramError::Internal { .. } => ExitCode::Internal,
        }
    }
}

/// Errors raised while populating a [`Program`](super::Program).
///
/// These indicate a defect in the host application, never bad user input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistrationError {
    /// Two commands share a name.
    #[error("command '{name}' is already registered")]
    DuplicateCommand {
        /// The duplicated name.
        name: String,
    },

    /// Two aliases share a name.
    #[error("alias '{name}' is already registered")]
    DuplicateAlias {
        /// The duplicated name.
        name: String,
    },

    /// Two keywords share a name.
    #[error("keyword '{name}' is already registered")]
    DuplicateKeyword {
        /// The duplicated name.
        name: String,
    },

    /// A flag has neither a short nor a long name.
    #[error("flag '{id}' of '{owner}' has no short or long name")]
    UnnamedFlag {
        /// Field identifier of the flag.
        id: String,
        /// Command name, or the program name for global flags.
        owner: String,
    },

    /// Two flags of one flag set share an identifier or a name.
    #[error("flag '{name}' of '{owner}' is declared twice")]
    DuplicateFlag {
        /// The clashing identifier or name.
        name: String,
        /// Command name, or the program name for global flags.
        owner: String,
    },

    /// Positional bounds are inverted.
    #[error("'{command}' declares more required than allowed arguments")]
    InvalidPositional {
        /// Command name.
        command: String,
    },

    /// A command refused to be registered.
    #[error("'{command}' cannot be registered: {message}")]
    Rejected {
        /// Command name.
        command: String,
        /// Reason given by the command.
        message: String,
    },
}

impl From<RegistrationError> for ProgramError {
    fn from(err: RegistrationError) -> Self {
        ProgramError::Internal {
            message: err.to_string(),
        }
    }
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("'{}'", name))
        .collect::<Vec<_>>()
        .join(", ")
}
