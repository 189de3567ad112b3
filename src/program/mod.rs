//! program
//!
//! A generic dispatcher for multi-command executables.
//!
//! # Architecture
//!
//! A [`Program`] owns a registry of commands, aliases and keywords for one
//! [`Host`]. The host contributes the global flags, the requirement type
//! commands declare and the runtime handed to commands when they run.
//!
//! ```text
//! argv
//!   -> Arguments::parse        universal + global flags, command name
//!   -> help / version page
//!   -> keywords                rewrite the arguments
//!   -> alias                   expand at most once
//!   -> command lookup          fresh instance from the factory
//!   -> CommandArguments::parse help marker, requirement, flags, arity, hook
//!   -> Host::runtime
//!   -> Command::run
//! ```
//!
//! [`Program::resolve`] performs every step up to and including the command
//! phase and has no side effects, so identical argument vectors always
//! resolve to identical results.
//!
//! # Invariants
//!
//! - Command names are unique; aliases and keywords are unique among their kind
//! - Every registered flag has at least one name
//! - Within one flag set, identifiers and names are unique
//! - An alias shadows a command of the same name

pub mod alias;
pub mod args;
pub mod command;
pub mod context;
pub mod description;
pub mod errors;
pub mod flagset;
pub mod keyword;
pub mod meta;
pub mod requirement;
pub mod usage;

#[cfg(test)]
pub(crate) mod testing;

use std::collections::{BTreeMap, HashSet};
use std::fmt;
use std::io::Write;

use tracing::debug;

pub use alias::Alias;
pub use args::{
    decode_args, universal_flags, Arguments, CommandArguments, HostArguments, ParseOutcome,
    Universals,
};
pub use command::{factory, Command, Factory};
pub use context::{Buffer, Context, Io};
pub use description::Description;
pub use errors::{ExitCode, ProgramError, RegistrationError};
pub use flagset::{FlagValue, FlagValues};
pub use keyword::Keyword;
pub use meta::{Arity, Flag, Positional};
pub use requirement::{partition_flags, validate_allowed_flags, Requirement};
pub use usage::Page;

/// Typed global flags of a host.
pub trait GlobalFlags: Clone + Default + fmt::Debug + PartialEq + 'static {
    /// Descriptors of the global flags, in display order.
    fn flags() -> Vec<Flag>;

    /// Build the typed flags from parsed values.
    fn from_values(values: &FlagValues) -> Self;
}

/// The application a [`Program`] dispatches for.
pub trait Host: Sized + 'static {
    /// Global flags.
    type Flags: GlobalFlags;
    /// Requirement declared by each command.
    type Requirement: Requirement<Self::Flags> + Clone + fmt::Debug + PartialEq;
    /// State handed to a running command.
    type Runtime;

    /// Build the runtime for a fully parsed invocation.
    ///
    /// Called after the command phase succeeded and before the command runs.
    fn runtime(&self, args: &HostArguments<Self>) -> Result<Self::Runtime, ProgramError>;
}

/// Identity of the executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Info {
    /// Name shown in usage lines and diagnostics.
    pub executable: String,
    /// Version string.
    pub version: String,
    /// One-line description for the main help page.
    pub description: String,
}

/// What an argument vector resolved to.
pub enum Invocation<H: Host> {
    /// Print a help page.
    Help(Page),
    /// Print version text.
    Version(String),
    /// Run a command.
    Run {
        /// The fresh command instance, flags applied.
        command: Box<dyn Command<H>>,
        /// Its parsed arguments.
        args: HostArguments<H>,
    },
}

impl<H: Host> Invocation<H> {
    /// Parsed arguments when the invocation runs a command.
    pub fn arguments(&self) -> Option<&HostArguments<H>> {
        match self {
            Invocation::Run { args, .. } => Some(args),
            _ => None,
        }
    }
}

impl<H: Host> fmt::Debug for Invocation<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Invocation::Help(page) => f.debug_tuple("Help").field(page).finish(),
            Invocation::Version(text) => f.debug_tuple("Version").field(text).finish(),
            Invocation::Run { args, .. } => f
                .debug_struct("Run")
                .field("command", &args.description.command)
                .field("args", args)
                .finish_non_exhaustive(),
        }
    }
}

/// Command registry and dispatcher.
pub struct Program<H: Host> {
    host: H,
    info: Info,
    commands: BTreeMap<String, Factory<H>>,
    aliases: BTreeMap<String, Alias>,
    keywords: Vec<Keyword<H::Flags>>,
}

impl<H: Host> Program<H> {
    /// Create an empty program.
    ///
    /// # Errors
    ///
    /// A [`RegistrationError`] when the host's global flags clash with each
    /// other or with the universal flags, or when one has no name.
    pub fn new(host: H, info: Info) -> Result<Self, RegistrationError> {
        let mut flags = universal_flags();
        flags.extend(H::Flags::flags());
        check_flags(&info.executable, &flags)?;

        Ok(Self {
            host,
            info,
            commands: BTreeMap::new(),
            aliases: BTreeMap::new(),
            keywords: Vec::new(),
        })
    }

    /// The host.
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Identity of the executable.
    pub fn info(&self) -> &Info {
        &self.info
    }

    /// Register a command by its constructor.
    ///
    /// The constructor is called once now to validate the command and once
    /// per invocation afterwards.
    pub fn register<C, F>(&mut self, constructor: F) -> Result<(), RegistrationError>
    where
        C: Command<H> + 'static,
        F: Fn() -> C + 'static,
    {
        let factory = factory(constructor);
        let instance = factory();
        let description = instance.description();
        let name = description.command.clone();

        if self.commands.contains_key(&name) {
            return Err(RegistrationError::DuplicateCommand { name });
        }
        if !description.positional.is_valid() {
            return Err(RegistrationError::InvalidPositional { command: name });
        }
        let mut flags = universal_flags();
        flags.extend(instance.flags());
        check_flags(&name, &flags)?;
        instance.before_register(self)?;

        debug!(command = %name, "registered command");
        self.commands.insert(name, factory);
        Ok(())
    }

    /// Register an alias.
    pub fn register_alias(&mut self, alias: Alias) -> Result<(), RegistrationError> {
        if self.aliases.contains_key(&alias.name) {
            return Err(RegistrationError::DuplicateAlias { name: alias.name });
        }
        debug!(alias = %alias.name, target = %alias.expansion(), "registered alias");
        self.aliases.insert(alias.name.clone(), alias);
        Ok(())
    }

    /// Register a keyword. Keywords apply in registration order.
    pub fn register_keyword(&mut self, keyword: Keyword<H::Flags>) -> Result<(), RegistrationError> {
        if self.keywords.iter().any(|k| k.name == keyword.name) {
            return Err(RegistrationError::DuplicateKeyword { name: keyword.name });
        }
        self.keywords.push(keyword);
        Ok(())
    }

    /// Registered command names, sorted.
    pub fn commands(&self) -> Vec<String> {
        self.commands.keys().cloned().collect()
    }

    /// Registered alias names, sorted.
    pub fn aliases(&self) -> Vec<String> {
        self.aliases.keys().cloned().collect()
    }

    /// Registered keyword names, in registration order.
    pub fn keywords(&self) -> Vec<String> {
        self.keywords.iter().map(|k| k.name.clone()).collect()
    }

    /// The alias called `name`.
    pub fn alias(&self, name: &str) -> Option<&Alias> {
        self.aliases.get(name)
    }

    /// Description of the command called `name`.
    pub fn description(&self, name: &str) -> Option<Description<H::Requirement>> {
        self.commands.get(name).map(|factory| factory().description())
    }

    /// Version text.
    pub fn version(&self) -> String {
        format!("{} version {}", self.info.executable, self.info.version)
    }

    /// Resolve `argv` (without the executable name) into an [`Invocation`].
    pub fn resolve(&self, argv: &[String]) -> Result<Invocation<H>, ProgramError> {
        let mut arguments = Arguments::<H::Flags>::parse(&self.info.executable, argv)?;
        debug!(command = %arguments.command, args = ?arguments.args, "parsed global arguments");

        if let Some(invocation) = self.universal(&arguments) {
            return Ok(invocation);
        }

        for keyword in &self.keywords {
            if keyword.name == arguments.command {
                debug!(keyword = %keyword.name, "applying keyword");
                keyword.apply(&mut arguments)?;
            }
        }

        if let Some(invocation) = self.universal(&arguments) {
            return Ok(invocation);
        }
        if arguments.command.is_empty() {
            return Err(ProgramError::NeedAtLeastOneArgument {
                program: self.info.executable.clone(),
            });
        }

        if let Some(alias) = self.aliases.get(&arguments.command) {
            debug!(alias = %alias.name, expansion = %alias.expansion(), "expanding alias");
            alias.expand(&mut arguments);
        }

        let factory = self
            .commands
            .get(&arguments.command)
            .ok_or_else(|| ProgramError::UnknownCommand {
                command: arguments.command.clone(),
                known: self.commands(),
            })?;

        let mut command = factory();
        match CommandArguments::parse(arguments, command.as_mut())? {
            ParseOutcome::Help(description) => {
                Ok(Invocation::Help(self.command_page(&description, &command.flags())))
            }
            ParseOutcome::Ready(args) => Ok(Invocation::Run { command, args }),
        }
    }

    /// Resolve and run `argv`.
    pub fn exec(&self, io: &mut Io, argv: &[String]) -> Result<(), ProgramError> {
        match self.resolve(argv)? {
            Invocation::Help(page) => {
                write!(io.stdout, "{}", page)?;
                Ok(())
            }
            Invocation::Version(text) => {
                writeln!(io.stdout, "{}", text)?;
                Ok(())
            }
            Invocation::Run { mut command, args } => {
                let name = args.description.command.clone();
                let runtime = self.host.runtime(&args)?;
                debug!(command = %name, positionals = ?args.positionals, "running command");
                let mut ctx = Context {
                    args,
                    runtime,
                    io,
                    program: self,
                };
                command.run(&mut ctx)
            }
        }
    }

    /// Run `argv`, report any error on stderr and return the exit code.
    pub fn main(&self, io: &mut Io, argv: &[String]) -> ExitCode {
        match self.exec(io, argv) {
            Ok(()) => ExitCode::Success,
            Err(err) => {
                let code = err.code();
                debug!(error = %err, code = code.code(), "invocation failed");
                // Nothing sensible is left to do when stderr itself fails.
                let _ = writeln!(io.stderr, "{}", err);
                code
            }
        }
    }

    fn universal(&self, arguments: &Arguments<H::Flags>) -> Option<Invocation<H>> {
        if arguments.universals.help {
            Some(Invocation::Help(self.main_page()))
        } else if arguments.universals.version {
            Some(Invocation::Version(self.version()))
        } else {
            None
        }
    }
}

impl<H: Host> fmt::Debug for Program<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Program")
            .field("info", &self.info)
            .field("commands", &self.commands())
            .field("aliases", &self.aliases)
            .field("keywords", &self.keywords)
            .finish_non_exhaustive()
    }
}

/// Check that every flag is addressable and nothing is declared twice.
fn check_flags(owner: &str, flags: &[Flag]) -> Result<(), RegistrationError> {
    let mut ids = HashSet::new();
    let mut names = HashSet::new();
    for flag in flags {
        if !flag.has_name() {
            return Err(RegistrationError::UnnamedFlag {
                id: flag.id.clone(),
                owner: owner.to_string(),
            });
        }
        if !ids.insert(flag.id.clone()) {
            return Err(RegistrationError::DuplicateFlag {
                name: flag.id.clone(),
                owner: owner.to_string(),
            });
        }
        for name in flag.names() {
            if !names.insert(name.clone()) {
                return Err(RegistrationError::DuplicateFlag {
                    name,
                    owner: owner.to_string(),
                });
            }
        }
    }
    Ok(())
}
