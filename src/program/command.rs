//! program::command
//!
//! The interface every dispatchable command implements.
//!
//! # Lifecycle
//!
//! A command is registered as a factory closure. Each invocation gets a fresh
//! instance, so no state leaks from one run into the next:
//!
//! ```text
//! factory() -> description() -> flags() -> apply_flags() -> after_parse() -> run()
//! ```
//!
//! # Example
//!
//! ```
//! use ggman::env::{requirements, EnvRequirement};
//! use ggman::program::{Command, Context, Description, ProgramError};
//! use ggman::Ggman;
//!
//! #[derive(Default)]
//! struct Hello;
//!
//! impl Command<Ggman> for Hello {
//!     fn description(&self) -> Description<EnvRequirement> {
//!         Description::new("hello", "Print a greeting", requirements::NONE)
//!     }
//!
//!     fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
//!         ctx.println("hello")
//!     }
//! }
//! ```

use super::context::Context;
use super::description::Description;
use super::errors::{ProgramError, RegistrationError};
use super::flagset::FlagValues;
use super::meta::Flag;
use super::{Host, Program};

/// A command that can be registered with a [`Program`].
pub trait Command<H: Host> {
    /// Static metadata: name, help text, positional bounds, requirement.
    fn description(&self) -> Description<H::Requirement>;

    /// Flags understood by this command only.
    fn flags(&self) -> Vec<Flag> {
        Vec::new()
    }

    /// Called once when the command is registered.
    ///
    /// Returning an error aborts the registration.
    fn before_register(&self, _program: &Program<H>) -> Result<(), RegistrationError> {
        Ok(())
    }

    /// Receive the parsed values of [`flags`](Command::flags).
    fn apply_flags(&mut self, _values: &FlagValues) -> Result<(), ProgramError> {
        Ok(())
    }

    /// Semantic checks once flags are applied and positionals are counted.
    fn after_parse(&mut self) -> Result<(), ProgramError> {
        Ok(())
    }

    /// Run the command.
    fn run(&mut self, ctx: &mut Context<'_, H>) -> Result<(), ProgramError>;
}

/// Produces a fresh command instance per invocation.
pub type Factory<H> = Box<dyn Fn() -> Box<dyn Command<H>>>;

/// Wrap a constructor into a [`Factory`].
pub fn factory<H, C, F>(constructor: F) -> Factory<H>
where
    H: Host,
    C: Command<H> + 'static,
    F: Fn() -> C + 'static,
{
    Box::new(move || Box::new(constructor()) as Box<dyn Command<H>>)
}
