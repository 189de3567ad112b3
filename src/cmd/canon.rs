//! canon command - canonicalize a url

use crate::env::{requirements, CanSpec, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, Positional, ProgramError};

use super::parse_url;

/// `ggman canon URL [CANSPEC]`
#[derive(Debug, Default)]
pub struct CanonCommand;

impl Command<Ggman> for CanonCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "canon",
            "Print the canonical version of a url. Without CANSPEC the canonical file is used",
            requirements::CANFILE,
        )
        .positional(
            Positional::new("ARG", 1, Some(2))
                .usage("URL to canonicalize, optionally followed by a CANSPEC such as 'git@^:$.git'"),
        )
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let url = parse_url(&ctx.positionals()[0])?;
        let canonical = match ctx.positionals().get(1) {
            Some(spec) => CanSpec::new(spec.as_str()).apply(&url),
            None => ctx.runtime.canonical(&url),
        };
        ctx.println(canonical)
    }
}
