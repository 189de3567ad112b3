//! where command - print the local path of a url

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, Positional, ProgramError};

use super::parse_url;

/// `ggman where URL`
#[derive(Debug, Default)]
pub struct WhereCommand;

impl Command<Ggman> for WhereCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "where",
            "Print the location where a repository would be cloned to",
            requirements::NONE,
        )
        .positional(Positional::exactly("URL", 1).usage("URL of the repository"))
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let url = parse_url(&ctx.positionals()[0])?;
        let local = ctx.runtime.local(&url);
        ctx.println(local.display())
    }
}
