//! comps command - print the components of a url

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, Positional, ProgramError};

use super::parse_url;

/// `ggman comps URL`
#[derive(Debug, Default)]
pub struct CompsCommand;

impl Command<Ggman> for CompsCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "comps",
            "Print the components of a url, one per line",
            requirements::NONE,
        )
        .positional(Positional::exactly("URL", 1).usage("URL to split"))
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let url = parse_url(&ctx.positionals()[0])?;
        for component in url.components() {
            ctx.println(component)?;
        }
        Ok(())
    }
}
