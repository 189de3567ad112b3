//! root command - print the root folder

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, ProgramError};

/// `ggman root`
#[derive(Debug, Default)]
pub struct RootCommand;

impl Command<Ggman> for RootCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "root",
            "Print the ggman root folder. Does not check that it exists",
            requirements::NONE,
        )
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let root = ctx.runtime.root.display().to_string();
        ctx.println(root)
    }
}
