//! ls command - list local repositories

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, ExitCode, Flag, FlagValues, ProgramError};

/// `ggman ls [--exit-code] [--one]`
#[derive(Debug, Default)]
pub struct LsCommand {
    exit_code: bool,
    one: bool,
}

impl Command<Ggman> for LsCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "ls",
            "List local paths to all locally cloned repositories",
            requirements::FILTERED,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![
            Flag::switch("exit-code")
                .short('e')
                .long("exit-code")
                .usage("Return exit code 1 if no repositories are found"),
            Flag::switch("one")
                .short('o')
                .long("one")
                .usage("List at most one repository, for use in shell scripts"),
        ]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.exit_code = values.switch("exit-code");
        self.one = values.switch("one");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let mut repos = ctx.runtime.repos();
        if self.one {
            repos.truncate(1);
        }

        if repos.is_empty() && self.exit_code {
            return Err(ProgramError::command_with_code(
                "no repositories found",
                ExitCode::General,
            ));
        }

        for repo in repos {
            ctx.println(repo.display())?;
        }
        Ok(())
    }
}
