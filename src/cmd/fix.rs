//! fix command - canonicalize remote urls

use std::path::Path;

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::git::Git;
use crate::program::{Command, Context, Description, Flag, FlagValues, ProgramError};

use super::{parse_url, Tally};

/// `ggman fix [--simulate]`
#[derive(Debug, Default)]
pub struct FixCommand {
    simulate: bool,
}

impl FixCommand {
    fn fix(&self, ctx: &mut Context<'_, Ggman>, repo: &Path) -> Result<(), ProgramError> {
        let git = Git::open_exact(repo)?;
        for remote in git.remotes()? {
            let Some(url) = git.remote_url(&remote)? else {
                continue;
            };
            let canonical = ctx.runtime.canonical(&parse_url(&url)?);
            if canonical == url {
                continue;
            }

            let verb = if self.simulate { "Would update" } else { "Updating" };
            ctx.println(format!(
                "{}: {} {}: {} -> {}",
                repo.display(),
                verb,
                remote,
                url,
                canonical
            ))?;
            if !self.simulate {
                git.set_remote_url(&remote, &canonical)?;
            }
        }
        Ok(())
    }
}

impl Command<Ggman> for FixCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "fix",
            "Update all remotes of locally cloned repositories to their canonical urls",
            requirements::FILTERED_CANFILE,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("simulate")
            .short('s')
            .long("simulate")
            .usage("Print what would be changed without changing anything")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.simulate = values.switch("simulate");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let mut tally = Tally::default();
        for repo in ctx.runtime.repos() {
            let result = self.fix(ctx, &repo);
            tally.record(ctx, &repo, result)?;
        }
        tally.finish("fix")
    }
}
