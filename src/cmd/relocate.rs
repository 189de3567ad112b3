//! relocate command - move repositories to where their remote says they belong

use std::fs;
use std::path::Path;

use tracing::info;

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::git::Git;
use crate::program::{Command, Context, Description, Flag, FlagValues, ProgramError};

use super::{parse_url, Tally};

/// `ggman relocate [--simulate]`
#[derive(Debug, Default)]
pub struct RelocateCommand {
    simulate: bool,
}

impl RelocateCommand {
    fn relocate(&self, ctx: &mut Context<'_, Ggman>, repo: &Path) -> Result<(), ProgramError> {
        let Some(remote) = Git::open_exact(repo)?.default_remote_url()? else {
            return Ok(());
        };
        let target = ctx.runtime.local(&parse_url(&remote)?);
        if target == repo {
            return Ok(());
        }
        if target.exists() {
            return Err(ProgramError::command(format!(
                "unable to move to '{}': target already exists",
                target.display()
            )));
        }
        if target.starts_with(repo) {
            return Err(ProgramError::command(format!(
                "unable to move into '{}': target is inside the repository",
                target.display()
            )));
        }

        let parent = target.parent().unwrap_or(&ctx.runtime.root).to_path_buf();
        if self.simulate {
            ctx.println(format!("mkdir -p '{}'", parent.display()))?;
            return ctx.println(format!("mv '{}' '{}'", repo.display(), target.display()));
        }

        ctx.println(format!("Moving '{}' to '{}'", repo.display(), target.display()))?;
        info!(from = %repo.display(), to = %target.display(), "relocating");
        fs::create_dir_all(&parent)?;
        fs::rename(repo, &target)?;
        Ok(())
    }
}

impl Command<Ggman> for RelocateCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "relocate",
            "Move locally cloned repositories into the location given by their remote url",
            requirements::FILTERED,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("simulate")
            .short('s')
            .long("simulate")
            .usage("Print the moves as a shell script instead of performing them")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.simulate = values.switch("simulate");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let mut tally = Tally::default();
        for repo in ctx.runtime.repos() {
            let result = self.relocate(ctx, &repo);
            tally.record(ctx, &repo, result)?;
        }
        tally.finish("relocate")
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::testing::{lines, Fixture};
    use crate::program::ExitCode;

    #[test]
    fn simulate_prints_script() {
        let fixture = Fixture::new();
        let root = fixture.root();
        let repo = fixture.repo("misplaced", Some("https://github.com/hello/world.git"));

        let (code, out, _) = fixture.run(&["relocate", "--simulate"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(
            lines(&out),
            vec![
                format!("mkdir -p '{}'", root.join("github.com/hello").display()),
                format!(
                    "mv '{}' '{}'",
                    repo.display(),
                    root.join("github.com/hello/world").display()
                ),
            ]
        );
        assert!(repo.exists());
    }

    #[test]
    fn moves_repository() {
        let fixture = Fixture::new();
        let repo = fixture.repo("misplaced", Some("https://github.com/hello/world.git"));
        fixture.repo("github.com/already/here", Some("https://github.com/already/here"));

        let (code, out, _) = fixture.run(&["relocate"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(lines(&out).len(), 1);
        assert!(!repo.exists());
        assert!(fixture.root().join("github.com/hello/world/.git").exists());
    }

    #[test]
    fn occupied_target_fails() {
        let fixture = Fixture::new();
        fixture.repo("misplaced", Some("https://github.com/hello/world.git"));
        std::fs::create_dir_all(fixture.root().join("github.com/hello/world")).unwrap();

        let (code, _, err) = fixture.run(&["relocate"]);
        assert_eq!(code, ExitCode::General);
        assert!(err.contains("already exists"));
    }
}
