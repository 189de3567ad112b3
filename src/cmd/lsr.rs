//! lsr command - list remote urls of local repositories

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::git::Git;
use crate::program::{Command, Context, Description, Flag, FlagValues, ProgramError};

use super::parse_url;

/// `ggman lsr [--canonical]`
#[derive(Debug, Default)]
pub struct LsrCommand {
    canonical: bool,
}

impl Command<Ggman> for LsrCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "lsr",
            "List remote urls of all locally cloned repositories",
            requirements::FILTERED_CANFILE,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("canonical")
            .short('c')
            .long("canonical")
            .usage("Print canonicalized urls")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.canonical = values.switch("canonical");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        for repo in ctx.runtime.repos() {
            // Repositories without a remote have nothing to list.
            let Some(remote) = Git::open_exact(&repo)?.default_remote_url()? else {
                continue;
            };
            let line = if self.canonical {
                ctx.runtime.canonical(&parse_url(&remote)?)
            } else {
                remote
            };
            ctx.println(line)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::testing::{lines, Fixture};
    use crate::program::ExitCode;

    fn fixture() -> Fixture {
        let mut fixture = Fixture::new();
        fixture.canfile = Some("https://^/$\n".to_string());
        fixture.repo("github.com/hello/world", Some("git@github.com:hello/world.git"));
        fixture.repo("local/only", None);
        fixture
    }

    #[test]
    fn lists_remotes() {
        let (code, out, _) = fixture().run(&["lsr"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(lines(&out), vec!["git@github.com:hello/world.git"]);
    }

    #[test]
    fn canonical_uses_canfile() {
        let (_, out, _) = fixture().run(&["lsr", "--canonical"]);
        assert_eq!(lines(&out), vec!["https://github.com/hello/world"]);
    }

    #[test]
    fn canonical_alias() {
        let (_, out, _) = fixture().run(&["canonical"]);
        assert_eq!(lines(&out), vec!["https://github.com/hello/world"]);
    }
}
