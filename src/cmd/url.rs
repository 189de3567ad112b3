//! url command - print the remote url of the current repository

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, ProgramError};

use super::current_repo;

/// `ggman url`
#[derive(Debug, Default)]
pub struct UrlCommand;

impl Command<Ggman> for UrlCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "url",
            "Print the url of the default remote of the repository containing the current directory",
            requirements::NONE,
        )
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let remote = current_repo(&ctx.runtime.workdir)?
            .default_remote_url()?
            .ok_or_else(|| ProgramError::invalid_target("repository has no remote"))?;
        ctx.println(remote)
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::testing::Fixture;
    use crate::program::ExitCode;

    #[test]
    fn prints_origin() {
        let mut fixture = Fixture::new();
        let repo = fixture.repo("r", Some("git@github.com:hello/world.git"));
        fixture.workdir = Some(repo);
        let (code, out, _) = fixture.run(&["url"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "git@github.com:hello/world.git\n");
    }

    #[test]
    fn no_remote_is_invalid_target() {
        let mut fixture = Fixture::new();
        fixture.workdir = Some(fixture.repo("r", None));
        let (code, _, err) = fixture.run(&["url"]);
        assert_eq!(code, ExitCode::InvalidTarget);
        assert!(err.contains("no remote"));
    }
}
