//! fetch and pull commands - update every repository from its remotes

use std::path::Path;

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::git::{GitCli, GitError};
use crate::program::{Command, Context, Description, ProgramError};

use super::Tally;

type Operation = fn(&GitCli, &Path) -> Result<(), GitError>;

/// Run `op` in every selected repository, announcing each with `verb`.
fn each_repo(
    ctx: &mut Context<'_, Ggman>,
    verb: &str,
    action: &str,
    op: Operation,
) -> Result<(), ProgramError> {
    let mut tally = Tally::default();
    for repo in ctx.runtime.repos() {
        ctx.println(format!("{} '{}'", verb, repo.display()))?;
        let result = op(&ctx.runtime.git, &repo).map_err(ProgramError::from);
        tally.record(ctx, &repo, result)?;
    }
    tally.finish(action)
}

/// `ggman fetch`
#[derive(Debug, Default)]
pub struct FetchCommand;

impl Command<Ggman> for FetchCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "fetch",
            "Run 'git fetch --all' on all locally cloned repositories",
            requirements::FILTERED,
        )
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        each_repo(ctx, "Fetching", "fetch", GitCli::fetch)
    }
}

/// `ggman pull`
#[derive(Debug, Default)]
pub struct PullCommand;

impl Command<Ggman> for PullCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "pull",
            "Run 'git pull' on all locally cloned repositories",
            requirements::FILTERED,
        )
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        each_repo(ctx, "Pulling", "pull", GitCli::pull)
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::testing::{lines, Fixture};
    use crate::program::ExitCode;

    #[test]
    fn nothing_selected_is_success() {
        let fixture = Fixture::new();
        let (code, out, _) = fixture.run(&["fetch"]);
        assert_eq!(code, ExitCode::Success);
        assert!(out.is_empty());
    }

    #[test]
    fn failures_are_collected() {
        let fixture = Fixture::new();
        fixture.repo("a/one", Some("/nonexistent/remote/one"));
        fixture.repo("a/two", Some("/nonexistent/remote/two"));

        let (code, out, err) = fixture.run(&["pull"]);
        assert_eq!(code, ExitCode::General);
        assert_eq!(lines(&out).len(), 2);
        assert!(err.contains("pull failed for 2 of 2 repositories"));
    }
}
