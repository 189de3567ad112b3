//! web command - open the current repository in a web browser

use crate::env::{requirements, EnvRequirement, Ggman, Url};
use crate::program::{Command, Context, Description, Flag, FlagValues, ProgramError};

use super::{current_repo, parse_url};

/// `ggman web [--url]`
#[derive(Debug, Default)]
pub struct WebCommand {
    url: bool,
}

/// The https page of the repository at `url`.
pub fn web_url(url: &Url) -> String {
    format!("https://{}", url.components().join("/"))
}

impl Command<Ggman> for WebCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "web",
            "Open the current repository in a web browser",
            requirements::NONE,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("url")
            .short('u')
            .long("url")
            .usage("Print the url instead of opening it")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.url = values.switch("url");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let remote = current_repo(&ctx.runtime.workdir)?
            .default_remote_url()?
            .ok_or_else(|| ProgramError::invalid_target("repository has no remote"))?;
        let page = web_url(&parse_url(&remote)?);

        if self.url {
            return ctx.println(page);
        }
        open::that(&page)
            .map_err(|e| ProgramError::command(format!("unable to open '{}': {}", page, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cmd::testing::Fixture;
    use crate::program::ExitCode;

    #[test]
    fn web_url_from_scp() {
        let url = Url::parse("git@github.com:hello/world.git").unwrap();
        assert_eq!(web_url(&url), "https://github.com/hello/world");
    }

    #[test]
    fn url_flag_prints() {
        let mut fixture = Fixture::new();
        fixture.workdir = Some(fixture.repo("r", Some("ssh://git@gitlab.com/a/b.git")));
        let (code, out, _) = fixture.run(&["web", "--url"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(out, "https://gitlab.com/a/b\n");
    }
}
