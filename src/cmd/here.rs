//! here command - print the repository containing the working directory

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, Flag, FlagValues, ProgramError};

use super::current_repo;

/// `ggman here [--tree]`
#[derive(Debug, Default)]
pub struct HereCommand {
    tree: bool,
}

impl Command<Ggman> for HereCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "here",
            "Print the root of the repository containing the current directory",
            requirements::ROOT,
        )
    }

    fn flags(&self) -> Vec<Flag> {
        vec![Flag::switch("tree")
            .short('t')
            .long("tree")
            .usage("Also print the current path relative to the repository root")]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.tree = values.switch("tree");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let workdir = ctx.runtime.workdir.clone();
        let git = current_repo(&workdir)?;
        let root = crate::env::filter::absolute(git.workdir()?);
        ctx.println(root.display())?;

        if self.tree {
            let relative = workdir.strip_prefix(&root).unwrap_or(&workdir);
            let relative = relative.display().to_string();
            ctx.println(if relative.is_empty() { ".".to_string() } else { relative })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::cmd::testing::{lines, Fixture};
    use crate::program::ExitCode;

    #[test]
    fn prints_repository_and_tree() {
        let mut fixture = Fixture::new();
        let repo = fixture.repo("github.com/hello/world", None);
        let nested = repo.join("src/deep");
        std::fs::create_dir_all(&nested).unwrap();
        fixture.workdir = Some(nested);

        let (code, out, _) = fixture.run(&["here", "--tree"]);
        assert_eq!(code, ExitCode::Success);
        assert_eq!(lines(&out), vec![repo.display().to_string(), "src/deep".to_string()]);
    }

    #[test]
    fn repository_root_has_dot_tree() {
        let mut fixture = Fixture::new();
        let repo = fixture.repo("r", None);
        fixture.workdir = Some(repo);
        let (_, out, _) = fixture.run(&["here", "-t"]);
        assert_eq!(lines(&out)[1], ".");
    }

    #[test]
    fn outside_repository_is_invalid_target() {
        let mut fixture = Fixture::new();
        let plain = fixture.root().join("plain");
        std::fs::create_dir_all(&plain).unwrap();
        fixture.workdir = Some(plain);
        let (code, _, _) = fixture.run(&["here"]);
        assert_eq!(code, ExitCode::InvalidTarget);
    }
}
