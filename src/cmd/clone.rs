//! clone command - clone a repository into its local path

use std::fs;

use tracing::info;

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::git::Git;
use crate::program::{Command, Context, Description, Flag, FlagValues, Positional, ProgramError};

use super::parse_url;

/// `ggman clone URL [ARGS...]`
#[derive(Debug, Default)]
pub struct CloneCommand {
    force: bool,
    local: bool,
    shallow: bool,
}

impl Command<Ggman> for CloneCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "clone",
            "Clone a repository into a path based on its url",
            requirements::ROOT,
        )
        .positional(Positional::at_least("ARG", 1).usage(
            "URL of the repository to clone. Further arguments are passed to 'git clone'; \
             separate them with '--' when they start with a dash",
        ))
    }

    fn flags(&self) -> Vec<Flag> {
        vec![
            Flag::switch("force")
                .short('f')
                .long("force")
                .usage("Do not complain when a repository already exists in the target location"),
            Flag::switch("local")
                .short('l')
                .long("local")
                .usage("Clone into a directory named after the repository inside the current directory"),
            Flag::switch("shallow")
                .short('s')
                .long("shallow")
                .usage("Create a shallow clone with a depth of 1"),
        ]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.force = values.switch("force");
        self.local = values.switch("local");
        self.shallow = values.switch("shallow");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let source = ctx.positionals()[0].clone();
        let url = parse_url(&source)?;

        let dest = if self.local {
            let name = url
                .components()
                .pop()
                .ok_or_else(|| ProgramError::invalid_target(format!("'{}' names no repository", source)))?;
            ctx.runtime.workdir.join(name)
        } else {
            ctx.runtime.local(&url)
        };

        if dest.exists() {
            if self.force && Git::open_exact(&dest).is_ok() {
                return ctx.println(format!("Repository already exists at '{}'", dest.display()));
            }
            return Err(ProgramError::command(format!(
                "unable to clone repository: '{}' already exists",
                dest.display()
            )));
        }

        let mut extra = Vec::new();
        if self.shallow {
            extra.extend(["--depth".to_string(), "1".to_string()]);
        }
        extra.extend(ctx.positionals()[1..].iter().cloned());

        ctx.println(format!("Cloning '{}' into '{}'", source, dest.display()))?;
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        info!(url = %source, dest = %dest.display(), "cloning");
        ctx.runtime.git.clone_repo(&source, &dest, &extra)?;
        Ok(())
    }
}
