//! exec command - run an executable in every repository

use std::path::Path;
use std::process::Command as Process;

use tracing::debug;

use crate::env::{requirements, EnvRequirement, Ggman};
use crate::program::{Command, Context, Description, Flag, FlagValues, Positional, ProgramError};

use super::Tally;

/// `ggman exec [--force] [--simulate] EXE [ARGS...]`
#[derive(Debug, Default)]
pub struct ExecCommand {
    force: bool,
    simulate: bool,
}

/// Quote `word` for a POSIX shell.
fn shell_quote(word: &str) -> String {
    let plain = !word.is_empty()
        && word
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:@,+%".contains(c));
    if plain {
        word.to_string()
    } else {
        format!("'{}'", word.replace('\'', r"'\''"))
    }
}

fn run_in(repo: &Path, exe: &str, args: &[String]) -> Result<(), ProgramError> {
    debug!(repo = %repo.display(), exe, "exec");
    let status = Process::new(exe)
        .args(args)
        .current_dir(repo)
        .status()
        .map_err(|e| ProgramError::command(format!("unable to run '{}': {}", exe, e)))?;
    if status.success() {
        Ok(())
    } else {
        Err(ProgramError::command(format!(
            "'{}' exited with {}",
            exe,
            status
                .code()
                .map_or_else(|| "a signal".to_string(), |c| format!("code {}", c))
        )))
    }
}

impl Command<Ggman> for ExecCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "exec",
            "Execute a command in all locally cloned repositories",
            requirements::FILTERED,
        )
        .positional(Positional::at_least("ARG", 1).usage(
            "Executable to run, followed by its arguments. \
             Use '--' before arguments that start with a dash",
        ))
    }

    fn flags(&self) -> Vec<Flag> {
        vec![
            Flag::switch("force")
                .short('f')
                .long("force")
                .usage("Continue with the remaining repositories when the command fails"),
            Flag::switch("simulate")
                .short('s')
                .long("simulate")
                .usage("Print a shell script instead of running the command"),
        ]
    }

    fn apply_flags(&mut self, values: &FlagValues) -> Result<(), ProgramError> {
        self.force = values.switch("force");
        self.simulate = values.switch("simulate");
        Ok(())
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let (exe, args) = match ctx.positionals().split_first() {
            Some((exe, args)) => (exe.clone(), args.to_vec()),
            None => return Ok(()),
        };
        let repos = ctx.runtime.repos();

        if self.simulate {
            let line = std::iter::once(exe.as_str())
                .chain(args.iter().map(String::as_str))
                .map(shell_quote)
                .collect::<Vec<_>>()
                .join(" ");
            ctx.println("#!/bin/sh")?;
            if !self.force {
                ctx.println("set -e")?;
            }
            for repo in repos {
                ctx.println(format!("cd {}", shell_quote(&repo.display().to_string())))?;
                ctx.println(&line)?;
            }
            return Ok(());
        }

        let mut tally = Tally::default();
        for repo in repos {
            let result = run_in(&repo, &exe, &args);
            tally.record(ctx, &repo, result)?;
            if tally.failed() > 0 && !self.force {
                break;
            }
        }
        tally.finish("exec")
    }
}
