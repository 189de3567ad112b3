//! env command - print the variables ggman reads

use crate::env::config::{GGMAN_CANFILE, GGMAN_CONFIG, GGNORM, GGROOT, VARIABLES};
use crate::env::{requirements, EnvRequirement, Ggman, Parameters};
use crate::program::{Command, Context, Description, ExitCode, Positional, ProgramError};

/// `ggman env [VAR...]`
#[derive(Debug, Default)]
pub struct EnvCommand;

/// Resolved value of the variable `name`.
fn value(params: &Parameters, name: &str) -> String {
    match name {
        GGROOT => params.root.display().to_string(),
        GGNORM => params.norm.to_string(),
        GGMAN_CANFILE => params.canfile.display().to_string(),
        GGMAN_CONFIG => params
            .config
            .as_ref()
            .map(|path| path.display().to_string())
            .unwrap_or_default(),
        _ => String::new(),
    }
}

impl Command<Ggman> for EnvCommand {
    fn description(&self) -> Description<EnvRequirement> {
        Description::new(
            "env",
            "Print the resolved values of the variables ggman uses",
            requirements::NONE,
        )
        .positional(Positional::new("VAR", 0, None).usage(format!(
            "Variables to print, one of {}. Without any, all are printed as NAME=value",
            VARIABLES
                .iter()
                .map(|(name, _)| format!("'{}'", name))
                .collect::<Vec<_>>()
                .join(", ")
        )))
    }

    fn run(&mut self, ctx: &mut Context<'_, Ggman>) -> Result<(), ProgramError> {
        let program = ctx.program;
        let params = program.host().params();

        let mut lines = Vec::new();
        if ctx.positionals().is_empty() {
            for (name, _) in VARIABLES {
                lines.push(format!("{}={}", name, value(params, name)));
            }
        } else {
            for requested in ctx.positionals() {
                let name = VARIABLES
                    .iter()
                    .map(|(name, _)| *name)
                    .find(|name| name.eq_ignore_ascii_case(requested))
                    .ok_or_else(|| {
                        ProgramError::command_with_code(
                            format!("unknown variable '{}'", requested),
                            ExitCode::InvalidCommandArguments,
                        )
                    })?;
                lines.push(value(params, name));
            }
        }

        for line in lines {
            ctx.println(line)?;
        }
        Ok(())
    }
}
