//! ggman binary entry point.

use std::process::ExitCode;

use anyhow::{Context as _, Result};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use ggman::env::Parameters;
use ggman::program::{self, Io};
use ggman::Ggman;

/// Variable holding the log filter.
const GGMAN_LOG: &str = "GGMAN_LOG";

/// Initialize the tracing subscriber.
///
/// The filter comes from `GGMAN_LOG` and defaults to warnings only. Logs go to
/// stderr so they never mix with command output.
fn init_tracing() {
    let filter = EnvFilter::try_from_env(GGMAN_LOG).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn setup() -> Result<program::Program<Ggman>> {
    let params = Parameters::from_env().context("unable to load configuration")?;
    tracing::debug!(?params, "resolved parameters");
    let program = ggman::cmd::program(Ggman::new(params)).context("unable to register commands")?;
    Ok(program)
}

fn main() -> ExitCode {
    init_tracing();

    let program = match setup() {
        Ok(program) => program,
        Err(err) => {
            eprintln!("{:#}", err);
            let code = if err.is::<ggman::env::ConfigError>() {
                program::ExitCode::InvalidEnvironment
            } else {
                program::ExitCode::Internal
            };
            return code.into();
        }
    };

    let args = match program::decode_args(std::env::args_os().skip(1)) {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{}", err);
            return err.code().into();
        }
    };
    program.main(&mut Io::std(), &args).into()
}
