//! ggman commands
//!
//! One module per command, each implementing [`Command<Ggman>`].
//!
//! # Architecture
//!
//! Commands are thin. They declare their [`Description`] (name, positional
//! bounds, [`EnvRequirement`](crate::env::EnvRequirement)) and their own
//! flags; the program core parses and validates everything before `run` is
//! called. Inside `run` a command only sees:
//!
//! - its positionals and typed global flags via [`Context`]
//! - the [`Env`](crate::env::Env) built for its requirement
//! - the output streams
//!
//! Commands iterating over many repositories keep going when one of them
//! fails and report a summary error at the end (see [`Tally`]).
//!
//! [`Description`]: crate::program::Description
//! [`Context`]: crate::program::Context

mod canon;
mod clone;
mod comps;
mod env;
mod exec;
mod fix;
mod here;
mod ls;
mod lsr;
mod relocate;
mod root;
mod sync;
mod url;
mod web;
mod where_;

use std::path::Path;

pub use canon::CanonCommand;
pub use clone::CloneCommand;
pub use comps::CompsCommand;
pub use env::EnvCommand;
pub use exec::ExecCommand;
pub use fix::FixCommand;
pub use here::HereCommand;
pub use ls::LsCommand;
pub use lsr::LsrCommand;
pub use relocate::RelocateCommand;
pub use root::RootCommand;
pub use sync::{FetchCommand, PullCommand};
pub use url::UrlCommand;
pub use web::WebCommand;
pub use where_::WhereCommand;

use crate::env::flags::ids;
use crate::env::{Ggman, Url};
use crate::git::{Git, GitError};
use crate::program::{
    Alias, Context, ExitCode, Info, Keyword, Program, ProgramError, RegistrationError,
};

/// Name and version of the binary.
pub fn info() -> Info {
    Info {
        executable: "ggman".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        description: "ggman manages local git repositories".to_string(),
    }
}

/// The built-in aliases.
pub fn aliases() -> Vec<Alias> {
    vec![
        Alias::new("git", "exec")
            .args(["--", "git"])
            .description("Run a git command in every repository"),
        Alias::new("show", "exec")
            .args(["--", "git", "-c", "core.pager=", "show", "HEAD"])
            .description("Show the most recent commit of every repository"),
        Alias::new("canonical", "lsr")
            .args(["--canonical"])
            .description("List canonical remote urls of repositories"),
        Alias::new("sclone", "clone")
            .args(["--shallow"])
            .description("Clone a repository with a depth of 1"),
    ]
}

/// `for FILTER COMMAND ARGS...` is `--for FILTER COMMAND ARGS...`.
pub fn for_keyword() -> Keyword<crate::env::GgmanFlags> {
    Keyword::new(
        "for",
        "Run a command on repositories matching a filter",
        |args| {
            if args.args.len() < 2 {
                return Err(ProgramError::Keyword {
                    keyword: "for".to_string(),
                    message: "need at least a filter and a command".to_string(),
                });
            }
            let filter = args.args.remove(0);
            args.values.push_value(ids::FOR, filter);
            args.command = args.args.remove(0);
            Ok(())
        },
    )
}

/// The ggman program with every command, alias and keyword registered.
pub fn program(host: Ggman) -> Result<Program<Ggman>, RegistrationError> {
    let mut program = Program::new(host, info())?;

    program.register(CanonCommand::default)?;
    program.register(CloneCommand::default)?;
    program.register(CompsCommand::default)?;
    program.register(EnvCommand::default)?;
    program.register(ExecCommand::default)?;
    program.register(FetchCommand::default)?;
    program.register(FixCommand::default)?;
    program.register(HereCommand::default)?;
    program.register(LsCommand::default)?;
    program.register(LsrCommand::default)?;
    program.register(PullCommand::default)?;
    program.register(RelocateCommand::default)?;
    program.register(RootCommand::default)?;
    program.register(UrlCommand::default)?;
    program.register(WebCommand::default)?;
    program.register(WhereCommand::default)?;

    for alias in aliases() {
        program.register_alias(alias)?;
    }

    program.register_keyword(Keyword::help())?;
    program.register_keyword(Keyword::version())?;
    program.register_keyword(for_keyword())?;

    Ok(program)
}

// =============================================================================
// Shared helpers
// =============================================================================

impl From<GitError> for ProgramError {
    fn from(err: GitError) -> Self {
        ProgramError::command(err.to_string())
    }
}

/// Parse a user-supplied URL.
pub(crate) fn parse_url(input: &str) -> Result<Url, ProgramError> {
    Url::parse(input).map_err(|e| ProgramError::invalid_target(e.to_string()))
}

/// The repository containing `path`, or an invalid target error.
pub(crate) fn current_repo(path: &Path) -> Result<Git, ProgramError> {
    Git::open(path).map_err(|_| {
        ProgramError::invalid_target(format!(
            "'{}' is not inside a git repository",
            path.display()
        ))
    })
}

/// Success and failure counts of a command run over many repositories.
#[derive(Debug, Default)]
pub(crate) struct Tally {
    total: usize,
    failed: usize,
}

impl Tally {
    /// Record the outcome for `repo`, reporting a failure on stderr.
    pub(crate) fn record(
        &mut self,
        ctx: &mut Context<'_, Ggman>,
        repo: &Path,
        result: Result<(), ProgramError>,
    ) -> Result<(), ProgramError> {
        self.total += 1;
        if let Err(err) = result {
            self.failed += 1;
            tracing::warn!(repo = %repo.display(), error = %err, "repository failed");
            ctx.eprintln(format!("{}: {}", repo.display(), err))?;
        }
        Ok(())
    }

    /// Number of failures so far.
    pub(crate) fn failed(&self) -> usize {
        self.failed
    }

    /// `Ok` when nothing failed.
    pub(crate) fn finish(self, action: &str) -> Result<(), ProgramError> {
        if self.failed == 0 {
            return Ok(());
        }
        Err(ProgramError::command_with_code(
            format!(
                "{} failed for {} of {} repositories",
                action, self.failed, self.total
            ),
            ExitCode::General,
        ))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! A ggman program rooted in a temporary directory.

    use std::path::PathBuf;

    use tempfile::TempDir;

    use crate::env::{Ggman, Norm, Parameters};
    use crate::program::{Buffer, ExitCode, Io};

    /// A root folder with helpers to create repositories in it.
    pub struct Fixture {
        pub dir: TempDir,
        pub workdir: Option<PathBuf>,
        pub canfile: Option<String>,
    }

    impl Fixture {
        pub fn new() -> Self {
            Self {
                dir: TempDir::new().unwrap(),
                workdir: None,
                canfile: None,
            }
        }

        pub fn root(&self) -> PathBuf {
            self.dir.path().canonicalize().unwrap()
        }

        /// Create a repository at `rel` with `origin` pointing at `url`.
        pub fn repo(&self, rel: &str, url: Option<&str>) -> PathBuf {
            let path = self.root().join(rel);
            std::fs::create_dir_all(&path).unwrap();
            let repo = git2::Repository::init(&path).unwrap();
            if let Some(url) = url {
                repo.remote("origin", url).unwrap();
            }
            path
        }

        pub fn params(&self) -> Parameters {
            let root = self.root();
            let canfile = root.join(".canfile");
            if let Some(text) = &self.canfile {
                std::fs::write(&canfile, text).unwrap();
            }
            Parameters {
                workdir: self.workdir.clone().unwrap_or_else(|| root.clone()),
                root,
                norm: Norm::Exact,
                canfile,
                config: None,
            }
        }

        /// Run ggman with `argv`, returning exit code, stdout and stderr.
        pub fn run(&self, argv: &[&str]) -> (ExitCode, String, String) {
            let program = super::program(Ggman::new(self.params())).unwrap();
            let (out, err) = (Buffer::new(), Buffer::new());
            let mut io = Io::new(out.clone(), err.clone());
            let argv: Vec<String> = argv.iter().map(|s| s.to_string()).collect();
            let code = program.main(&mut io, &argv);
            (code, out.contents(), err.contents())
        }
    }

    pub fn lines(text: &str) -> Vec<&str> {
        text.lines().collect()
    }
}
