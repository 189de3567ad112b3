//! env
//!
//! The ggman host: global flags, requirements and the runtime environment
//! commands operate in.
//!
//! # Architecture
//!
//! ```text
//! Parameters (config file + variables)
//!     + EnvRequirement (declared by the command)
//!     + GgmanFlags (parsed from the command line)
//!     -> Env
//! ```
//!
//! [`Ggman`] implements [`Host`] by building an [`Env`] once the command
//! phase has succeeded. Failures here are environment errors (exit code 5)
//! and happen before the command runs.
//!
//! # Invariants
//!
//! - `Env::root` exists whenever the requirement asks for it
//! - `Env::filter` is empty unless the requirement allows filtering
//! - `Env::canfile` holds the default rules unless the requirement asks for
//!   the canonical file

pub mod canon;
pub mod config;
pub mod filter;
pub mod flags;
pub mod norm;
pub mod requirement;
pub mod scan;
pub mod url;

use std::path::PathBuf;

use thiserror::Error;
use tracing::debug;

pub use canon::{CanFile, CanSpec, CanonError};
pub use config::{Config, ConfigError, Parameters};
pub use filter::{Filter, FilterError, Pattern};
pub use flags::GgmanFlags;
pub use norm::Norm;
pub use requirement::{requirements, EnvRequirement};
pub use url::{Url, UrlError};

use crate::git::GitCli;
use crate::program::{Host, HostArguments, ProgramError};

/// Errors from building the environment.
#[derive(Debug, Error)]
pub enum EnvError {
    /// The root folder does not exist.
    #[error("unable to find root folder '{}'; set GGROOT to an existing directory", .path.display())]
    RootMissing {
        /// The configured root
        path: PathBuf,
    },

    /// Configuration could not be resolved.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The canonical file could not be loaded.
    #[error("unable to load canonical file: {0}")]
    CanFile(#[from] CanonError),

    /// A filter does not compile.
    #[error("invalid filter: {0}")]
    Filter(#[from] FilterError),
}

impl From<EnvError> for ProgramError {
    fn from(err: EnvError) -> Self {
        ProgramError::Environment {
            message: err.to_string(),
        }
    }
}

/// The environment a ggman command runs in.
#[derive(Debug, Clone)]
pub struct Env {
    /// Root folder.
    pub root: PathBuf,
    /// Directory the invocation runs in.
    pub workdir: PathBuf,
    /// Normalization of local paths.
    pub norm: Norm,
    /// Canonical rules.
    pub canfile: CanFile,
    /// Repository filter.
    pub filter: Filter,
    /// The git executable.
    pub git: GitCli,
}

impl Env {
    /// Build the environment `requirement` asks for.
    pub fn new(
        params: &Parameters,
        requirement: &EnvRequirement,
        flags: &GgmanFlags,
        git: GitCli,
    ) -> Result<Self, EnvError> {
        if requirement.needs_root && !params.root.is_dir() {
            return Err(EnvError::RootMissing {
                path: params.root.clone(),
            });
        }
        let root = filter::absolute(&params.root);
        let workdir = filter::absolute(&params.workdir);

        let canfile = if requirement.needs_canfile {
            CanFile::load(&params.canfile)?
        } else {
            CanFile::default()
        };

        let filter = if requirement.allows_filter {
            Filter::from_flags(flags, &workdir)?
        } else {
            Filter::default()
        };

        debug!(
            requirement = requirement.name,
            root = %root.display(),
            norm = %params.norm,
            "built environment"
        );

        Ok(Self {
            root,
            workdir,
            norm: params.norm,
            canfile,
            filter,
            git,
        })
    }

    /// Where the repository at `url` lives locally.
    pub fn local(&self, url: &Url) -> PathBuf {
        self.norm.join(&self.root, &url.components())
    }

    /// Canonical form of `url`.
    pub fn canonical(&self, url: &Url) -> String {
        self.canfile.canonical(url)
    }

    /// Repositories below the root that pass the filter, sorted.
    pub fn repos(&self) -> Vec<PathBuf> {
        self.filter.select(&self.root, scan::scan(&self.root))
    }
}

/// The ggman application.
#[derive(Debug, Clone)]
pub struct Ggman {
    params: Parameters,
    git: GitCli,
}

impl Ggman {
    /// A host using `params` and the `git` on `PATH`.
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            git: GitCli::default(),
        }
    }

    /// Resolved settings.
    pub fn params(&self) -> &Parameters {
        &self.params
    }
}

impl Host for Ggman {
    type Flags = GgmanFlags;
    type Requirement = EnvRequirement;
    type Runtime = Env;

    fn runtime(&self, args: &HostArguments<Self>) -> Result<Env, ProgramError> {
        Ok(Env::new(
            &self.params,
            &args.description.requirements,
            &args.flags,
            self.git.clone(),
        )?)
    }
}
