//! env::requirement
//!
//! What a ggman command needs from its environment.
//!
//! # Architecture
//!
//! Each command declares one [`EnvRequirement`]. It decides two things:
//!
//! - which global flags the command accepts: all of them when the command
//!   operates on a filtered set of repositories, none otherwise
//! - what [`Env`](super::Env) must provide before the command runs: an
//!   existing root folder, the canonical file
//!
//! There is no global "environment is valid" check. A command that only
//! computes a path from a URL runs without a root folder on disk.
//!
//! # Example
//!
//! ```
//! use ggman::env::requirements;
//!
//! assert!(requirements::FILTERED.allows_filter);
//! assert!(!requirements::NONE.needs_root);
//! ```

use super::flags::GgmanFlags;
use crate::program::{validate_allowed_flags, Arguments, Flag, ProgramError, Requirement};

/// Requirements of a command on its environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvRequirement {
    /// Human-readable name for this requirement set.
    pub name: &'static str,
    /// The root folder must exist.
    pub needs_root: bool,
    /// The command accepts the global filter flags.
    pub allows_filter: bool,
    /// The canonical file is loaded.
    pub needs_canfile: bool,
}

impl EnvRequirement {
    /// Create a new requirement set.
    pub const fn new(
        name: &'static str,
        needs_root: bool,
        allows_filter: bool,
        needs_canfile: bool,
    ) -> Self {
        Self {
            name,
            needs_root,
            allows_filter,
            needs_canfile,
        }
    }
}

impl Requirement<GgmanFlags> for EnvRequirement {
    fn allows_flag(&self, _flag: &Flag) -> bool {
        self.allows_filter
    }

    /// Reject disallowed flags, then contradictory status filters.
    fn validate(&self, args: &Arguments<GgmanFlags>) -> Result<(), ProgramError> {
        validate_allowed_flags(self, args)?;
        if let Some((a, b)) = args.flags().conflicts() {
            return Err(ProgramError::GlobalFlagParse {
                message: format!("'{}' and '{}' are mutually exclusive", a, b),
            });
        }
        Ok(())
    }
}

/// Predefined requirement sets.
pub mod requirements {
    use super::EnvRequirement;

    /// Nothing at all: pure computations on the arguments.
    pub const NONE: EnvRequirement = EnvRequirement::new("none", false, false, false);

    /// An existing root folder, no filtering.
    pub const ROOT: EnvRequirement = EnvRequirement::new("root", true, false, false);

    /// Commands iterating over a filtered set of repositories.
    pub const FILTERED: EnvRequirement = EnvRequirement::new("filtered", true, true, false);

    /// The canonical file, nothing else.
    pub const CANFILE: EnvRequirement = EnvRequirement::new("canfile", false, false, true);

    /// Filtered repositories plus the canonical file.
    pub const FILTERED_CANFILE: EnvRequirement =
        EnvRequirement::new("filtered-canfile", true, true, true);
}
