//! program::requirement
//!
//! Per-command policy about which global flags a command accepts.
//!
//! # Architecture
//!
//! Each command declares one [`Requirement`] in its
//! [`Description`](super::Description). Before the command's own flags are
//! parsed, the requirement validates the global flags that were already
//! parsed. The default validation is [`validate_allowed_flags`].
//!
//! [`partition_flags`] is the single place deciding which global flags a
//! command accepts. The parser rejects exactly the flags it returns as
//! forbidden and the usage page lists exactly the flags it returns as
//! allowed.
//!
//! # Invariants
//!
//! - A requirement is immutable once registered
//! - Validation names the specific offending flag

use super::args::Arguments;
use super::errors::ProgramError;
use super::meta::Flag;
use super::GlobalFlags;

/// A command's policy about global flags.
pub trait Requirement<F: GlobalFlags> {
    /// Whether the command accepts the global flag `flag`.
    fn allows_flag(&self, flag: &Flag) -> bool;

    /// Check the global flags supplied by the user.
    ///
    /// The default rejects any supplied flag that [`allows_flag`] refuses.
    ///
    /// [`allows_flag`]: Requirement::allows_flag
    fn validate(&self, args: &Arguments<F>) -> Result<(), ProgramError> {
        validate_allowed_flags(self, args)
    }
}

/// Split the host's global flags into `(allowed, forbidden)` for `requirement`.
pub fn partition_flags<F, R>(requirement: &R) -> (Vec<Flag>, Vec<Flag>)
where
    F: GlobalFlags,
    R: Requirement<F> + ?Sized,
{
    F::flags()
        .into_iter()
        .partition(|flag| requirement.allows_flag(flag))
}

/// Reject any global flag the requirement does not allow but the user set
/// to a non-default value.
pub fn validate_allowed_flags<F, R>(requirement: &R, args: &Arguments<F>) -> Result<(), ProgramError>
where
    F: GlobalFlags,
    R: Requirement<F> + ?Sized,
{
    let (_, forbidden) = partition_flags::<F, R>(requirement);
    match forbidden.iter().find(|flag| args.values.is_set(flag)) {
        Some(flag) => Err(ProgramError::DisallowedGlobalFlag {
            command: args.command.clone(),
            flag: flag.display_name(),
        }),
        None => Ok(()),
    }
}
