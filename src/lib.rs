//! ggman - a manager for all your local git repositories
//!
//! ggman clones every repository into a path derived from its url, below a
//! single root folder, and runs commands over filtered sets of them.
//!
//! # Architecture
//!
//! The codebase is layered:
//!
//! - [`program`] - Generic command dispatch: two-phase argument parsing,
//!   requirement gating of global flags, aliases, keywords, usage pages and
//!   exit codes. Knows nothing about git.
//! - [`env`] - The ggman host: global flags, requirements, configuration and
//!   the runtime environment commands operate in
//! - [`git`] - Single interface for all Git operations
//! - [`cmd`] - The ggman commands
//!
//! # Correctness Invariants
//!
//! 1. A command never runs unless every global flag given is allowed by its
//!    requirement
//! 2. Every failure maps to exactly one exit code
//! 3. Resolving an argument vector has no side effects

pub mod cmd;
pub mod env;
pub mod git;
pub mod program;

pub use env::Ggman;
