//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the only doorway to Git. Reads of local repositories go
//! through [`Git`] (git2); operations that need the network go through
//! [`GitCli`] (the `git` executable). No other module imports `git2`.
//!
//! # Responsibilities
//!
//! - Repository discovery and opening
//! - Remote listing and rewriting
//! - Working tree status and upstream divergence
//! - Clone, fetch and pull

mod cli;
mod interface;

pub use cli::GitCli;
pub use interface::{Git, GitError, SyncStatus, WorktreeStatus};
