//! `rewardlink` command-line tool.
//!
//! Builds approval URLs for batch payments, decodes them, signs them as the
//! sender and submits signed links to a `RewardLinkExecutor` deployment.
//!
//! # Modules
//!
//! - [`cli`] - Argument definitions and environment variables
//! - [`commands`] - One function per subcommand
//! - [`error`] - [`CliError`]

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Cli, Command};
pub use error::CliError;
