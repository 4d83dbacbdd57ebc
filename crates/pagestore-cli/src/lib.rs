//! PageStore admin CLI
//!
//! `pagestore [--config PATH] [--log-level LEVEL] <command>`

pub mod commands;
pub mod error;
pub mod logging;
pub mod output;
pub mod router;

pub use error::{CliError, CliResult};
pub use router::{Cli, CommandRouter};
