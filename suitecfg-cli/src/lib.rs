//! Library half of the `suitecfg` binary.
//!
//! Argument parsing lives in [`cli`], command execution in [`commands`] and
//! the error type in [`error`]. Commands write to any [`std::io::Write`] so
//! they can be exercised without spawning the binary.

pub mod cli;
pub mod commands;
pub mod error;

pub use cli::{Commands, CommandLine, GlobalArgs};
pub use commands::run;
pub use error::{CliError, Result};
