//! Dupe CLI library.
//!
//! This library provides the pieces of the `dupe` command-line tool:
//! argument parsing, configuration layering, the run itself and output
//! publication for GitHub Actions.

pub mod cli;
pub mod config;
pub mod error;
pub mod output;
pub mod run;

pub use cli::Cli;
pub use config::Config;
pub use error::{CliError, Result};
pub use run::execute;
