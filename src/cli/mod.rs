//! Command-line interface

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use commands::{ListCommand, RunCommand, ValidateCommand};
use std::ffi::OsString;

/// Sequential application bootstrap pipeline
#[derive(Debug, Parser, Clone)]
#[command(name = "bootstrap")]
#[command(author = "Bootstrap Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Runs an application's initialization steps in order", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available commands
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Activate and run a bootstrap pipeline
    Run(RunCommand),

    /// Validate a bootstrap configuration
    Validate(ValidateCommand),

    /// List built-in steps
    List(ListCommand),
}

impl Cli {
    /// Parse CLI arguments from environment
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Parse CLI arguments from a slice
    pub fn try_parse_from<I, T>(itr: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString> + Clone,
    {
        <Self as Parser>::try_parse_from(itr)
    }
}
