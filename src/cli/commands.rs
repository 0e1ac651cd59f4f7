//! CLI command definitions

use clap::Args;

/// Activate and run a bootstrap pipeline
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Path to bootstrap YAML file (defaults to the user config directory)
    #[arg(short, long)]
    pub file: Option<String>,

    /// Start the pipeline even when the config disables auto start
    #[arg(long)]
    pub start: bool,

    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,
}

/// Validate a bootstrap configuration
#[derive(Debug, Args, Clone)]
pub struct ValidateCommand {
    /// Path to bootstrap YAML file
    #[arg(short, long)]
    pub file: String,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}

/// List built-in steps
#[derive(Debug, Args, Clone)]
pub struct ListCommand {
    /// Output in JSON format
    #[arg(long)]
    pub json: bool,
}
