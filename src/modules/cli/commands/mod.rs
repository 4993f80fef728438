//! CLI commands

mod completion;
mod init;
mod run;
mod validate;

pub use completion::CompletionCommand;
pub use init::InitCommand;
pub use run::RunCommand;
pub use validate::ValidateCommand;

use clap::{Parser, Subcommand};

/// todos - REST service for todo items
#[derive(Parser, Debug)]
#[command(name = "todos")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file path
    ///
    /// This is a *global* option so it can be specified after subcommands,
    /// e.g. `todos run -f todos.yaml`.
    #[arg(
        short = 'f',
        long = "file",
        global = true,
        default_value = "todos.yaml"
    )]
    pub config: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the todos server
    Run(RunCommand),

    /// Write a starter configuration
    Init(InitCommand),

    /// Parse and validate the configuration file
    Validate(ValidateCommand),

    /// Generate shell completions
    #[command(hide = true)]
    Completion(CompletionCommand),
}

impl Cli {
    /// Effective configuration path
    pub fn config_path(&self) -> &str {
        &self.config
    }
}
