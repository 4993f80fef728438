//! todos CLI
//!
//! Command-line interface for the todos REST service.

use clap::Parser;
use todos_cli::{Cli, Commands};
use todos_core::TodoError;
use tracing::{info, Level};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run() -> Result<(), TodoError> {
    let cli = Cli::parse();
    let config_path = cli.config_path().to_string();
    let verbose = cli.verbose;
    let log_json = cli.log_json;

    // Execute command
    match cli.command {
        Commands::Run(cmd) => {
            // The config decides the log level, so it is loaded before logging starts
            let config = cmd.load_config(&config_path)?;
            init_logging(log_level(verbose, Some(config.log_level())), log_json);
            info!("Loaded configuration from: {}", config_path);
            cmd.execute(config).await?;
        }
        Commands::Init(cmd) => {
            init_logging(log_level(verbose, None), log_json);
            cmd.execute().await?;
        }
        Commands::Validate(cmd) => {
            init_logging(log_level(verbose, None), log_json);
            cmd.execute(&config_path).await?;
        }
        Commands::Completion(cmd) => {
            cmd.execute();
        }
    }

    Ok(())
}

fn init_logging(level: Level, json: bool) {
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();

    let fmt_layer = if json {
        fmt::layer().json().boxed()
    } else {
        fmt::layer().boxed()
    };

    tracing_subscriber::registry()
        .with(fmt_layer)
        .with(filter)
        .init();
}

/// `--verbose` wins; otherwise `server.log_level` from the config, when there is one.
fn log_level(verbose: bool, configured: Option<u8>) -> Level {
    if verbose {
        return Level::DEBUG;
    }

    match configured {
        Some(0) => Level::DEBUG,
        Some(2) => Level::WARN,
        Some(3) => Level::ERROR,
        _ => Level::INFO,
    }
}
