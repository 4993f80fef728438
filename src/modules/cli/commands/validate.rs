//! Validate command implementation

use clap::Args;
use todos_core::{AppConfig, TodoError};
use todos_parser::parse_file;

/// Validate command arguments
#[derive(Args, Debug)]
pub struct ValidateCommand {
    /// Print the resolved configuration as JSON
    #[arg(long)]
    pub json: bool,
}

impl ValidateCommand {
    /// Execute the validate command
    pub async fn execute(&self, config_path: &str) -> Result<(), TodoError> {
        let config = parse_file(config_path)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&Self::redacted(config))?);
        } else {
            println!("{}", Self::summary(config_path, &config));
        }

        Ok(())
    }

    fn summary(config_path: &str, config: &AppConfig) -> String {
        let mut lines = vec![
            format!("{} is valid", config_path),
            format!("  name:     {}", config.name),
            format!("  listen:   {}:{}", config.host(), config.port()),
            format!("  store:    {}", config.store.backend),
        ];
        if config.store.backend.requires_url() {
            lines.push(format!("  database: {}", config.store.database()));
        }
        if let Some(dir) = config.static_dir() {
            lines.push(format!("  static:   {}", dir));
        }
        lines.join("\n")
    }

    /// Drop the store URL, which may carry credentials
    fn redacted(mut config: AppConfig) -> AppConfig {
        if config.store.url.is_some() {
            config.store.url = Some("<redacted>".to_string());
        }
        config
    }
}
