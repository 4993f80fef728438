//! Run command implementation

use clap::Args;
use todos_core::{AppConfig, StoreConfig, TodoError};
use todos_parser::{load_file, ConfigValidator, EnvSubstitutor};
use todos_runtime::Runtime;

/// Run command arguments
#[derive(Args, Debug)]
pub struct RunCommand {
    /// Override server port
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Keep todos in memory instead of the configured store
    #[arg(long)]
    pub memory: bool,
}

impl RunCommand {
    /// Load the configuration, apply the command-line overrides, then validate.
    ///
    /// With `--memory` the configured store is discarded, so store placeholders
    /// whose variables are unset do not stop the server from starting.
    pub fn load_config(&self, config_path: &str) -> Result<AppConfig, TodoError> {
        let substitutor = if self.memory {
            EnvSubstitutor::lenient()
        } else {
            EnvSubstitutor::new()
        };

        let config = self.apply_overrides(load_file(config_path, &substitutor)?);
        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }

    /// Execute the run command with a config from [`RunCommand::load_config`]
    pub async fn execute(&self, config: AppConfig) -> Result<(), TodoError> {
        let runtime = Runtime::new(config).await?;
        runtime.run().await?;

        Ok(())
    }

    fn apply_overrides(&self, mut config: AppConfig) -> AppConfig {
        if let Some(port) = self.port {
            config = config.with_port(port);
        }
        if self.memory {
            config = config.with_store(StoreConfig::memory());
        }
        config
    }
}
