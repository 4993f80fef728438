//! Init command implementation

use clap::Args;
use std::fs;
use std::path::Path;
use todos_core::TodoError;
use todos_types::StoreBackend;
use tracing::info;

/// Init command arguments
#[derive(Args, Debug)]
pub struct InitCommand {
    /// Service name
    #[arg(default_value = "todos")]
    pub name: String,

    /// Output directory
    #[arg(short, long, default_value = ".")]
    pub output: String,

    /// Store backend (mongodb or memory)
    #[arg(short = 'b', long, default_value = "mongodb")]
    pub backend: String,

    /// Overwrite an existing todos.yaml
    #[arg(long)]
    pub force: bool,
}

impl InitCommand {
    /// Execute the init command
    pub async fn execute(&self) -> Result<(), TodoError> {
        info!("Initializing todos configuration: {}", self.name);

        let backend: StoreBackend = self.backend.parse().map_err(TodoError::Config)?;

        let output_dir = Path::new(&self.output);
        if !output_dir.exists() {
            fs::create_dir_all(output_dir)?;
        }

        let config_path = output_dir.join("todos.yaml");
        if config_path.exists() && !self.force {
            return Err(TodoError::Config(format!(
                "{} already exists (use --force to overwrite)",
                config_path.display()
            )));
        }

        fs::write(&config_path, self.generate_config(backend))?;
        info!("Created: {}", config_path.display());

        if backend.requires_url() {
            let env_path = output_dir.join(".env.example");
            fs::write(&env_path, Self::generate_env_example())?;
            info!("Created: {}", env_path.display());
        }

        println!("\nTodos configuration initialized.");
        println!("\nNext steps:");
        if backend.requires_url() {
            println!("  1. Copy .env.example to .env and set MONGODB_URL");
            println!("  2. Run: todos run -f {}", config_path.display());
        } else {
            println!("  1. Run: todos run -f {}", config_path.display());
        }

        Ok(())
    }

    /// Generate configuration file content
    fn generate_config(&self, backend: StoreBackend) -> String {
        let store = match backend {
            StoreBackend::Mongodb => {
                r#"store:
  backend: mongodb
  url: "{{ env.MONGODB_URL | mongodb://localhost:27017 }}"
  database: todos
  pool:
    max_connections: 10
    min_connections: 1"#
            }
            StoreBackend::Memory => {
                r#"store:
  backend: memory"#
            }
        };

        format!(
            r#"# todos configuration

name: {}

server:
  port: 5000
  log_level: 1
  # static_dir: ./static

{}
"#,
            self.name, store
        )
    }

    /// Generate .env.example content
    fn generate_env_example() -> String {
        r#"# MongoDB connection URL
MONGODB_URL=mongodb://localhost:27017
"#
        .to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(output: &str, backend: &str) -> InitCommand {
        InitCommand {
            name: "todo-api".to_string(),
            output: output.to_string(),
            backend: backend.to_string(),
            force: false,
        }
    }

    #[test]
    fn test_generate_config_mongodb() {
        let config = command(".", "mongodb").generate_config(StoreBackend::Mongodb);
        assert!(config.contains("name: todo-api"));
        assert!(config.contains("backend: mongodb"));
        assert!(config.contains("{{ env.MONGODB_URL"));
    }

    #[test]
    fn test_generated_config_parses() {
        for backend in [StoreBackend::Mongodb, StoreBackend::Memory] {
            let content = command(".", "mongodb").generate_config(backend);
            let config = todos_parser::parse_string(&content).unwrap();
            assert_eq!(config.name, "todo-api");
            assert_eq!(config.store.backend, backend);
            assert_eq!(config.port(), 5000);
        }
    }

    #[tokio::test]
    async fn test_init_writes_files() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("project");
        let cmd = command(output.to_str().unwrap(), "mongodb");
        cmd.execute().await.unwrap();

        assert!(output.join("todos.yaml").exists());
        assert!(output.join(".env.example").exists());

        // Refuses to clobber without --force
        assert!(cmd.execute().await.is_err());
    }

    #[tokio::test]
    async fn test_init_memory_skips_env_file() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = command(dir.path().to_str().unwrap(), "memory");
        cmd.execute().await.unwrap();

        assert!(dir.path().join("todos.yaml").exists());
        assert!(!dir.path().join(".env.example").exists());
    }

    #[tokio::test]
    async fn test_init_unknown_backend() {
        let dir = tempfile::tempdir().unwrap();
        let cmd = command(dir.path().to_str().unwrap(), "sqlite");
        assert!(matches!(cmd.execute().await, Err(TodoError::Config(_))));
    }
}
