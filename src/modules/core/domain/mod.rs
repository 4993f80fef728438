//! Domain models for the todos service

mod config;
mod identifier;
mod types;

pub use config::AppConfig;
pub use identifier::{is_valid_object_id, OBJECT_ID_HEX_LEN};
pub use types::{PoolConfig, ServerConfig, StoreConfig, DEFAULT_DATABASE, TODOS_COLLECTION};
