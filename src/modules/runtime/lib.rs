//! Runtime server for the todos service
//!
//! This crate provides the HTTP server, the todo stores and the request
//! handlers that map REST calls onto single-document store operations.

pub mod handlers;
pub mod server;
pub mod state;
pub mod store;

pub use handlers::{OpenApiHandler, TodoHandler};
pub use server::{build_router, Runtime};
pub use state::AppState;
pub use store::{MemoryTodoStore, MongoTodoStore, TodoStore};
