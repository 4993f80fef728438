//! Type definitions for the todos service
//!
//! This crate contains the wire types shared across the workspace: the todo
//! resource itself, request payloads, error bodies and the store backend kind.

pub mod backend;
pub mod todo;

pub use backend::StoreBackend;
pub use todo::{ErrorResponse, Todo, TodoPayload, TodoUpdate};
