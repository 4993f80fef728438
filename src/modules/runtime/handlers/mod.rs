//! HTTP request handlers for the todos server
//!
//! This module contains the todo CRUD handlers and the OpenAPI document.

mod openapi;
mod todos;

pub use openapi::OpenApiHandler;
pub use todos::{error_response, ApiError, ApiResult, TodoHandler};
